// ============================================================================
// Estate Core - Property Entity
// File: crates/estate-core/src/domain/property.rs
// Description: Read-only view of a listed property used for pricing
// ============================================================================

use chrono::{DateTime, Utc};
use estate_shared::ExternalId;
use serde::{Deserialize, Serialize};

/// Property type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Listed for sale
    RealEstate,
    /// Listed for monthly lease
    RentedRealEstate,
    /// Listed for nightly stays
    Hotel,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::RealEstate => "real_estate",
            PropertyType::RentedRealEstate => "rented_real_estate",
            PropertyType::Hotel => "hotel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "real_estate" => Some(PropertyType::RealEstate),
            "rented_real_estate" => Some(PropertyType::RentedRealEstate),
            "hotel" => Some(PropertyType::Hotel),
            _ => None,
        }
    }
}

/// Listing status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Rented,
    Sold,
    Inactive,
}

/// Property as served by the reservation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExternalId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub owner_id: Option<ExternalId>,

    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(rename = "type", default)]
    pub property_type: Option<PropertyType>,

    #[serde(default)]
    pub status: Option<PropertyStatus>,

    #[serde(default)]
    pub category: Option<String>,

    /// Asking price for a sale, in whole currency units.
    #[serde(default)]
    pub sell_price: Option<i64>,

    /// Monthly rent for leases, nightly rate for hotels.
    #[serde(default)]
    pub rent_price: Option<i64>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    pub fn sell_price_or_zero(&self) -> i64 {
        self.sell_price.unwrap_or(0)
    }

    pub fn rent_price_or_zero(&self) -> i64 {
        self.rent_price.unwrap_or(0)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Property")
    }

    pub fn is_inactive(&self) -> bool {
        self.status == Some(PropertyStatus::Inactive)
    }
}
