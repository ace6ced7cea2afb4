// ============================================================================
// Estate Core - Transaction Entity
// File: crates/estate-core/src/domain/transaction.rs
// Description: Payment record between a payer and a receiver
// ============================================================================

use chrono::{DateTime, Utc};
use estate_shared::ExternalId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Rent,
    Deposit,
    Sale,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    BankTransfer,
    Paypal,
}

/// Transaction create request (no identity yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub payer_id: ExternalId,
    pub payer_name: String,
    pub receiver_id: ExternalId,
    pub receiver_name: String,
    pub property_id: ExternalId,
    pub property_name: String,
    pub amount: i64,
    pub currency: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

/// Persisted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExternalId,
    pub payer_id: ExternalId,
    #[serde(default)]
    pub payer_name: Option<String>,
    pub receiver_id: ExternalId,
    #[serde(default)]
    pub receiver_name: Option<String>,
    pub property_id: ExternalId,
    #[serde(default)]
    pub property_name: Option<String>,
    pub amount: i64,
    pub currency: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}
