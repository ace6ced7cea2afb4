// ============================================================================
// Estate Infrastructure - REST Reservation Store
// File: crates/estate-infrastructure/src/http/reservation_client.rs
// ============================================================================
//! Client of the REST service that owns properties, bookings, leases and
//! transactions.
//!
//! The service answers some routes with a bare document and others with a
//! single-key envelope (`{"properties": [...]}`); both shapes are accepted.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use estate_core::domain::{
    Booking, Lease, NewBooking, NewLease, NewTransaction, Property, Transaction,
};
use estate_core::error::DomainError;
use estate_core::repositories::ReservationStore;

#[derive(Debug, Clone)]
pub struct RestClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    /// Sent verbatim as the `Authorization` header
    pub auth_token: Option<String>,
}

#[derive(Clone)]
pub struct RestReservationStore {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RestReservationStore {
    pub fn new(settings: RestClientSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build collaborator HTTP client")?;
        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid collaborator base URL: {}", settings.base_url))?;

        Ok(Self {
            client,
            base_url,
            auth_token: settings.auth_token.filter(|t| !t.is_empty()),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Collaborator base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token),
            None => request,
        }
    }

    /// GET a document; `None` on 404. Callers decide whether a missing
    /// document is an error.
    async fn get_json(&self, segments: &[&str]) -> Result<Option<Value>> {
        let url = self.url(segments)?;
        debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(url.clone()))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GET {} failed ({}): {}", url, status, body);
        }

        let value = response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {}", url))?;
        Ok(Some(value))
    }

    async fn post_json<B: Serialize + Sync>(&self, segments: &[&str], body: &B) -> Result<Value> {
        let url = self.url(segments)?;
        debug!("POST {}", url);
        let response = self
            .authorize(self.client.post(url.clone()))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("POST {} failed ({}): {}", url, status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {}", url))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        // A missing collection route means a misconfigured base URL, not an empty list
        let value = self
            .get_json(&[collection])
            .await?
            .with_context(|| format!("Collection {} not found (404)", collection))?;
        decode(unwrap_envelope(value, collection))
    }

    async fn fetch_property(&self, id: &str) -> Result<Option<Property>> {
        match self.get_json(&["properties", id]).await? {
            Some(value) => decode(unwrap_envelope(value, "property")).map(Some),
            None => Ok(None),
        }
    }

    async fn submit<B, T>(&self, collection: &str, entity: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let value = self.post_json(&[collection], body).await?;
        decode(unwrap_envelope(value, entity))
    }

    async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, DomainError> {
        self.fetch_list(collection)
            .await
            .map_err(|e| collaborator_error("listing", collection, e))
    }

    async fn create<B, T>(&self, collection: &str, entity: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.submit(collection, entity, body)
            .await
            .map_err(|e| collaborator_error("creating", entity, e))
    }
}

/// Take `value[key]` when the body is an envelope holding `key`.
fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).context("Unexpected document shape")
}

fn collaborator_error(action: &str, what: &str, e: anyhow::Error) -> DomainError {
    error!("Collaborator error {} {}: {:#}", action, what, e);
    DomainError::CollaboratorError(format!("{:#}", e))
}

#[async_trait]
impl ReservationStore for RestReservationStore {
    async fn find_property(&self, id: &str) -> Result<Option<Property>, DomainError> {
        self.fetch_property(id)
            .await
            .map_err(|e| collaborator_error("fetching property", id, e))
    }

    async fn list_properties(&self) -> Result<Vec<Property>, DomainError> {
        self.list("properties").await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, DomainError> {
        self.list("bookings").await
    }

    async fn list_leases(&self) -> Result<Vec<Lease>, DomainError> {
        self.list("leases").await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, DomainError> {
        self.list("transactions").await
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, DomainError> {
        self.create("bookings", "booking", booking).await
    }

    async fn create_lease(&self, lease: &NewLease) -> Result<Lease, DomainError> {
        self.create("leases", "lease", lease).await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, DomainError> {
        self.create("transactions", "transaction", transaction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use estate_core::domain::{BookingStatus, PropertyType};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer, token: Option<&str>) -> RestReservationStore {
        RestReservationStore::new(RestClientSettings {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            auth_token: token.map(str::to_string),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_property_unwraps_envelope_and_forwards_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/properties/65f0c2a1"))
            .and(header("Authorization", "secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "property": {
                    "_id": "65f0c2a1",
                    "name": "Harbor Loft",
                    "ownerId": "owner-1",
                    "type": "hotel",
                    "rentPrice": 120
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let property = store(&server, Some("secret-token"))
            .find_property("65f0c2a1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(property.id, "65f0c2a1");
        assert_eq!(property.property_type, Some(PropertyType::Hotel));
        assert_eq!(property.rent_price_or_zero(), 120);
    }

    #[tokio::test]
    async fn test_missing_property_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/properties/unknown"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(store(&server, None).find_property("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lists_accept_bare_and_wrapped_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "_id": "b1",
                "propertyId": "p1",
                "clientId": "c1",
                "checkInDate": "2024-03-01T00:00:00Z",
                "checkOutDate": "2024-03-04T00:00:00Z",
                "status": "confirmed",
                "totalAmount": 350,
                "bookedAt": "2024-02-01T00:00:00Z"
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/leases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "leases": [] })))
            .mount(&server)
            .await;

        let client = store(&server, None);
        let bookings = client.list_bookings().await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].status, BookingStatus::Confirmed);
        assert!(client.list_leases().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_posts_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bookings"))
            .and(body_partial_json(json!({
                "propertyId": "p1",
                "clientId": "c1",
                "status": "pending",
                "totalAmount": 350
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "b-new",
                "propertyId": "p1",
                "clientId": "c1",
                "checkInDate": "2024-03-01T00:00:00Z",
                "checkOutDate": "2024-03-04T00:00:00Z",
                "status": "pending",
                "totalAmount": 350,
                "bookedAt": "2024-02-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = NewBooking::pending(
            "p1".to_string(),
            "c1".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            350,
        )
        .unwrap();

        let booking = store(&server, None).create_booking(&draft).await.unwrap();
        assert_eq!(booking.id, "b-new");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_collaborator_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = store(&server, None).list_transactions().await;
        assert!(matches!(result, Err(DomainError::CollaboratorError(ref msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_missing_collection_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = store(&server, None).list_bookings().await;
        assert!(matches!(result, Err(DomainError::CollaboratorError(ref msg)) if msg.contains("404")));
    }

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(unwrap_envelope(json!({"lease": {"a": 1}}), "lease"), json!({"a": 1}));
        assert_eq!(unwrap_envelope(json!({"a": 1}), "lease"), json!({"a": 1}));
        assert_eq!(unwrap_envelope(json!([1]), "leases"), json!([1]));
    }
}
