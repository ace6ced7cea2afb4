//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_APPLICATION_FEE, DEFAULT_CLEANING_FEE, DEFAULT_CURRENCY, DEFAULT_OUTBOUND_BUFFER,
    DEFAULT_PURCHASE_TAX_BPS, DEFAULT_ROOM_CAPACITY,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub collaborator: CollaboratorSettings,
    pub pricing: PricingSettings,
    pub reservations: ReservationSettings,
    pub gateway: GatewaySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

/// REST service that owns properties, bookings, leases and transactions.
#[derive(Debug, Deserialize, Clone)]
pub struct CollaboratorSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub application_fee: i64,
    pub cleaning_fee: i64,
    pub purchase_tax_bps: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReservationSettings {
    pub reject_overlapping: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub room_capacity: usize,
    pub outbound_buffer: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Builder pre-populated with every default, so the service starts with
    /// no configuration files at all.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 4000)?
            .set_default("app.name", "estate-server")?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("storage.backend", "memory")?
            .set_default("collaborator.base_url", "http://localhost:5000/api")?
            .set_default("collaborator.timeout_seconds", 10)?
            .set_default("pricing.application_fee", DEFAULT_APPLICATION_FEE)?
            .set_default("pricing.cleaning_fee", DEFAULT_CLEANING_FEE)?
            .set_default("pricing.purchase_tax_bps", DEFAULT_PURCHASE_TAX_BPS)?
            .set_default("pricing.currency", DEFAULT_CURRENCY)?
            .set_default("reservations.reject_overlapping", false)?
            .set_default("gateway.room_capacity", DEFAULT_ROOM_CAPACITY as i64)?
            .set_default("gateway.outbound_buffer", DEFAULT_OUTBOUND_BUFFER as i64)?
            .set_default("logging.format", "json")?
            .set_default("logging.file_prefix", "estate-server.log")
    }
}
