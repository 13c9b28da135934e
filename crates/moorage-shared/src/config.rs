//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub availability: AvailabilitySettings,
    pub booking: BookingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// Bounded wait for the place row lock during admission, in milliseconds.
    /// Exceeding it surfaces as a retryable contention error.
    pub lock_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AvailabilitySettings {
    /// When true, a query range ending with free capacity also reports an
    /// unbounded "no known constraint" tail segment.
    pub open_tail: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingSettings {
    /// Grants administrative backfill of reservations starting before today.
    pub allow_past_dates: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "moorage")?
            .set_default("database.max_connections", 10)?
            .set_default("database.lock_timeout_ms", 2000)?
            .set_default("availability.open_tail", false)?
            .set_default("booking.allow_past_dates", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
