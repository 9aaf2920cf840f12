//! Configuration structures.

use histfeed_core::error::FeedError;
use serde::{Deserialize, Serialize};

/// Documented hard cap of the external API: 50 requests per second.
/// The default pacing sits below it to absorb clock and latency jitter.
pub const HARD_REQUEST_CAP: u32 = 50;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedConfig {
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub pacing: PacingSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FeedConfig {
    /// Validate cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.connection.host.is_empty() {
            return Err(FeedError::Config("connection.host must not be empty".into()));
        }
        if self.pacing.requests_per_second == 0 {
            return Err(FeedError::Config(
                "pacing.requests_per_second must be positive".into(),
            ));
        }
        if self.pacing.requests_per_second > HARD_REQUEST_CAP {
            return Err(FeedError::Config(format!(
                "pacing.requests_per_second {} exceeds the API hard cap of {}",
                self.pacing.requests_per_second, HARD_REQUEST_CAP
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(FeedError::Config("fetch.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

/// Session connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub client_id: u32,
    pub market_data_mode: MarketDataMode,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7497,
            client_id: 1,
            market_data_mode: MarketDataMode::Delayed,
        }
    }
}

/// Market data subscription mode requested at connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketDataMode {
    Realtime,
    Delayed,
    DelayedFrozen,
}

/// Outbound request pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingSettings {
    /// Admissions per trailing second. Kept below the hard cap of 50.
    pub requests_per_second: u32,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            requests_per_second: 45,
        }
    }
}

/// Fetch behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Per-call transport timeout in seconds.
    pub timeout_secs: u64,
    /// Restrict fetches to regular trading hours.
    pub use_rth: bool,
    /// Post-handshake stabilization delay in milliseconds.
    pub stabilization_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            use_rth: true,
            stabilization_ms: 500,
        }
    }
}

/// Catalog location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    pub root: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            root: "catalog".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
