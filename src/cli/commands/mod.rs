//! Command implementations.

pub mod bars;
pub mod instruments;
pub mod ticks;
pub mod validate;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use histfeed_catalog::CsvCatalog;
use histfeed_config::FeedConfig;
use histfeed_core::types::{InstrumentId, TimeRange};
use histfeed_fetch::FetchOrchestrator;
use histfeed_limiter::RequestPacer;
use histfeed_session::{SessionManager, SimTransport};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Load and validate the configuration file.
pub(crate) fn load_config(path: &Path) -> Result<FeedConfig> {
    let config = histfeed_config::load_config(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Assemble the pipeline over the simulated transport and connect.
pub(crate) async fn connect_pipeline(
    config: &FeedConfig,
) -> Result<(Arc<SessionManager>, FetchOrchestrator)> {
    let transport = Arc::new(SimTransport::new());
    let session = Arc::new(
        SessionManager::new(transport)
            .with_stabilization(Duration::from_millis(config.fetch.stabilization_ms)),
    );
    let info = session
        .connect(Duration::from_secs(config.fetch.timeout_secs))
        .await?;
    info!(account = %info.account_id, "pipeline session established");

    let pacer = Arc::new(RequestPacer::new(config.pacing.requests_per_second as usize));
    let catalog = Arc::new(CsvCatalog::new(config.catalog.root.as_str())?);
    let orchestrator = FetchOrchestrator::new(session.clone(), pacer, catalog)
        .with_request_timeout(Duration::from_secs(config.fetch.timeout_secs));
    Ok((session, orchestrator))
}

pub(crate) fn parse_instruments(raw: &[String]) -> Result<Vec<InstrumentId>> {
    raw.iter()
        .map(|s| s.parse::<InstrumentId>().map_err(|e| anyhow!(e)))
        .collect()
}

pub(crate) fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.parse::<Tz>().map_err(|e| anyhow!(e))
}

pub(crate) fn parse_range(start: &str, end: &str, tz: Tz) -> Result<TimeRange> {
    let start = parse_local(start, tz)?;
    let end = parse_local(end, tz)?;
    Ok(TimeRange::new(start, end)?)
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM[:SS]` as a local datetime in `tz`.
fn parse_local(raw: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| anyhow!("Could not parse datetime: {}", raw))?;

    let local = naive
        .and_local_timezone(tz)
        .earliest()
        .ok_or_else(|| anyhow!("{} has no instant in {}", naive, tz))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_formats() {
        let tz = chrono_tz::America::New_York;
        assert!(parse_local("2024-01-02", tz).is_ok());
        assert!(parse_local("2024-01-02 09:30", tz).is_ok());
        assert!(parse_local("2024-01-02 09:30:15", tz).is_ok());
        assert!(parse_local("Jan 2 2024", tz).is_err());
    }

    #[test]
    fn test_parse_range_rejects_inverted() {
        let tz = chrono_tz::UTC;
        assert!(parse_range("2024-01-02", "2024-01-01", tz).is_err());
        assert!(parse_range("2024-01-01", "2024-01-02", tz).is_ok());
    }

    #[test]
    fn test_parse_instruments() {
        let ids = parse_instruments(&["AAPL.NASDAQ".into(), "ES.CME".into()]).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(parse_instruments(&["AAPL".into()]).is_err());
    }
}
