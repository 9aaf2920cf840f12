//! Validate-config command implementation.

use anyhow::Result;
use std::path::Path;

use super::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    println!("Configuration OK: {}", config_path.display());
    println!(
        "  connection: {}:{} (client {}, {:?})",
        config.connection.host,
        config.connection.port,
        config.connection.client_id,
        config.connection.market_data_mode
    );
    println!("  pacing: {} req/s", config.pacing.requests_per_second);
    println!(
        "  fetch: timeout {}s, rth {}",
        config.fetch.timeout_secs, config.fetch.use_rth
    );
    println!("  catalog: {}", config.catalog.root);
    Ok(())
}
