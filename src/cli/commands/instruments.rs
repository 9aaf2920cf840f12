//! Instruments command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::cli::InstrumentsArgs;

use super::{connect_pipeline, load_config, parse_instruments};

pub async fn run(args: InstrumentsArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let instruments = parse_instruments(&args.instruments)?;

    let (session, orchestrator) = connect_pipeline(&config).await?;
    let result = orchestrator.fetch_instruments(&instruments).await;
    session.disconnect();

    let result = result?;
    info!(count = result.count(), "instrument fetch complete");
    for def in &result.records {
        println!(
            "{}  {}  {}  {}  tick {}",
            def.id, def.name, def.asset_class, def.currency, def.price_increment
        );
    }
    Ok(())
}
