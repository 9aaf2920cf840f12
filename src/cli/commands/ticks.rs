//! Ticks command implementation.

use anyhow::{anyhow, Result};
use histfeed_core::types::{FetchRequest, TickType};
use std::path::Path;
use tracing::info;

use crate::cli::TicksArgs;

use super::{connect_pipeline, load_config, parse_instruments, parse_range, parse_timezone};

pub async fn run(args: TicksArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let tick_type: TickType = args.tick_type.parse().map_err(|e: String| anyhow!(e))?;
    let timezone = parse_timezone(&args.timezone)?;
    let instruments = parse_instruments(&args.instruments)?;
    let range = parse_range(&args.start, &args.end, timezone)?;
    let use_rth = if args.extended_hours {
        false
    } else {
        config.fetch.use_rth
    };

    let (session, orchestrator) = connect_pipeline(&config).await?;
    let request = FetchRequest::new(instruments, range, timezone).with_rth(use_rth);
    let result = orchestrator.fetch_ticks(&request, tick_type).await;
    session.disconnect();

    let result = result?;
    info!(
        count = result.count(),
        catalog = %config.catalog.root,
        "tick fetch complete"
    );
    println!(
        "Fetched {} ticks ({}) into {}",
        result.count(),
        tick_type,
        config.catalog.root
    );
    Ok(())
}
