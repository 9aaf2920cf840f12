//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "histfeed")]
#[command(author, version, about = "Rate-limited historical market data acquisition pipeline")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch historical bars into the catalog
    Bars(BarsArgs),
    /// Fetch historical ticks into the catalog
    Ticks(TicksArgs),
    /// Fetch instrument definitions into the catalog
    Instruments(InstrumentsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BarsArgs {
    /// Instruments as SYMBOL.VENUE (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub instruments: Vec<String>,

    /// Bar specification, e.g. 1-MINUTE-LAST
    #[arg(short, long, default_value = "1-MINUTE-LAST")]
    pub spec: String,

    /// Range start (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), local to --timezone
    #[arg(long)]
    pub start: String,

    /// Range end, exclusive
    #[arg(long)]
    pub end: String,

    /// Timezone for interpreting --start/--end
    #[arg(short, long, default_value = "America/New_York")]
    pub timezone: String,

    /// Include data outside regular trading hours
    #[arg(long)]
    pub extended_hours: bool,
}

#[derive(clap::Args)]
pub struct TicksArgs {
    /// Instruments as SYMBOL.VENUE (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub instruments: Vec<String>,

    /// Tick stream: TRADES or BID_ASK
    #[arg(long, default_value = "TRADES")]
    pub tick_type: String,

    /// Range start (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), local to --timezone
    #[arg(long)]
    pub start: String,

    /// Range end, exclusive
    #[arg(long)]
    pub end: String,

    /// Timezone for interpreting --start/--end
    #[arg(short, long, default_value = "America/New_York")]
    pub timezone: String,

    /// Include data outside regular trading hours
    #[arg(long)]
    pub extended_hours: bool,
}

#[derive(clap::Args)]
pub struct InstrumentsArgs {
    /// Instruments as SYMBOL.VENUE (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub instruments: Vec<String>,
}
