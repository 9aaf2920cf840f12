//! CSV catalog sink.

use async_trait::async_trait;
use histfeed_core::error::CatalogError;
use histfeed_core::traits::CatalogSink;
use histfeed_core::types::{Bar, InstrumentDef, InstrumentId, RecordBatch, Tick};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Append-oriented CSV catalog, one file per (instrument, record kind)
/// under a root directory.
///
/// The last written timestamp per file is tracked in memory for the
/// lifetime of the catalog instance; a non-overlap-tolerant write whose
/// batch starts before that watermark is rejected with
/// `CatalogError::Overlap`. Overlap-tolerant writes append freely, so
/// re-fetches over intersecting ranges land as expected.
pub struct CsvCatalog {
    root: PathBuf,
    watermarks: Mutex<HashMap<PathBuf, i64>>,
}

#[derive(Serialize)]
struct BarRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

#[derive(Serialize)]
struct TickRow {
    timestamp: i64,
    price: f64,
    size: f64,
}

#[derive(Serialize)]
struct InstrumentRow<'a> {
    symbol: &'a str,
    venue: &'a str,
    name: &'a str,
    asset_class: &'a str,
    currency: &'a str,
    price_increment: f64,
    multiplier: f64,
}

impl CsvCatalog {
    /// Open a catalog rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            watermarks: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn partition_path(&self, kind: &str, instrument: &InstrumentId) -> PathBuf {
        self.root.join(kind).join(format!("{}.csv", instrument))
    }

    fn append_rows<S: Serialize>(
        path: &Path,
        header: &[&str],
        rows: &[S],
    ) -> Result<(), CatalogError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let fresh = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if fresh {
            writer
                .write_record(header)
                .map_err(|e| CatalogError::Encode(e.to_string()))?;
        }
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| CatalogError::Encode(e.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Enforce the watermark for a timestamped partition, then advance it.
    fn check_and_advance(
        watermarks: &mut HashMap<PathBuf, i64>,
        path: &Path,
        first: i64,
        last: i64,
        overlap_tolerant: bool,
    ) -> Result<(), CatalogError> {
        if let Some(&written) = watermarks.get(path) {
            if !overlap_tolerant && first <= written {
                return Err(CatalogError::Overlap {
                    path: path.display().to_string(),
                    last_written: written,
                    batch_start: first,
                });
            }
        }
        let mark = watermarks.entry(path.to_path_buf()).or_insert(last);
        if last > *mark {
            *mark = last;
        }
        Ok(())
    }

    async fn write_bars(&self, bars: &[Bar], overlap_tolerant: bool) -> Result<(), CatalogError> {
        let mut groups: HashMap<&InstrumentId, Vec<&Bar>> = HashMap::new();
        for bar in bars {
            groups.entry(&bar.instrument).or_default().push(bar);
        }

        let mut watermarks = self.watermarks.lock().await;
        for (instrument, group) in groups {
            let path = self.partition_path("bars", instrument);
            let first = group.first().map(|b| b.timestamp).unwrap_or(0);
            let last = group.last().map(|b| b.timestamp).unwrap_or(0);
            Self::check_and_advance(&mut watermarks, &path, first, last, overlap_tolerant)?;

            let rows: Vec<BarRow> = group
                .iter()
                .map(|b| BarRow {
                    timestamp: b.timestamp,
                    open: b.open,
                    high: b.high,
                    low: b.low,
                    close: b.close,
                    volume: b.volume,
                })
                .collect();
            Self::append_rows(
                &path,
                &["timestamp", "open", "high", "low", "close", "volume"],
                &rows,
            )?;
            debug!(path = %path.display(), rows = rows.len(), "bars appended");
        }
        Ok(())
    }

    async fn write_ticks(&self, ticks: &[Tick], overlap_tolerant: bool) -> Result<(), CatalogError> {
        let mut groups: HashMap<&InstrumentId, Vec<&Tick>> = HashMap::new();
        for tick in ticks {
            groups.entry(&tick.instrument).or_default().push(tick);
        }

        let mut watermarks = self.watermarks.lock().await;
        for (instrument, group) in groups {
            let path = self.partition_path("ticks", instrument);
            let first = group.first().map(|t| t.timestamp).unwrap_or(0);
            let last = group.last().map(|t| t.timestamp).unwrap_or(0);
            Self::check_and_advance(&mut watermarks, &path, first, last, overlap_tolerant)?;

            let rows: Vec<TickRow> = group
                .iter()
                .map(|t| TickRow {
                    timestamp: t.timestamp,
                    price: t.price,
                    size: t.size,
                })
                .collect();
            Self::append_rows(&path, &["timestamp", "price", "size"], &rows)?;
            debug!(path = %path.display(), rows = rows.len(), "ticks appended");
        }
        Ok(())
    }

    async fn write_instruments(&self, defs: &[InstrumentDef]) -> Result<(), CatalogError> {
        // Definitions are not timestamped; rewriting one is harmless.
        let _guard = self.watermarks.lock().await;
        for def in defs {
            let path = self.partition_path("instruments", &def.id);
            let row = InstrumentRow {
                symbol: &def.id.symbol,
                venue: &def.id.venue,
                name: &def.name,
                asset_class: &def.asset_class,
                currency: &def.currency,
                price_increment: def.price_increment,
                multiplier: def.multiplier,
            };
            Self::append_rows(
                &path,
                &[
                    "symbol",
                    "venue",
                    "name",
                    "asset_class",
                    "currency",
                    "price_increment",
                    "multiplier",
                ],
                &[row],
            )?;
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSink for CsvCatalog {
    async fn write(&self, batch: RecordBatch, overlap_tolerant: bool) -> Result<(), CatalogError> {
        match &batch {
            RecordBatch::Bars(bars) => self.write_bars(bars, overlap_tolerant).await,
            RecordBatch::Ticks(ticks) => self.write_ticks(ticks, overlap_tolerant).await,
            RecordBatch::Instruments(defs) => self.write_instruments(defs).await,
        }
    }

    fn name(&self) -> &str {
        "csv-catalog"
    }
}
