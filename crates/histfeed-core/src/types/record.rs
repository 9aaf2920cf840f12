//! Market data record types retrieved by the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InstrumentDef, InstrumentId};

/// OHLCV bar. Records carry their instrument id so a catalog batch is
/// self-describing once it leaves the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub instrument: InstrumentId,
    /// Unix timestamp in milliseconds (bar open time).
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(
        instrument: InstrumentId,
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            instrument,
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }
}

/// Single trade or quote tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub instrument: InstrumentId,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub price: f64,
    pub size: f64,
}

impl Tick {
    pub fn new(instrument: InstrumentId, timestamp: i64, price: f64, size: f64) -> Self {
        Self {
            instrument,
            timestamp,
            price,
            size,
        }
    }
}

/// Polymorphic batch of records handed to the catalog sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordBatch {
    Bars(Vec<Bar>),
    Ticks(Vec<Tick>),
    Instruments(Vec<InstrumentDef>),
}

impl RecordBatch {
    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        match self {
            RecordBatch::Bars(v) => v.len(),
            RecordBatch::Ticks(v) => v.len(),
            RecordBatch::Instruments(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record kind label used for logging and catalog partitioning.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordBatch::Bars(_) => "bars",
            RecordBatch::Ticks(_) => "ticks",
            RecordBatch::Instruments(_) => "instruments",
        }
    }
}
