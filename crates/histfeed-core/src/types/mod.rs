//! Core data types for the historical data pipeline.

mod instrument;
mod record;
mod request;
mod spec;

pub use instrument::{InstrumentDef, InstrumentId};
pub use record::{Bar, RecordBatch, Tick};
pub use request::{FetchRequest, FetchResult, TimeRange};
pub use spec::{Aggregation, BarSpec, PriceType, TickType};
