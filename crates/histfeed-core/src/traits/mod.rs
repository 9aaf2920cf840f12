//! Boundary traits for the historical data pipeline.

mod sink;
mod transport;

pub use sink::CatalogSink;
pub use transport::SessionTransport;
