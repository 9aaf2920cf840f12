//! Core types and traits for the historical data pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data record types (Bar, Tick, InstrumentDef)
//! - Fetch request/result value objects
//! - The error taxonomy
//! - Boundary traits for the session transport and the catalog sink

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CatalogError, FeedError, FeedResult};
pub use traits::*;
pub use types::*;
