//! Catalog sink trait definition.

use crate::error::CatalogError;
use crate::types::RecordBatch;
use async_trait::async_trait;

/// Trait for durable columnar/append-friendly storage of fetched records.
///
/// Implementations must tolerate concurrent, possibly overlapping writes.
/// The orchestrator only calls `write` with non-empty batches.
#[async_trait]
pub trait CatalogSink: Send + Sync {
    /// Persist a batch of records.
    ///
    /// With `overlap_tolerant` set, batches whose time ranges intersect
    /// previously written data are accepted — successive fetches over
    /// intersecting ranges (e.g. backfills) are an expected pattern, not
    /// duplicates to reject.
    async fn write(&self, batch: RecordBatch, overlap_tolerant: bool) -> Result<(), CatalogError>;

    /// Get the sink name.
    fn name(&self) -> &str;
}
