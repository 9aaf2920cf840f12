//! Fetch orchestrator.

use histfeed_core::error::{FeedError, FeedResult};
use histfeed_core::traits::CatalogSink;
use histfeed_core::types::{
    Bar, BarSpec, FetchRequest, FetchResult, InstrumentDef, InstrumentId, RecordBatch, Tick,
    TickType,
};
use histfeed_limiter::RequestPacer;
use histfeed_session::SessionManager;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Turns a `FetchRequest` into a `FetchResult`.
///
/// Each logical fetch takes exactly one admission slot (not one per
/// record), requires an active session before any side effect, and writes
/// non-empty results to the catalog sink. Transport errors propagate
/// unwrapped; retry policy belongs to the caller.
pub struct FetchOrchestrator {
    session: Arc<SessionManager>,
    pacer: Arc<RequestPacer>,
    sink: Arc<dyn CatalogSink>,
    request_timeout: Duration,
}

impl FetchOrchestrator {
    pub fn new(
        session: Arc<SessionManager>,
        pacer: Arc<RequestPacer>,
        sink: Arc<dyn CatalogSink>,
    ) -> Self {
        Self {
            session,
            pacer,
            sink,
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Override the per-call transport timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Fetch historical bars and persist any non-empty result.
    pub async fn fetch_bars(
        &self,
        request: &FetchRequest,
        spec: &BarSpec,
    ) -> FeedResult<FetchResult<Bar>> {
        self.ensure_connected()?;
        if request.instruments.is_empty() {
            debug!("bar fetch with no instruments, skipping");
            return Ok(FetchResult::empty());
        }

        self.pacer.acquire().await;

        let (start, end) = request.range.to_naive(request.timezone);
        let bars = self
            .session
            .transport()
            .request_bars(
                spec,
                start,
                end,
                request.timezone,
                &request.instruments,
                request.use_rth,
                self.request_timeout,
            )
            .await?;

        if !bars.is_empty() {
            self.sink.write(RecordBatch::Bars(bars.clone()), true).await?;
        }
        info!(
            count = bars.len(),
            spec = %spec,
            instruments = request.instruments.len(),
            "bars fetched"
        );
        Ok(FetchResult::new(bars))
    }

    /// Fetch historical ticks and persist any non-empty result.
    pub async fn fetch_ticks(
        &self,
        request: &FetchRequest,
        tick_type: TickType,
    ) -> FeedResult<FetchResult<Tick>> {
        self.ensure_connected()?;
        if request.instruments.is_empty() {
            debug!("tick fetch with no instruments, skipping");
            return Ok(FetchResult::empty());
        }

        self.pacer.acquire().await;

        let (start, end) = request.range.to_naive(request.timezone);
        let ticks = self
            .session
            .transport()
            .request_ticks(
                tick_type,
                start,
                end,
                request.timezone,
                &request.instruments,
                request.use_rth,
                self.request_timeout,
            )
            .await?;

        if !ticks.is_empty() {
            self.sink
                .write(RecordBatch::Ticks(ticks.clone()), true)
                .await?;
        }
        info!(
            count = ticks.len(),
            tick_type = %tick_type,
            instruments = request.instruments.len(),
            "ticks fetched"
        );
        Ok(FetchResult::new(ticks))
    }

    /// Fetch instrument definitions and persist any non-empty result.
    pub async fn fetch_instruments(
        &self,
        instruments: &[InstrumentId],
    ) -> FeedResult<FetchResult<InstrumentDef>> {
        self.ensure_connected()?;
        if instruments.is_empty() {
            debug!("instrument fetch with no references, skipping");
            return Ok(FetchResult::empty());
        }

        self.pacer.acquire().await;

        let defs = self
            .session
            .transport()
            .request_instruments(instruments)
            .await?;

        if !defs.is_empty() {
            self.sink
                .write(RecordBatch::Instruments(defs.clone()), true)
                .await?;
        }
        info!(count = defs.len(), "instrument definitions fetched");
        Ok(FetchResult::new(defs))
    }

    /// Raised before any network or rate-limiter side effect, so a failed
    /// precondition never consumes an admission slot.
    fn ensure_connected(&self) -> FeedResult<()> {
        if !self.session.is_connected() {
            return Err(FeedError::NotConnected);
        }
        Ok(())
    }
}
