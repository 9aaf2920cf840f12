//! Session transport trait definition.

use crate::error::FeedError;
use crate::types::{Bar, BarSpec, InstrumentDef, InstrumentId, Tick, TickType};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use std::time::Duration;

/// Trait for the underlying brokerage session.
///
/// The concrete transport is injected so the session manager and the fetch
/// orchestrator can be exercised against a fake without a live connection.
/// Implementations own their own shutdown; there is deliberately no `close`
/// method here — `SessionManager::disconnect` only drops the logical
/// session, and the transport may be reused for a later `connect`.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Perform the session handshake. Any error here is normalized by the
    /// session manager into `FeedError::ConnectionFailed`.
    async fn connect(&self) -> Result<(), FeedError>;

    /// Account identifier, if the session exposes one.
    fn account_id(&self) -> Option<String> {
        None
    }

    /// Protocol/server version, if the session exposes one.
    fn server_version(&self) -> Option<String> {
        None
    }

    /// Fetch historical bars for `instruments` over `[start, end)`.
    ///
    /// Timestamps are naive local datetimes interpreted in `tz`. Bars are
    /// returned oldest-first across all requested instruments.
    #[allow(clippy::too_many_arguments)]
    async fn request_bars(
        &self,
        spec: &BarSpec,
        start: NaiveDateTime,
        end: NaiveDateTime,
        tz: Tz,
        instruments: &[InstrumentId],
        use_rth: bool,
        timeout: Duration,
    ) -> Result<Vec<Bar>, FeedError>;

    /// Fetch historical ticks for `instruments` over `[start, end)`.
    #[allow(clippy::too_many_arguments)]
    async fn request_ticks(
        &self,
        tick_type: TickType,
        start: NaiveDateTime,
        end: NaiveDateTime,
        tz: Tz,
        instruments: &[InstrumentId],
        use_rth: bool,
        timeout: Duration,
    ) -> Result<Vec<Tick>, FeedError>;

    /// Fetch instrument definitions.
    async fn request_instruments(
        &self,
        instruments: &[InstrumentId],
    ) -> Result<Vec<InstrumentDef>, FeedError>;

    /// Get the transport name.
    fn name(&self) -> &str;
}
