//! Session lifecycle manager.

use chrono::{DateTime, Utc};
use histfeed_core::error::{FeedError, FeedResult};
use histfeed_core::traits::SessionTransport;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sentinel for session metadata the transport does not expose.
const UNKNOWN: &str = "N/A";

/// Metadata captured when a session reaches `Connected`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub account_id: String,
    pub server_version: String,
    pub connected_at: DateTime<Utc>,
}

/// Lifecycle state of the wrapped session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected(SessionInfo),
}

/// Owns the connect/disconnect lifecycle of one brokerage session.
///
/// `connect` and `disconnect` are not designed to be called concurrently
/// with each other on the same instance; `is_connected` may be read from
/// any task.
pub struct SessionManager {
    transport: Arc<dyn SessionTransport>,
    state: Mutex<SessionState>,
    stabilization: Duration,
}

impl SessionManager {
    /// Wrap a transport. The session starts `Disconnected`.
    pub fn new(transport: Arc<dyn SessionTransport>) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState::Disconnected),
            stabilization: Duration::from_millis(500),
        }
    }

    /// Override the post-handshake stabilization delay.
    pub fn with_stabilization(mut self, stabilization: Duration) -> Self {
        self.stabilization = stabilization;
        self
    }

    /// Establish the session.
    ///
    /// Runs the transport handshake under `timeout`, then waits a short
    /// stabilization delay — the transport may report connected slightly
    /// before it can actually serve requests. Every failure mode (timeout,
    /// refusal, any other handshake error) is normalized into
    /// `FeedError::ConnectionFailed` and the state returns to
    /// `Disconnected`.
    pub async fn connect(&self, timeout: Duration) -> FeedResult<SessionInfo> {
        *self.state.lock().unwrap() = SessionState::Connecting;
        debug!(transport = self.transport.name(), "connecting session");

        let handshake = tokio::time::timeout(timeout, self.transport.connect()).await;
        let cause = match handshake {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some(format!("handshake timed out after {:?}", timeout)),
        };
        if let Some(cause) = cause {
            *self.state.lock().unwrap() = SessionState::Disconnected;
            warn!(transport = self.transport.name(), %cause, "session connect failed");
            return Err(FeedError::ConnectionFailed(cause));
        }

        tokio::time::sleep(self.stabilization).await;

        let session = SessionInfo {
            account_id: self
                .transport
                .account_id()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            server_version: self
                .transport
                .server_version()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            connected_at: Utc::now(),
        };
        *self.state.lock().unwrap() = SessionState::Connected(session.clone());
        info!(
            transport = self.transport.name(),
            account = %session.account_id,
            server_version = %session.server_version,
            "session connected"
        );
        Ok(session)
    }

    /// Drop the logical session. Idempotent: disconnecting while already
    /// `Disconnected` is a no-op. The transport itself is not closed and
    /// may be reused for a later `connect`.
    pub fn disconnect(&self) {
        let mut state = self.state.lock().unwrap();
        if *state == SessionState::Disconnected {
            debug!("disconnect on an already disconnected session");
            return;
        }
        *state = SessionState::Disconnected;
        info!(transport = self.transport.name(), "session disconnected");
    }

    /// Whether the session is currently usable for requests.
    pub fn is_connected(&self) -> bool {
        matches!(*self.state.lock().unwrap(), SessionState::Connected(_))
    }

    /// Metadata of the current session, if connected.
    pub fn session_info(&self) -> Option<SessionInfo> {
        match &*self.state.lock().unwrap() {
            SessionState::Connected(info) => Some(info.clone()),
            _ => None,
        }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &Arc<dyn SessionTransport> {
        &self.transport
    }
}
