//! Session lifecycle management over an injected brokerage transport.

mod manager;
mod sim;

pub use manager::{SessionInfo, SessionManager, SessionState};
pub use sim::SimTransport;
