//! Sliding-window admission control for outbound session requests.

mod pacer;

pub use pacer::RequestPacer;
