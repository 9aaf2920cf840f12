//! Fetch orchestration: admission control, session gating, catalog writes.

mod orchestrator;

pub use orchestrator::FetchOrchestrator;
