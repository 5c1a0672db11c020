//! Instrumentation for covering runs: resident memory snapshots and per-stage
//! timing.

pub mod memory;
pub mod stages;

pub use memory::{MemoryError, MemorySnapshot, capture_rss_bytes, rss_delta};
pub use stages::{MeasurementRecorder, StageMeasurement, StageToken};
