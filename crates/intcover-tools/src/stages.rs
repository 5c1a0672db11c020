//! Named stage measurements: wall time plus RSS before and after.

use crate::memory::{capture_rss_bytes, rss_delta};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct StageMeasurement {
    pub stage: String,
    #[serde(serialize_with = "serialize_millis", rename = "duration_ms")]
    pub duration: Duration,
    pub rss_before_bytes: Option<u64>,
    pub rss_after_bytes: Option<u64>,
    pub rss_delta_bytes: Option<i64>,
}

impl StageMeasurement {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Handle for a stage in progress; pass it back to
/// [`MeasurementRecorder::end_stage`].
#[derive(Debug)]
#[must_use = "an unfinished stage is never recorded"]
pub struct StageToken {
    stage: String,
    started: Instant,
    rss_before_bytes: Option<u64>,
}

impl StageToken {
    pub fn stage(&self) -> &str {
        &self.stage
    }
}

/// Collects stage measurements in completion order.
#[derive(Debug, Default)]
pub struct MeasurementRecorder {
    stages: Vec<StageMeasurement>,
}

impl MeasurementRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_stage(&mut self, stage: &str) -> StageToken {
        StageToken {
            stage: stage.to_string(),
            rss_before_bytes: capture_rss_bytes(stage),
            started: Instant::now(),
        }
    }

    pub fn end_stage(&mut self, token: StageToken) -> &StageMeasurement {
        let duration = token.started.elapsed();
        let rss_after_bytes = capture_rss_bytes(&token.stage);
        let measurement = StageMeasurement {
            rss_delta_bytes: rss_delta(token.rss_before_bytes, rss_after_bytes),
            stage: token.stage,
            duration,
            rss_before_bytes: token.rss_before_bytes,
            rss_after_bytes,
        };
        tracing::debug!(
            component = "tools",
            operation = "end_stage",
            status = "success",
            stage = %measurement.stage,
            duration_ms = measurement.duration_ms(),
            rss_delta_bytes = measurement.rss_delta_bytes,
            "Stage measured"
        );
        self.stages.push(measurement);
        &self.stages[self.stages.len() - 1]
    }

    pub fn stages(&self) -> &[StageMeasurement] {
        &self.stages
    }

    pub fn into_stages(self) -> Vec<StageMeasurement> {
        self.stages
    }

    /// Latest measurement for `stage`.
    pub fn get(&self, stage: &str) -> Option<&StageMeasurement> {
        self.stages.iter().rev().find(|m| m.stage == stage)
    }
}
