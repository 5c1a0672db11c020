//! Bridges experiment stage hooks to the measurement recorder.

use intcover_core::{Stage, StageObserver};
use intcover_tools::{MeasurementRecorder, StageMeasurement, StageToken};

#[derive(Debug, Default)]
pub struct RecordingObserver {
    recorder: MeasurementRecorder,
    open: Option<StageToken>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_measurements(self) -> Vec<StageMeasurement> {
        self.recorder.into_stages()
    }
}

impl StageObserver for RecordingObserver {
    fn begin(&mut self, stage: Stage) {
        self.open = Some(self.recorder.begin_stage(stage.as_str()));
    }

    fn end(&mut self, stage: Stage) {
        match self.open.take() {
            Some(token) if token.stage() == stage.as_str() => {
                self.recorder.end_stage(token);
            }
            other => tracing::warn!(
                component = "cli",
                operation = "end_stage",
                status = "warn",
                stage = stage.as_str(),
                open = other.as_ref().map(StageToken::stage),
                "Stage ended without a matching begin"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_matched_stages_only() {
        let mut observer = RecordingObserver::new();
        observer.begin(Stage::Generate);
        observer.end(Stage::Generate);
        observer.end(Stage::Greedy);
        observer.begin(Stage::Rounding);
        observer.end(Stage::Rounding);

        let stages: Vec<_> = observer
            .into_measurements()
            .into_iter()
            .map(|m| m.stage)
            .collect();
        assert_eq!(stages, ["generate", "rounding"]);
    }
}
