//! Table and JSON rendering of an experiment run.

use intcover_core::ExperimentReport;
use intcover_tools::StageMeasurement;
use serde::Serialize;
use std::fmt::Write;

/// Everything the binary prints for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub engine: String,
    pub engine_version: Option<String>,
    pub experiment: ExperimentReport,
    pub stages: Vec<StageMeasurement>,
}

pub fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn render_table(report: &RunReport) -> String {
    let exp = &report.experiment;
    let mut out = String::new();
    let engine = match &report.engine_version {
        Some(version) => format!("{} {}", report.engine, version),
        None => report.engine.clone(),
    };

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{:<22} {}", "universe", exp.universe);
    let _ = writeln!(out, "{:<22} {}", "subsets requested", exp.num_subsets);
    let _ = writeln!(out, "{:<22} {}", "family size", exp.family_size);
    let _ = writeln!(out, "{:<22} {}", "seed", report.seed);
    let _ = writeln!(out, "{:<22} {}", "engine", engine);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<22} {:>10} {:>12}",
        "method", "size", "elapsed_ms"
    );
    let _ = writeln!(
        out,
        "{:<22} {:>10} {:>12.3}",
        "greedy", exp.greedy_size, exp.greedy_ms
    );
    let _ = writeln!(
        out,
        "{:<22} {:>10.3} {:>12.3}",
        "lp relaxation",
        exp.lp_objective,
        exp.lp_build_ms + exp.lp_solve_ms
    );
    let _ = writeln!(
        out,
        "{:<22} {:>10.3} {:>12.3}",
        format!("rounding (n={})", exp.rounding.trials),
        exp.rounding.mean_size,
        exp.rounding_ms
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<22} {} (build {:.3} ms, solve {:.3} ms, {} rows)",
        "lp status", exp.lp_status, exp.lp_build_ms, exp.lp_solve_ms, exp.lp_constraints
    );
    let _ = writeln!(
        out,
        "{:<22} min {} / max {} / {} rounds",
        "rounded sizes", exp.rounding.min_size, exp.rounding.max_size, exp.rounding.total_rounds
    );
    let _ = writeln!(
        out,
        "{:<22} {:.4}",
        "approximation ratio", exp.approximation_ratio
    );

    if !report.stages.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<16} {:>12} {:>14} {:>14}",
            "stage", "duration_ms", "rss_after_mb", "rss_delta_mb"
        );
        for stage in &report.stages {
            let _ = writeln!(
                out,
                "{:<16} {:>12.3} {:>14} {:>14}",
                stage.stage,
                stage.duration_ms(),
                format_option_mb_u64(stage.rss_after_bytes),
                format_option_mb_i64(stage.rss_delta_bytes),
            );
        }
    }
    out
}

fn format_option_mb_u64(value: Option<u64>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |bytes| format!("{:.3}", bytes as f64 / (1024.0 * 1024.0)),
    )
}

fn format_option_mb_i64(value: Option<i64>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |bytes| format!("{:.3}", bytes as f64 / (1024.0 * 1024.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcover_core::{Interval, TrialSummary};
    use std::time::Duration;

    fn sample_report() -> RunReport {
        RunReport {
            seed: 7,
            engine: "highs".to_string(),
            engine_version: Some("1.8.0".to_string()),
            experiment: ExperimentReport {
                universe: Interval::new(0, 100).unwrap(),
                num_subsets: 10,
                family_size: 12,
                greedy_size: 4,
                greedy_ms: 0.1,
                lp_status: "optimal".to_string(),
                lp_objective: 4.0,
                lp_constraints: 101,
                lp_build_ms: 0.5,
                lp_solve_ms: 1.5,
                rounding: TrialSummary {
                    trials: 2,
                    sizes: vec![5, 6],
                    mean_size: 5.5,
                    min_size: 5,
                    max_size: 6,
                    total_rounds: 3,
                },
                rounding_ms: 0.2,
                approximation_ratio: 1.375,
            },
            stages: vec![StageMeasurement {
                stage: "greedy".to_string(),
                duration: Duration::from_millis(1500),
                rss_before_bytes: Some(1 << 20),
                rss_after_bytes: Some(3 << 20),
                rss_delta_bytes: Some(2 << 20),
            }],
        }
    }

    #[test]
    fn table_lists_every_method() {
        let table = render_table(&sample_report());
        assert!(table.contains("[0, 100]"));
        assert!(table.contains("highs 1.8.0"));
        assert!(table.contains("rounding (n=2)"));
        assert!(table.contains("1.3750"));
        assert!(table.contains("2.000"));
    }

    #[test]
    fn json_nests_experiment_and_stages() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&sample_report()).unwrap()).unwrap();
        assert_eq!(json["experiment"]["greedy_size"], 4);
        assert_eq!(json["experiment"]["rounding"]["sizes"], serde_json::json!([5, 6]));
        assert_eq!(json["stages"][0]["stage"], "greedy");
        assert_eq!(json["stages"][0]["duration_ms"], 1500.0);
    }

    #[test]
    fn missing_memory_renders_dash() {
        assert_eq!(format_option_mb_u64(None), "-");
        assert_eq!(format_option_mb_i64(Some(-(1 << 20))), "-1.000");
    }
}
