mod logging;
mod observer;
mod report;

use clap::{Parser, ValueEnum};
use intcover_core::{ExperimentParams, run_experiment};
use intcover_highs::{HighsEngine, highs_version};
use intcover_lp::{LpEngine, SolverConfig};
use observer::RecordingObserver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use report::{RunReport, render_json, render_table};

#[derive(Parser, Debug)]
#[command(
    name = "intcover",
    author,
    version,
    about = "Interval set cover: greedy optimum vs. LP relaxation with randomized rounding"
)]
struct Cli {
    /// First point of the universe
    #[arg(long, default_value_t = 0)]
    start: i64,

    /// Last point of the universe
    #[arg(long, default_value_t = 100_000)]
    end: i64,

    /// Number of subsets to generate
    #[arg(long, default_value_t = 1_000)]
    subsets: i64,

    /// Randomized rounding trials
    #[arg(long, default_value_t = 50)]
    trials: usize,

    /// Seed for generation and rounding (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// LP solver time limit in seconds
    #[arg(long, value_parser = parse_seconds)]
    time_limit: Option<f64>,

    /// LP solver thread count
    #[arg(long)]
    threads: Option<u32>,

    /// Skip the LP solver's presolve
    #[arg(long)]
    no_presolve: bool,

    /// LP primal and dual feasibility tolerance
    #[arg(long, value_parser = parse_tolerance)]
    tolerance: Option<f64>,

    /// Forward solver output to the console
    #[arg(long)]
    solver_log: bool,

    /// Log filter, overrides INTCOVER_TRACE (e.g. "debug", "intcover_core=trace")
    #[arg(long)]
    log_level: Option<String>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    fn params(&self) -> ExperimentParams {
        ExperimentParams {
            start: self.start,
            end: self.end,
            num_subsets: self.subsets,
            trials: self.trials,
        }
    }

    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::new().with_log_to_console(self.solver_log);
        if let Some(seconds) = self.time_limit {
            config = config.with_time_limit(seconds);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if self.no_presolve {
            config = config.with_presolve(false);
        }
        if let Some(tolerance) = self.tolerance {
            config = config.with_tolerance(tolerance);
        }
        config
    }
}

fn parse_seconds(raw: &str) -> Result<f64, String> {
    let seconds = raw.parse::<f64>().map_err(|err| err.to_string())?;
    if seconds.is_nan() || seconds < 0.0 {
        return Err(format!("expected a non-negative number of seconds, got {raw}"));
    }
    Ok(seconds)
}

fn parse_tolerance(raw: &str) -> Result<f64, String> {
    let tolerance = raw.parse::<f64>().map_err(|err| err.to_string())?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(format!("expected a positive finite tolerance, got {raw}"));
    }
    Ok(tolerance)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = HighsEngine::with_config(cli.solver_config());
    let mut observer = RecordingObserver::new();

    tracing::info!(
        component = "cli",
        operation = "run",
        status = "start",
        start = cli.start,
        end = cli.end,
        subsets = cli.subsets,
        trials = cli.trials,
        seed,
        "Starting experiment"
    );
    let experiment = run_experiment(&cli.params(), &mut engine, &mut rng, &mut observer)?;

    let report = RunReport {
        seed,
        engine: engine.name().to_string(),
        engine_version: highs_version(),
        experiment,
        stages: observer.into_measurements(),
    };
    match cli.format {
        OutputFormat::Table => print!("{}", render_table(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_follow_reference_run() {
        let cli = Cli::try_parse_from(["intcover"]).unwrap();
        assert_eq!(cli.params(), ExperimentParams::default());
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.seed.is_none());
        assert_eq!(cli.solver_config(), SolverConfig::new().with_log_to_console(false));
    }

    #[test]
    fn solver_flags_reach_config() {
        let cli = Cli::try_parse_from([
            "intcover",
            "--time-limit",
            "2.5",
            "--threads",
            "4",
            "--format",
            "json",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(
            cli.solver_config(),
            SolverConfig::new()
                .with_log_to_console(false)
                .with_time_limit(2.5)
                .with_threads(4)
        );
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn presolve_and_tolerance_flags() {
        let cli =
            Cli::try_parse_from(["intcover", "--no-presolve", "--tolerance", "1e-8"]).unwrap();
        assert_eq!(
            cli.solver_config(),
            SolverConfig::new()
                .with_log_to_console(false)
                .with_presolve(false)
                .with_tolerance(1e-8)
        );
    }

    #[test]
    fn out_of_range_solver_values_are_rejected() {
        for args in [
            ["intcover", "--time-limit=-1"],
            ["intcover", "--time-limit=NaN"],
            ["intcover", "--time-limit=soon"],
            ["intcover", "--tolerance=0"],
            ["intcover", "--tolerance=inf"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{args:?}");
        }
        let cli = Cli::try_parse_from(["intcover", "--time-limit=0"]).unwrap();
        assert!(cli.solver_config().validate().is_ok());
    }

    #[test]
    fn small_run_renders_both_formats() {
        let cli = Cli::try_parse_from([
            "intcover", "--end", "500", "--subsets", "10", "--trials", "3", "--seed", "1",
        ])
        .unwrap();
        let mut engine = HighsEngine::with_config(cli.solver_config());
        let mut observer = RecordingObserver::new();
        let experiment = run_experiment(
            &cli.params(),
            &mut engine,
            &mut StdRng::seed_from_u64(1),
            &mut observer,
        )
        .unwrap();
        let report = RunReport {
            seed: 1,
            engine: engine.name().to_string(),
            engine_version: highs_version(),
            experiment,
            stages: observer.into_measurements(),
        };
        assert_eq!(report.stages.len(), 4);
        assert!(render_table(&report).contains("greedy"));
        assert!(render_json(&report).unwrap().contains("\"approximation_ratio\""));
    }
}
