//! ---
//! sq_section: "01-core-functionality"
//! sq_subsection: "binary"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Binary entrypoint for the SmartQ queue routing simulation."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::fmt::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use smartq_common::config::AppConfig;
use smartq_common::logging::{init_tracing, LogFormat};
use smartq_common::NegativeDeltaPolicy;
use smartq_sim::{load_readings, run_pipeline, PipelineSummary};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Reconstruct customer arrivals from people-counter sensors and route them across four counters",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Sensor CSV to ingest (overrides input.path)")]
    input: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory for the report files")]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "How to treat a sensor count that goes backwards")]
    negative_deltas: Option<CliNegativeDeltas>,

    #[arg(long, value_enum, help = "Override the console log format")]
    log_format: Option<CliLogFormat>,

    #[arg(long, default_value_t = 3, help = "Number of routing results to print")]
    preview: usize,

    #[arg(short, long, help = "Skip the console report; only write files")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNegativeDeltas {
    Reject,
    Ignore,
}

impl From<CliNegativeDeltas> for NegativeDeltaPolicy {
    fn from(value: CliNegativeDeltas) -> Self {
        match value {
            CliNegativeDeltas::Reject => NegativeDeltaPolicy::Reject,
            CliNegativeDeltas::Ignore => NegativeDeltaPolicy::Ignore,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Pretty,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(value: CliLogFormat) -> Self {
        match value {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Json => LogFormat::StructuredJson,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = AppConfig::load_with_source(cli.config.as_deref())?;
    let mut config = loaded.config;
    apply_overrides(&cli, &mut config);
    config.validate()?;

    init_tracing("smartq", &config.logging)?;
    info!(
        config = ?loaded.source,
        input = %config.input.path.display(),
        policy = ?config.arrivals.negative_deltas,
        "smartq starting"
    );

    let readings = match load_readings(&config.input.path) {
        Ok(readings) => readings,
        Err(err) if err.is_no_input() => {
            warn!(error = %err, "no sensor data, nothing to simulate");
            eprintln!("{}", err);
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to ingest {}", config.input.path.display())
            })
        }
    };

    let summary = run_pipeline(&readings, config.arrivals.negative_deltas)?;
    if !cli.quiet {
        print!("{}", render_report(&summary, cli.preview)?);
    }

    let reports = summary
        .exporter()
        .export_all(&config.output)
        .with_context(|| format!("failed to write reports to {}", config.output.directory.display()))?;
    if !cli.quiet {
        println!(
            "Saved {}, {}, {}",
            reports.results.display(),
            reports.suggestions.display(),
            reports.screen_messages.display()
        );
    }
    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(input) = &cli.input {
        config.input.path = input.clone();
    }
    if let Some(directory) = &cli.output_dir {
        config.output.directory = directory.clone();
    }
    if let Some(policy) = cli.negative_deltas {
        config.arrivals.negative_deltas = policy.into();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }
}

fn render_report(summary: &PipelineSummary, preview: usize) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "=== SMART 4-COUNTER QUEUE SYSTEM ===")?;
    writeln!(out, "Customers: {}", summary.customers.len())?;

    writeln!(out, "\n=== FIRST {} RESULTS ===", preview)?;
    for result in summary.outcome.results.iter().take(preview) {
        writeln!(
            out,
            "Customer {} -> Counter {} | arrival {:.2} start {:.2} end {:.2} wait {:.2} | queue {} predicted {:.2}",
            result.customer_id,
            result.counter,
            result.arrival,
            result.start,
            result.end,
            result.wait,
            result.queue_after_join,
            result.predicted_wait
        )?;
    }

    writeln!(out, "\n=== WAITING TIME STATISTICS ===")?;
    match &summary.statistics {
        Some(stats) => {
            writeln!(out, "Average wait: {:.2}", stats.mean)?;
            writeln!(out, "Max wait: {:.2}", stats.max)?;
            writeln!(out, "Min wait: {:.2}", stats.min)?;
        }
        None => writeln!(out, "No customers were routed.")?,
    }

    writeln!(out, "\n=== SMART SUGGESTIONS ===")?;
    for line in summary.outcome.suggestions() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "\n=== DISPLAY SCREEN MESSAGES ===")?;
    for line in summary.outcome.screen_messages() {
        writeln!(out, "{}", line)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartq_sim::SensorReading;

    fn base_cli() -> Cli {
        Cli {
            config: None,
            input: None,
            output_dir: None,
            negative_deltas: None,
            log_format: None,
            preview: 3,
            quiet: false,
        }
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut cli = base_cli();
        cli.input = Some(PathBuf::from("data/in.csv"));
        cli.output_dir = Some(PathBuf::from("out"));
        cli.negative_deltas = Some(CliNegativeDeltas::Ignore);
        cli.log_format = Some(CliLogFormat::Json);

        let mut config = AppConfig::default();
        apply_overrides(&cli, &mut config);
        assert_eq!(config.input.path, PathBuf::from("data/in.csv"));
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.arrivals.negative_deltas, NegativeDeltaPolicy::Ignore);
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
    }

    #[test]
    fn no_overrides_keep_defaults() {
        let mut config = AppConfig::default();
        apply_overrides(&base_cli(), &mut config);
        assert_eq!(config.input.path, PathBuf::from("sensor.csv"));
        assert_eq!(config.arrivals.negative_deltas, NegativeDeltaPolicy::Reject);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "smartq",
            "--input",
            "s.csv",
            "--negative-deltas",
            "ignore",
            "--preview",
            "5",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("s.csv")));
        assert!(matches!(cli.negative_deltas, Some(CliNegativeDeltas::Ignore)));
        assert_eq!(cli.preview, 5);
        assert!(cli.quiet);
    }

    #[test]
    fn report_lists_statistics_and_messages() {
        let readings = [
            SensorReading::new(0.0, [0, 0, 0, 0]),
            SensorReading::new(1.0, [6, 5, 5, 5]),
        ];
        let summary = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap();
        let report = render_report(&summary, 2).unwrap();

        assert!(report.contains("Customers: 21"));
        assert!(report.contains("Customer 1 -> Counter 1 |"));
        assert!(report.contains("Customer 2 -> Counter 2 |"));
        assert!(!report.contains("Customer 3 -> Counter"));
        assert!(report.contains("Min wait: 0.00"));
        assert!(report.contains("ALL counters FULL! Customer 21 must wait."));
        assert!(report.contains("Counter 3 has space, please move."));
    }

    #[test]
    fn report_handles_zero_customers() {
        let readings = [SensorReading::new(0.0, [0, 0, 0, 0])];
        let summary = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap();
        let report = render_report(&summary, 3).unwrap();
        assert!(report.contains("No customers were routed."));
    }
}
