//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "01-bootstrap"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Simulation module exports and the end-to-end pipeline."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
//! Arrival reconstruction and counter routing for SmartQ.
//!
//! Readings flow through [`arrivals`] into customers, customers through [`routing`] into
//! results and advisories. [`ingest`] and [`reports`] are the flat-file edges.

pub mod advisory;
pub mod arrivals;
pub mod counter;
pub mod errors;
pub mod ingest;
pub mod readings;
pub mod reports;
pub mod routing;
pub mod stats;

use smartq_common::NegativeDeltaPolicy;

pub use advisory::{Advisory, AdvisoryKind};
pub use arrivals::{reconstruct_arrivals, ArrivalReconstructor};
pub use counter::{Counter, CounterId, COUNTER_COUNT, MAX_CAPACITY, SERVICE_TIMES};
pub use errors::{ArrivalError, IngestError, ReportError, Result, SmartQError};
pub use ingest::{load_readings, read_readings};
pub use readings::{Customer, SensorReading, SENSOR_COUNT};
pub use reports::{ExportedReports, ReportExporter};
pub use routing::{simulate, RoutingDecision, RoutingResult, RoutingSimulator, SimulationOutcome};
pub use stats::WaitStatistics;

/// Everything produced by one pass over a batch of readings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineSummary {
    pub customers: Vec<Customer>,
    pub outcome: SimulationOutcome,
    pub statistics: Option<WaitStatistics>,
}

impl PipelineSummary {
    pub fn exporter(&self) -> ReportExporter<'_> {
        ReportExporter::new(&self.outcome)
    }
}

/// Reconstruct arrivals and route them on fresh counters.
pub fn run_pipeline(
    readings: &[SensorReading],
    policy: NegativeDeltaPolicy,
) -> Result<PipelineSummary> {
    let customers = reconstruct_arrivals(readings, policy)?;
    let outcome = simulate(&customers);
    let statistics = WaitStatistics::from_results(&outcome.results);
    Ok(PipelineSummary {
        customers,
        outcome,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_runs_both_stages() {
        let readings = [
            SensorReading::new(0.0, [0, 0, 0, 0]),
            SensorReading::new(1.0, [2, 0, 0, 0]),
        ];
        let summary = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap();
        assert_eq!(summary.customers.len(), 2);
        assert_eq!(summary.outcome.results.len(), 2);
        assert_eq!(summary.statistics.map(|s| s.max), Some(0.0));
    }

    #[test]
    fn pipeline_surfaces_negative_delta() {
        let readings = [
            SensorReading::new(0.0, [3, 0, 0, 0]),
            SensorReading::new(1.0, [1, 0, 0, 0]),
        ];
        let err = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap_err();
        assert!(matches!(err, SmartQError::Arrival(_)));
    }
}
