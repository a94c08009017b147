//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Waiting-time statistics over routing results."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::routing::RoutingResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitStatistics {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl WaitStatistics {
    /// Returns `None` when there is nothing to summarise.
    pub fn from_results(results: &[RoutingResult]) -> Option<Self> {
        let first = results.first()?.wait;
        let (sum, max, min) = results.iter().fold((0.0, first, first), |(sum, max, min), r| {
            (sum + r.wait, f64::max(max, r.wait), f64::min(min, r.wait))
        });
        Some(Self {
            count: results.len(),
            mean: sum / results.len() as f64,
            max,
            min,
        })
    }
}
