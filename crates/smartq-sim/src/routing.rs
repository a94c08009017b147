//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Shortest-predicted-wait routing across the four service counters."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::advisory::Advisory;
use crate::counter::{Counter, CounterId, COUNTER_COUNT, MAX_CAPACITY};
use crate::readings::Customer;

/// Outcome of routing one customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub customer_id: u64,
    pub arrival: f64,
    pub start: f64,
    pub end: f64,
    pub wait: f64,
    pub counter: CounterId,
    pub queue_after_join: usize,
    /// Predicted wait of the final counter as computed before any redirect.
    pub predicted_wait: f64,
}

/// A routing result plus the advisory it triggered, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingDecision {
    pub result: RoutingResult,
    pub advisory: Option<Advisory>,
}

/// Ordered results and advisories for a whole customer sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub results: Vec<RoutingResult>,
    pub advisories: Vec<Advisory>,
}

impl SimulationOutcome {
    pub fn suggestions(&self) -> impl Iterator<Item = String> + '_ {
        self.advisories.iter().map(Advisory::suggestion)
    }

    pub fn screen_messages(&self) -> impl Iterator<Item = String> + '_ {
        self.advisories.iter().map(Advisory::screen_message)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Owns the counter state for one simulation run.
///
/// Customers must be fed in arrival order: every decision reads the queue lengths and
/// availability left behind by the customers before it.
#[derive(Debug, Clone)]
pub struct RoutingSimulator {
    counters: [Counter; COUNTER_COUNT],
}

impl Default for RoutingSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingSimulator {
    pub fn new() -> Self {
        Self {
            counters: Counter::fleet(),
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn counter(&self, id: CounterId) -> &Counter {
        &self.counters[id.index()]
    }

    pub fn predicted_waits(&self) -> [f64; COUNTER_COUNT] {
        let mut waits = [0.0; COUNTER_COUNT];
        for (slot, counter) in waits.iter_mut().zip(&self.counters) {
            *slot = counter.predicted_wait();
        }
        waits
    }

    /// Route a single customer and mutate the chosen counter.
    pub fn route(&mut self, customer: &Customer) -> RoutingDecision {
        let predicted = self.predicted_waits();
        let preferred = self.counters[lowest_predicted(&predicted)].id();

        let (chosen, advisory) = if self.counter(preferred).is_full() {
            match self.least_loaded_with_space() {
                Some(alternative) => {
                    info!(
                        customer = customer.id,
                        full = %preferred,
                        target = %alternative,
                        "counter full, redirecting customer"
                    );
                    (
                        alternative,
                        Some(Advisory::redirected(customer.id, preferred, alternative)),
                    )
                }
                None => {
                    warn!(
                        customer = customer.id,
                        counter = %preferred,
                        capacity = MAX_CAPACITY,
                        "all counters full, customer must wait"
                    );
                    (preferred, Some(Advisory::all_full(customer.id, preferred)))
                }
            }
        } else {
            (preferred, None)
        };

        let counter = &mut self.counters[chosen.index()];
        let slot = counter.serve(customer.id, customer.arrival);
        let result = RoutingResult {
            customer_id: customer.id,
            arrival: customer.arrival,
            start: slot.start,
            end: slot.end,
            wait: slot.wait,
            counter: chosen,
            queue_after_join: counter.queue_len(),
            predicted_wait: predicted[chosen.index()],
        };
        debug!(
            customer = customer.id,
            counter = %chosen,
            wait = slot.wait,
            queue = result.queue_after_join,
            "customer routed"
        );

        RoutingDecision { result, advisory }
    }

    /// Route every customer in order, collecting results and advisories.
    pub fn run(&mut self, customers: &[Customer]) -> SimulationOutcome {
        info!(customers = customers.len(), capacity = MAX_CAPACITY, "simulation started");
        let mut outcome = SimulationOutcome {
            results: Vec::with_capacity(customers.len()),
            advisories: Vec::new(),
        };
        for customer in customers {
            let decision = self.route(customer);
            outcome.results.push(decision.result);
            outcome.advisories.extend(decision.advisory);
        }
        info!(
            routed = outcome.results.len(),
            advisories = outcome.advisories.len(),
            "simulation finished"
        );
        outcome
    }

    fn least_loaded_with_space(&self) -> Option<CounterId> {
        self.counters
            .iter()
            .filter(|counter| !counter.is_full())
            .min_by_key(|counter| counter.queue_len())
            .map(Counter::id)
    }
}

/// Index of the smallest predicted wait, first index winning ties.
fn lowest_predicted(predicted: &[f64; COUNTER_COUNT]) -> usize {
    let mut best = 0;
    for (index, wait) in predicted.iter().enumerate().skip(1) {
        if *wait < predicted[best] {
            best = index;
        }
    }
    best
}

/// Route a customer sequence on fresh counters.
pub fn simulate(customers: &[Customer]) -> SimulationOutcome {
    RoutingSimulator::new().run(customers)
}
