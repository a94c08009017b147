//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Service counter state for the routing simulation."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};

pub const COUNTER_COUNT: usize = 4;

/// Fixed service duration per counter, indexed by counter position.
pub const SERVICE_TIMES: [f64; COUNTER_COUNT] = [3.5, 5.0, 4.0, 3.0];

/// Customers a counter accepts before arrivals are redirected elsewhere.
pub const MAX_CAPACITY: usize = 5;

/// Zero-based counter position; displayed one-based as on the shop floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CounterId(usize);

impl CounterId {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < COUNTER_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn number(self) -> usize {
        self.0 + 1
    }

    pub fn all() -> impl Iterator<Item = CounterId> {
        (0..COUNTER_COUNT).map(CounterId)
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Timing of a single service slot handed out by a counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSlot {
    pub wait: f64,
    pub start: f64,
    pub end: f64,
}

/// A single-server FIFO counter.
///
/// `queue` records every customer checked in; it only grows during a run, so its length
/// is the load figure the routing heuristic works from.
#[derive(Debug, Clone)]
pub struct Counter {
    id: CounterId,
    service_time: f64,
    free_at: f64,
    queue: Vec<u64>,
}

impl Counter {
    pub fn new(id: CounterId) -> Self {
        Self {
            id,
            service_time: SERVICE_TIMES[id.index()],
            free_at: 0.0,
            queue: Vec::new(),
        }
    }

    /// One idle counter per position, in index order.
    pub fn fleet() -> [Counter; COUNTER_COUNT] {
        std::array::from_fn(|index| Counter::new(CounterId(index)))
    }

    pub fn id(&self) -> CounterId {
        self.id
    }

    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    pub fn free_at(&self) -> f64 {
        self.free_at
    }

    pub fn queue(&self) -> &[u64] {
        &self.queue
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_full(&self) -> bool {
        self.queue.len() >= MAX_CAPACITY
    }

    /// Queue length times service time. A load proxy, not the busy-until horizon.
    pub fn predicted_wait(&self) -> f64 {
        self.queue.len() as f64 * self.service_time
    }

    /// Check a customer in and book the next service slot.
    pub fn serve(&mut self, customer_id: u64, arrival: f64) -> ServiceSlot {
        let wait = (self.free_at - arrival).max(0.0);
        let start = arrival + wait;
        let end = start + self.service_time;
        self.queue.push(customer_id);
        self.free_at = end;
        ServiceSlot { wait, start, end }
    }
}
