use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,

    // Timing (in microseconds)
    total_supply_chain_time_us: AtomicU64,
    total_recipe_time_us: AtomicU64,
    total_lookup_time_us: AtomicU64,

    // Counts
    supply_chains_built: AtomicUsize,
    recipes_generated: AtomicUsize,
    lookups: AtomicUsize,
    nodes_resolved: AtomicUsize,
    nodes_unresolved: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            total_supply_chain_time_us: AtomicU64::new(0),
            total_recipe_time_us: AtomicU64::new(0),
            total_lookup_time_us: AtomicU64::new(0),
            supply_chains_built: AtomicUsize::new(0),
            recipes_generated: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            nodes_resolved: AtomicUsize::new(0),
            nodes_unresolved: AtomicUsize::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_supply_chain(&self, duration: Duration, resolved: usize, unresolved: usize) {
        self.total_supply_chain_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.supply_chains_built.fetch_add(1, Ordering::Relaxed);
        self.nodes_resolved.fetch_add(resolved, Ordering::Relaxed);
        self.nodes_unresolved.fetch_add(unresolved, Ordering::Relaxed);
    }

    pub fn record_recipe(&self, duration: Duration) {
        self.total_recipe_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.recipes_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup(&self, duration: Duration) {
        self.total_lookup_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            avg_supply_chain_time_ms: avg_time_ms(&self.total_supply_chain_time_us, &self.supply_chains_built),
            avg_recipe_time_ms: avg_time_ms(&self.total_recipe_time_us, &self.recipes_generated),
            avg_lookup_time_ms: avg_time_ms(&self.total_lookup_time_us, &self.lookups),
            supply_chains_built: self.supply_chains_built.load(Ordering::Relaxed),
            recipes_generated: self.recipes_generated.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            nodes_resolved: self.nodes_resolved.load(Ordering::Relaxed),
            nodes_unresolved: self.nodes_unresolved.load(Ordering::Relaxed),
        }
    }
}

fn avg_time_ms(total_us: &AtomicU64, count: &AtomicUsize) -> f64 {
    let total = total_us.load(Ordering::Relaxed) as f64;
    let cnt = count.load(Ordering::Relaxed) as f64;
    if cnt > 0.0 {
        total / cnt / 1000.0 // Convert to ms
    } else {
        0.0
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub avg_supply_chain_time_ms: f64,
    pub avg_recipe_time_ms: f64,
    pub avg_lookup_time_ms: f64,
    pub supply_chains_built: usize,
    pub recipes_generated: usize,
    pub lookups: usize,
    pub nodes_resolved: usize,
    pub nodes_unresolved: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
