//! The Refresh Simulator — stands in for a live data feed.
//!
//! Two states: Idle (no periodic tick scheduled) and Running. While
//! Running, every tick flags `is_refreshing`, waits a simulated
//! latency, then replaces the store with a perturbed clone of the
//! snapshot current at completion time.
//!
//! Documented choice: `stop()` cancels the *next* tick but an
//! in-flight latency completion still applies. Two staggered
//! completions may also land in either order; the perturbation is
//! independent per field and clamped at zero, so ordering changes the
//! values but never the validity of the snapshot.

use crate::{
    model::{Customer, MonthlyStat, Product},
    rng::DashRng,
    schedule::{Scheduler, TaskHandle},
    store::EntityStore,
    types::Millis,
};

pub const DEFAULT_INTERVAL_MS: Millis = 5_000;
pub const DEFAULT_LATENCY_MS: Millis = 500;

// Per-field jitter bounds, matching the upstream feed's variation.
const REVENUE_JITTER: i64 = 100;
const PROFIT_JITTER: i64 = 50;
const SALES_JITTER: i64 = 5;
const CUSTOMERS_JITTER: i64 = 3;
const SPEND_JITTER: i64 = 25;
const STOCK_JITTER: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTask {
    /// Periodic timer fired: begin a refresh cycle.
    Tick,
    /// Simulated latency elapsed: apply the perturbation.
    Complete,
}

pub struct RefreshSimulator {
    interval_ms: Millis,
    latency_ms: Millis,
    rng: DashRng,
    running: bool,
    pending_tick: Option<TaskHandle>,
    pub is_refreshing: bool,
    pub refresh_count: u64,
    /// Virtual-clock time of the last completed refresh.
    pub last_refresh: Option<Millis>,
}

impl RefreshSimulator {
    pub fn new(rng: DashRng) -> Self {
        Self::with_timing(rng, DEFAULT_INTERVAL_MS, DEFAULT_LATENCY_MS)
    }

    pub fn with_timing(rng: DashRng, interval_ms: Millis, latency_ms: Millis) -> Self {
        Self {
            interval_ms,
            latency_ms,
            rng,
            running: false,
            pending_tick: None,
            is_refreshing: false,
            refresh_count: 0,
            last_refresh: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Idle -> Running: arm the periodic tick. No-op when already
    /// Running.
    pub fn start(&mut self, sched: &mut Scheduler<RefreshTask>) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending_tick = Some(sched.schedule(self.interval_ms, RefreshTask::Tick));
        log::debug!("refresh: started, interval={}ms", self.interval_ms);
    }

    /// Running -> Idle: cancel the next tick. An already-fired tick's
    /// pending completion is left alone and will still apply.
    pub fn stop(&mut self, sched: &mut Scheduler<RefreshTask>) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(handle) = self.pending_tick.take() {
            sched.cancel(handle);
        }
        log::debug!("refresh: stopped");
    }

    /// One-shot refresh through the same latency path, regardless of
    /// Running/Idle. The periodic timer is untouched.
    pub fn manual_refresh(&mut self, sched: &mut Scheduler<RefreshTask>) {
        self.is_refreshing = true;
        sched.schedule(self.latency_ms, RefreshTask::Complete);
    }

    /// Dispatch one fired task against the current snapshot.
    pub fn handle(
        &mut self,
        sched: &mut Scheduler<RefreshTask>,
        task: RefreshTask,
        store: &mut EntityStore,
    ) {
        match task {
            RefreshTask::Tick => {
                self.is_refreshing = true;
                sched.schedule(self.latency_ms, RefreshTask::Complete);
                // Re-arm only while Running; a stop() between fire and
                // dispatch leaves the timer down.
                self.pending_tick = self
                    .running
                    .then(|| sched.schedule(self.interval_ms, RefreshTask::Tick));
            }
            RefreshTask::Complete => {
                let next = perturb(store, &mut self.rng);
                store.replace(next);
                self.is_refreshing = false;
                self.refresh_count += 1;
                self.last_refresh = Some(sched.now_ms());
                log::debug!(
                    "refresh: snapshot #{} applied at t={}ms",
                    self.refresh_count,
                    sched.now_ms()
                );
            }
        }
    }

    /// Drive the virtual clock to `t`, dispatching every due task.
    pub fn run_until(
        &mut self,
        sched: &mut Scheduler<RefreshTask>,
        t: Millis,
        store: &mut EntityStore,
    ) -> crate::error::DashResult<()> {
        while let Some((_, task)) = sched.pop_due(t) {
            self.handle(sched, task, store);
        }
        Ok(())
    }
}

fn jittered(value: f64, spread: i64, rng: &mut DashRng) -> f64 {
    (value + rng.jitter(spread) as f64).max(0.0)
}

fn jittered_count(value: u32, spread: i64, rng: &mut DashRng) -> u32 {
    (value as i64 + rng.jitter(spread)).max(0) as u32
}

/// A perturbed clone of the snapshot: every monthly figure, customer
/// spend and stock level moves by a small bounded integer, clamped at
/// zero. The input snapshot is never touched.
pub fn perturb(store: &EntityStore, rng: &mut DashRng) -> EntityStore {
    let monthly_stats = store
        .monthly_stats
        .iter()
        .map(|s| MonthlyStat {
            month: s.month.clone(),
            revenue: jittered(s.revenue, REVENUE_JITTER, rng),
            profit: jittered(s.profit, PROFIT_JITTER, rng),
            sales: jittered_count(s.sales, SALES_JITTER, rng),
            customers: jittered_count(s.customers, CUSTOMERS_JITTER, rng),
        })
        .collect();

    let customers = store
        .customers
        .iter()
        .map(|c| Customer {
            total_spent: jittered(c.total_spent, SPEND_JITTER, rng),
            ..c.clone()
        })
        .collect();

    let products = store
        .products
        .iter()
        .map(|p| Product {
            stock: jittered_count(p.stock, STOCK_JITTER, rng),
            ..p.clone()
        })
        .collect();

    EntityStore {
        customers,
        products,
        sales: store.sales.clone(),
        monthly_stats,
    }
}
