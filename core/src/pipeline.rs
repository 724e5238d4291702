//! The composition root: one store snapshot, one filter spec, and the
//! derived views hanging off them.
//!
//! RULE: every derived computation here reads exactly one snapshot.
//! Store replacement is wholesale; nothing hands out views that
//! straddle two generations of data.

use crate::{
    aggregate::{
        category_revenue, customer_status_counts, revenue_profit_trend, top_products,
        ChartSeries,
    },
    filter::{filter, FilterAction, FilterSpec, FilteredData},
    metrics::DashboardMetrics,
    store::EntityStore,
};
use chrono::NaiveDate;

pub struct Dashboard {
    store: EntityStore,
    spec: FilterSpec,
    /// Injected "now" for the recent-sales window. The host updates it,
    /// the core never reads the wall clock.
    today: NaiveDate,
}

impl Dashboard {
    pub fn new(store: EntityStore, today: NaiveDate) -> Self {
        Self { store, spec: FilterSpec::default(), today }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Wholesale snapshot replacement — the landing point for the
    /// refresh simulator and for external CRUD collaborators.
    pub fn replace_store(&mut self, next: EntityStore) {
        log::debug!(
            "pipeline: snapshot replaced ({} customers, {} products, {} sales)",
            next.customers.len(),
            next.products.len(),
            next.sales.len()
        );
        self.store.replace(next);
    }

    /// Mutable access for drivers that perturb in place (the refresh
    /// simulator's run loop).
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn dispatch(&mut self, action: FilterAction) {
        log::debug!("pipeline: filter action {action:?}");
        self.spec = std::mem::take(&mut self.spec).apply(action);
    }

    /// The filtered view of the current snapshot.
    pub fn filtered(&self) -> FilteredData {
        filter(&self.store, &self.spec, self.today)
    }

    /// KPI tiles, computed from the unfiltered snapshot.
    pub fn metrics(&self) -> DashboardMetrics {
        DashboardMetrics::compute(&self.store)
    }

    // The four standard chart series, one filtered view each.

    pub fn revenue_profit_series(&self) -> ChartSeries {
        revenue_profit_trend(&self.filtered())
    }

    pub fn top_products_series(&self) -> ChartSeries {
        top_products(&self.filtered())
    }

    pub fn customer_status_series(&self) -> ChartSeries {
        customer_status_counts(&self.filtered())
    }

    pub fn category_revenue_series(&self) -> ChartSeries {
        category_revenue(&self.filtered())
    }
}
