//! KPI tile metrics derived from one store snapshot.

use crate::{aggregate::margin_percent, store::EntityStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_sales: usize,
    pub total_customers: usize,
    pub average_order_value: f64,
    pub profit_margin: f64,
    pub top_selling_product: String,
    /// Revenue growth of the latest month over the one before, percent.
    pub monthly_growth: f64,
}

impl DashboardMetrics {
    /// All ratios guard their zero denominators; an empty store yields
    /// an all-zero result rather than an error.
    pub fn compute(store: &EntityStore) -> Self {
        let total_revenue: f64 = store.sales.iter().map(|s| s.total_amount).sum();
        let total_profit: f64 = store.sales.iter().map(|s| s.profit).sum();
        let total_sales = store.sales.len();
        let total_customers = store.customers.len();

        let average_order_value = if total_sales > 0 {
            total_revenue / total_sales as f64
        } else {
            0.0
        };

        let top_selling_product = top_seller(store).unwrap_or_default();

        let monthly_growth = match store.monthly_stats.as_slice() {
            [.., prev, last] if prev.revenue > 0.0 => {
                (last.revenue - prev.revenue) / prev.revenue * 100.0
            }
            _ => 0.0,
        };

        Self {
            total_revenue,
            total_profit,
            total_sales,
            total_customers,
            average_order_value,
            profit_margin: margin_percent(total_revenue, total_profit),
            top_selling_product,
            monthly_growth,
        }
    }
}

/// Name of the product with the most units sold. Sales pointing at a
/// missing product do not count. Ties resolve to the first-seen
/// product, matching bucket order everywhere else.
fn top_seller(store: &EntityStore) -> Option<String> {
    let names = store.product_by_id();
    let mut order: Vec<&str> = Vec::new();
    let mut units: HashMap<&str, u32> = HashMap::new();
    for sale in &store.sales {
        if !names.contains_key(sale.product_id.as_str()) {
            continue;
        }
        if !units.contains_key(sale.product_id.as_str()) {
            order.push(sale.product_id.as_str());
        }
        *units.entry(sale.product_id.as_str()).or_insert(0) += sale.quantity;
    }
    let mut best: Option<&str> = None;
    for id in order {
        match best {
            Some(b) if units[b] >= units[id] => {}
            _ => best = Some(id),
        }
    }
    best.and_then(|id| names.get(id).map(|p| p.name.clone()))
}
