//! The Aggregator — pure functions from filtered collections to
//! chart-ready series.
//!
//! RULES:
//!   - Every function is total: empty input yields an empty series,
//!     division by zero yields 0. No NaN or infinity ever leaves this
//!     module, so charts never render exotic values.
//!   - Bucket order is first-seen order unless a top-N cut is asked
//!     for, in which case buckets sort descending by sum with the
//!     first-seen order breaking ties.

use crate::{
    chart::surface::{Rgb, PALETTE},
    filter::FilteredData,
    model::MonthlyStat,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    /// Cycled by point index when shorter than the data.
    pub colors: Vec<Rgb>,
    pub data: Vec<f64>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, colors: Vec<Rgb>, data: Vec<f64>) -> Self {
        Self { label: label.into(), colors, data }
    }

    pub fn color_at(&self, index: usize) -> Rgb {
        if self.colors.is_empty() {
            PALETTE[index % PALETTE.len()]
        } else {
            self.colors[index % self.colors.len()]
        }
    }
}

/// Labeled numeric data ready for geometric rendering. Every dataset
/// has exactly `labels.len()` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.is_empty()
    }

    /// All values across all datasets, in dataset order.
    pub fn all_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.datasets.iter().flat_map(|d| d.data.iter().copied())
    }
}

/// Bucket `records` by key, summing `value` per bucket. A key of
/// `None` drops the record (this is how dangling sale references fall
/// out of every derived view). `top_n` truncates to the N largest
/// buckets, descending.
pub fn group_sum<T>(
    records: &[T],
    key: impl Fn(&T) -> Option<String>,
    value: impl Fn(&T) -> f64,
    label: impl Into<String>,
    colors: Vec<Rgb>,
    top_n: Option<usize>,
) -> ChartSeries {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for record in records {
        let Some(k) = key(record) else { continue };
        if !sums.contains_key(&k) {
            order.push(k.clone());
        }
        *sums.entry(k).or_insert(0.0) += value(record);
    }

    let mut buckets: Vec<(String, f64)> = order
        .into_iter()
        .map(|k| {
            let v = sums[&k];
            (k, v)
        })
        .collect();

    if let Some(n) = top_n {
        // Stable sort keeps first-seen order for equal sums.
        buckets.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        buckets.truncate(n);
    }

    let (labels, data): (Vec<String>, Vec<f64>) = buckets.into_iter().unzip();
    if labels.is_empty() {
        return ChartSeries::default();
    }
    ChartSeries {
        labels,
        datasets: vec![Dataset::new(label, colors, data)],
    }
}

/// Per-label share of the first dataset's total, in percent. A zero
/// total yields 0 for every label.
pub fn percentage_of_total(series: &ChartSeries) -> ChartSeries {
    let Some(dataset) = series.datasets.first() else {
        return ChartSeries::default();
    };
    let total: f64 = dataset.data.iter().sum();
    let data: Vec<f64> = dataset
        .data
        .iter()
        .map(|v| if total > 0.0 { v / total * 100.0 } else { 0.0 })
        .collect();
    ChartSeries {
        labels: series.labels.clone(),
        datasets: vec![Dataset::new(
            format!("{} %", dataset.label),
            dataset.colors.clone(),
            data,
        )],
    }
}

/// Direct passthrough of one MonthlyStat field per month, in the
/// caller-supplied chronological order.
pub fn trend(
    stats: &[MonthlyStat],
    field: impl Fn(&MonthlyStat) -> f64,
    label: impl Into<String>,
    color: Rgb,
) -> ChartSeries {
    if stats.is_empty() {
        return ChartSeries::default();
    }
    ChartSeries {
        labels: stats.iter().map(|s| s.month.clone()).collect(),
        datasets: vec![Dataset::new(
            label,
            vec![color],
            stats.iter().map(&field).collect(),
        )],
    }
}

/// Month-over-month growth of a field, percent, one decimal. The
/// first month has no baseline and is defined as 0; so is any month
/// following a zero value.
pub fn growth_rate(stats: &[MonthlyStat], field: impl Fn(&MonthlyStat) -> f64) -> Vec<f64> {
    stats
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            if i == 0 {
                return 0.0;
            }
            let prev = field(&stats[i - 1]);
            if prev == 0.0 {
                return 0.0;
            }
            let raw = (field(stat) - prev) / prev * 100.0;
            (raw * 10.0).round() / 10.0
        })
        .collect()
}

/// Profit as a percentage of revenue; 0 when revenue is 0.
pub fn margin_percent(revenue: f64, profit: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

// ── Canned dashboard series ─────────────────────────────────────────
//
// The standard four charts the dashboard shows, composed from the
// primitives above. Each takes one filtered view and resolves sale
// references against that same view, so a filtered-out or missing
// product drops its sales here exactly as the referential cascade
// drops them in the predicate engine.

/// Revenue and profit per month, two line datasets.
pub fn revenue_profit_trend(view: &FilteredData) -> ChartSeries {
    if view.monthly_stats.is_empty() {
        return ChartSeries::default();
    }
    ChartSeries {
        labels: view
            .monthly_stats
            .iter()
            .map(|s| s.month.split(' ').next().unwrap_or(&s.month).to_string())
            .collect(),
        datasets: vec![
            Dataset::new(
                "Revenue",
                vec![PALETTE[0]],
                view.monthly_stats.iter().map(|s| s.revenue).collect(),
            ),
            Dataset::new(
                "Profit",
                vec![PALETTE[2]],
                view.monthly_stats.iter().map(|s| s.profit).collect(),
            ),
        ],
    }
}

/// Units sold per product name, top five.
pub fn top_products(view: &FilteredData) -> ChartSeries {
    let by_id: HashMap<&str, &str> = view
        .products
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    group_sum(
        &view.sales,
        |sale| by_id.get(sale.product_id.as_str()).map(|n| n.to_string()),
        |sale| sale.quantity as f64,
        "Units Sold",
        PALETTE[..5].to_vec(),
        Some(5),
    )
}

/// Customer head-count per status.
pub fn customer_status_counts(view: &FilteredData) -> ChartSeries {
    group_sum(
        &view.customers,
        |c| Some(c.status.label().to_string()),
        |_| 1.0,
        "Customer Status",
        vec![PALETTE[2], PALETTE[1]],
        None,
    )
}

/// Revenue per product category.
pub fn category_revenue(view: &FilteredData) -> ChartSeries {
    let by_id: HashMap<&str, &str> = view
        .products
        .iter()
        .map(|p| (p.id.as_str(), p.category.label()))
        .collect();
    group_sum(
        &view.sales,
        |sale| by_id.get(sale.product_id.as_str()).map(|c| c.to_string()),
        |sale| sale.total_amount,
        "Revenue by Category",
        PALETTE[..4].to_vec(),
        None,
    )
}
