//! The Predicate Engine — narrows one store snapshot by a FilterSpec.
//!
//! RULES:
//!   - Filtering is a pure function of (snapshot, spec, today).
//!     "Today" is injected; nothing here reads the wall clock.
//!   - All spec fields are AND-combined; an empty set means "no
//!     constraint", not "match nothing".
//!   - Referential cascade: a sale is excluded the moment either its
//!     customer or its product was filtered out, regardless of the
//!     sale's own criteria.
//!   - Never errors. A date bound that fails to parse is an open bound.

use crate::{
    model::{Category, Customer, CustomerStatus, MonthlyStat, Product, Sale},
    store::EntityStore,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const HIGH_VALUE_SPEND_THRESHOLD: f64 = 500.0;
pub const LOW_STOCK_THRESHOLD: u32 = 20;
pub const RECENT_SALES_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// ISO date string or empty = unbounded.
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickFilters {
    pub high_value_customers: bool,
    pub low_stock: bool,
    pub recent_sales: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilterKey {
    HighValueCustomers,
    LowStock,
    RecentSales,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub date_range: DateRange,
    pub categories: Vec<Category>,
    pub brands: Vec<String>,
    pub customer_status: Vec<CustomerStatus>,
    pub locations: Vec<String>,
    pub search_term: String,
    pub quick_filters: QuickFilters,
}

/// Filter updates as explicit tagged variants, consumed by the pure
/// transition in [`FilterSpec::apply`]. Variants are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterAction {
    SetDateRange { start: String, end: String },
    SetCategories { categories: Vec<Category> },
    SetBrands { brands: Vec<String> },
    SetCustomerStatus { status: Vec<CustomerStatus> },
    SetLocations { locations: Vec<String> },
    SetSearchTerm { term: String },
    SetQuickFilter { key: QuickFilterKey, value: bool },
    ResetFilters,
}

impl FilterSpec {
    /// Pure transition: `(spec, action) -> spec`.
    pub fn apply(mut self, action: FilterAction) -> FilterSpec {
        match action {
            FilterAction::SetDateRange { start, end } => {
                self.date_range = DateRange { start, end };
            }
            FilterAction::SetCategories { categories } => self.categories = categories,
            FilterAction::SetBrands { brands } => self.brands = brands,
            FilterAction::SetCustomerStatus { status } => self.customer_status = status,
            FilterAction::SetLocations { locations } => self.locations = locations,
            FilterAction::SetSearchTerm { term } => self.search_term = term,
            FilterAction::SetQuickFilter { key, value } => match key {
                QuickFilterKey::HighValueCustomers => {
                    self.quick_filters.high_value_customers = value
                }
                QuickFilterKey::LowStock => self.quick_filters.low_stock = value,
                QuickFilterKey::RecentSales => self.quick_filters.recent_sales = value,
            },
            FilterAction::ResetFilters => self = FilterSpec::default(),
        }
        self
    }
}

/// One filtered view over a single store snapshot. Original collection
/// order is preserved; monthly stats pass through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredData {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub monthly_stats: Vec<MonthlyStat>,
}

/// Parse an ISO date bound; empty or malformed input means "open".
fn parse_bound(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn customer_passes(c: &Customer, spec: &FilterSpec, needle: &str) -> bool {
    if !needle.is_empty()
        && !c.name.to_lowercase().contains(needle)
        && !c.email.to_lowercase().contains(needle)
        && !c.phone.to_lowercase().contains(needle)
    {
        return false;
    }
    if !spec.customer_status.is_empty() && !spec.customer_status.contains(&c.status) {
        return false;
    }
    if !spec.locations.is_empty() && !spec.locations.contains(&c.location) {
        return false;
    }
    if spec.quick_filters.high_value_customers && c.total_spent <= HIGH_VALUE_SPEND_THRESHOLD {
        return false;
    }
    true
}

fn product_passes(p: &Product, spec: &FilterSpec, needle: &str) -> bool {
    if !needle.is_empty()
        && !p.name.to_lowercase().contains(needle)
        && !p.brand.to_lowercase().contains(needle)
    {
        return false;
    }
    if !spec.categories.is_empty() && !spec.categories.contains(&p.category) {
        return false;
    }
    if !spec.brands.is_empty() && !spec.brands.contains(&p.brand) {
        return false;
    }
    if spec.quick_filters.low_stock && p.stock >= LOW_STOCK_THRESHOLD {
        return false;
    }
    true
}

fn sale_passes(
    s: &Sale,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    recent_cutoff: Option<NaiveDate>,
    customer_ids: &HashSet<&str>,
    product_ids: &HashSet<&str>,
) -> bool {
    // A sale date that fails to parse only survives an unbounded range.
    let date = parse_bound(&s.date);
    if let Some(start) = start {
        match date {
            Some(d) if d >= start => {}
            _ => return false,
        }
    }
    if let Some(end) = end {
        match date {
            Some(d) if d <= end => {}
            _ => return false,
        }
    }
    if let Some(cutoff) = recent_cutoff {
        match date {
            Some(d) if d >= cutoff => {}
            _ => return false,
        }
    }
    customer_ids.contains(s.customer_id.as_str()) && product_ids.contains(s.product_id.as_str())
}

/// Derive the three filtered collections from one snapshot.
pub fn filter(store: &EntityStore, spec: &FilterSpec, today: NaiveDate) -> FilteredData {
    let needle = spec.search_term.to_lowercase();

    let customers: Vec<Customer> = store
        .customers
        .iter()
        .filter(|c| customer_passes(c, spec, &needle))
        .cloned()
        .collect();

    let products: Vec<Product> = store
        .products
        .iter()
        .filter(|p| product_passes(p, spec, &needle))
        .cloned()
        .collect();

    let customer_ids: HashSet<&str> = customers.iter().map(|c| c.id.as_str()).collect();
    let product_ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();

    let start = parse_bound(&spec.date_range.start);
    let end = parse_bound(&spec.date_range.end);
    let recent_cutoff = spec
        .quick_filters
        .recent_sales
        .then(|| today - chrono::Duration::days(RECENT_SALES_WINDOW_DAYS));

    let sales: Vec<Sale> = store
        .sales
        .iter()
        .filter(|s| sale_passes(s, start, end, recent_cutoff, &customer_ids, &product_ids))
        .cloned()
        .collect();

    FilteredData {
        customers,
        products,
        sales,
        monthly_stats: store.monthly_stats.clone(),
    }
}
