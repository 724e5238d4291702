//! Entity records — immutable value types mirroring the upstream feed.
//!
//! RULE: records are never mutated in place. A change means a new
//! record, and a changed collection means a new collection. The wire
//! names (camelCase) follow the JSON feed the dashboard consumes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Running,
    Casual,
    Formal,
    Sports,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Casual  => "casual",
            Self::Formal  => "formal",
            Self::Sports  => "sports",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active   => "active",
            Self::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Completed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Lifetime spend, currency units. Never negative.
    pub total_spent: f64,
    /// ISO date of the most recent purchase.
    pub last_purchase: String,
    pub status: CustomerStatus,
    /// Free text, "City, Region" by convention.
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub price: f64,
    pub cost: f64,
    pub stock: u32,
    /// Available sizes. Non-empty by contract with the feed.
    pub sizes: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    /// Not validated against the product's size list — upstream sends
    /// it as-is and the views tolerate it (open product question).
    pub size: u32,
    pub total_amount: f64,
    pub profit: f64,
    /// ISO date string, e.g. "2024-12-15".
    pub date: String,
    pub status: SaleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    /// Month label, chronologically ordered by the feed.
    pub month: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales: u32,
    pub customers: u32,
}
