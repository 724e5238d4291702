//! The Entity Store — the authoritative in-memory snapshot.
//!
//! RULE: the store is replaced wholesale, never edited field-by-field
//! across collections. Every derived computation (filter, aggregate,
//! render) reads exactly one snapshot per invocation, so a replacement
//! landing mid-pipeline can never mix two generations of data.

use crate::{
    error::DashResult,
    model::{Customer, MonthlyStat, Product, Sale},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStore {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub monthly_stats: Vec<MonthlyStat>,
}

impl EntityStore {
    /// Decode a snapshot from the upstream JSON feed. This is the only
    /// seam the external fetch collaborator needs.
    pub fn from_json(json: &str) -> DashResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> DashResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Replace the whole snapshot. The old snapshot is returned so a
    /// caller holding derived views can tell which generation they
    /// were computed from.
    pub fn replace(&mut self, next: EntityStore) -> EntityStore {
        std::mem::replace(self, next)
    }

    pub fn customer_ids(&self) -> HashSet<&str> {
        self.customers.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn product_ids(&self) -> HashSet<&str> {
        self.products.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn customer_by_id(&self) -> HashMap<&str, &Customer> {
        self.customers.iter().map(|c| (c.id.as_str(), c)).collect()
    }

    pub fn product_by_id(&self) -> HashMap<&str, &Product> {
        self.products.iter().map(|p| (p.id.as_str(), p)).collect()
    }

    /// Sales whose customer AND product both resolve in this snapshot.
    /// A dangling reference silently drops the sale from derived views.
    pub fn resolvable_sales(&self) -> Vec<&Sale> {
        let customers = self.customer_ids();
        let products = self.product_ids();
        self.sales
            .iter()
            .filter(|s| {
                customers.contains(s.customer_id.as_str())
                    && products.contains(s.product_id.as_str())
            })
            .collect()
    }
}
