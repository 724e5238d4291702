//! shopdash-core — the analytics core of a retail dashboard.
//!
//! Data flow: refresh simulator (or external fetch) → entity store →
//! predicate engine → aggregator → chart renderer → pixel surface.
//! Everything in between is a synchronous pure computation over one
//! store snapshot; the refresh simulator is the only source of
//! time-deferred work, and it runs on a cooperative virtual clock.

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod refresh;
pub mod rng;
pub mod sample;
pub mod schedule;
pub mod store;
pub mod types;
