//! Shared primitive types used across the entire analytics core.

/// A stable, unique identifier for any entity in the store.
pub type EntityId = String;

/// Virtual-clock time in milliseconds since scheduler start.
pub type Millis = u64;
