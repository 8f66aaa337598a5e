//! Shared types for the scan server workspace
//!
//! Common types used across crates: the order/SKU data model, the
//! operation log model, and small utility functions.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
