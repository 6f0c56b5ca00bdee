//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the metric selection enum (`Metric`) and its fixed endpoint/title mappings
//! - normalized trend rows (`TrendRow`) and the fetch lifecycle (`LoadState`)
//! - page/tab enums for the navigation surface (`Page`, `EcoTab`)

pub mod types;

pub use types::*;
