//! Data sources for the dashboard.
//!
//! - `api`: the trends HTTP client (reqwest, blocking; run on a worker thread)
//! - `normalize`: shape-tolerant conversion of backend JSON into `TrendRow`s
//! - `eco`: static datasets for the eco-insights page

pub mod api;
pub mod eco;
pub mod normalize;
