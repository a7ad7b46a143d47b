//! Query modules, one per domain table, plus the derived views.

pub mod analysis_log;
pub mod components;
pub mod drift_metrics;
pub mod flags;
pub mod stories;
pub mod util;
pub mod views;
