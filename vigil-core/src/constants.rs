//! Fixed constants for the drift scoring pipeline.
//!
//! Weights and thresholds are deliberately not configurable per call so that
//! scores stay comparable across components and over time.

/// Vigil version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Composite weights ----

/// Composite weight for the implementation dimension.
pub const WEIGHT_IMPLEMENTATION: f64 = 0.4;

/// Composite weight for the interface dimension.
pub const WEIGHT_INTERFACE: f64 = 0.3;

/// Composite weight for the purpose dimension.
pub const WEIGHT_PURPOSE: f64 = 0.3;

// ---- Flag thresholds ----

/// Composite score at or above which a flag is `critical`.
pub const THRESHOLD_CRITICAL: f64 = 0.8;

/// Composite score at or above which a flag is `significant`.
pub const THRESHOLD_SIGNIFICANT: f64 = 0.6;

/// Composite score at or above which a flag is `minor`.
pub const THRESHOLD_MINOR: f64 = 0.3;

// ---- Interface drift policy ----

/// Observed complexity above which a `direct` component counts as drifting.
pub const DIRECT_COMPLEXITY_CEILING: f64 = 0.7;

/// Observed complexity below which a `proxy` component counts as drifting.
pub const PROXY_COMPLEXITY_FLOOR: f64 = 0.3;

/// Interface drift for a direct component with an over-complex interface.
pub const INTERFACE_DRIFT_DIRECT_OVERCOMPLEX: f64 = 0.8;

/// Interface drift for a proxy component whose role looks absorbed elsewhere.
pub const INTERFACE_DRIFT_PROXY_ABSORBED: f64 = 0.6;

/// Interface drift noise floor. Never exactly zero.
pub const INTERFACE_DRIFT_BASELINE: f64 = 0.1;

// ---- Policy values ----

/// Drift recorded for every dimension when a component has no current story.
pub const MAX_DRIFT: f64 = 1.0;

/// Composite drift above which a component appears in the attention view
/// even without a review-level flag.
pub const ATTENTION_DRIFT_THRESHOLD: f64 = 0.6;

// ---- Defaults ----

/// Default seconds after which a `running` analysis run is considered stale.
pub const DEFAULT_STALE_RUN_TIMEOUT_SECS: u64 = 900;

/// Default number of read connections in the pool.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
