//! Interface drift: declared engagement vs observed interface complexity.
//!
//! The policy table is fixed: a direct (user-facing) component with an
//! unexpectedly complex interface, or a proxy component so simple its role
//! looks absorbed elsewhere, scores high; everything else sits at the
//! noise floor.

use vigil_core::constants::{
    DIRECT_COMPLEXITY_CEILING, INTERFACE_DRIFT_BASELINE, INTERFACE_DRIFT_DIRECT_OVERCOMPLEX,
    INTERFACE_DRIFT_PROXY_ABSORBED, PROXY_COMPLEXITY_FLOOR,
};
use vigil_core::types::Engagement;

pub(crate) fn score(engagement: Engagement, complexity: f64) -> (f64, serde_json::Value) {
    let (drift, rule) = match engagement {
        Engagement::Direct if complexity > DIRECT_COMPLEXITY_CEILING => {
            (INTERFACE_DRIFT_DIRECT_OVERCOMPLEX, "direct_overcomplex")
        }
        Engagement::Proxy if complexity < PROXY_COMPLEXITY_FLOOR => {
            (INTERFACE_DRIFT_PROXY_ABSORBED, "proxy_absorbed")
        }
        _ => (INTERFACE_DRIFT_BASELINE, "baseline"),
    };

    let details = serde_json::json!({
        "engagement": engagement.as_str(),
        "complexity": complexity,
        "rule": rule,
    });
    (drift, details)
}
