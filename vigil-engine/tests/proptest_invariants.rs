//! Property-based tests for scoring invariants.
//!
//! Fuzz-verifies:
//!   - the composite formula is exactly 0.4a + 0.3b + 0.3c
//!   - threshold mapping totally partitions [0,1]
//!   - requires_review holds iff the level is significant or critical

use proptest::prelude::*;

use vigil_core::constants::{THRESHOLD_CRITICAL, THRESHOLD_MINOR, THRESHOLD_SIGNIFICANT};
use vigil_core::types::{DimensionScores, FlagLevel};

proptest! {
    /// Composite is the exact weighted sum, for all dimension scores.
    #[test]
    fn prop_composite_is_exact_weighted_sum(
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        c in 0.0f64..=1.0,
    ) {
        let scores = DimensionScores {
            implementation: a,
            interface: b,
            purpose: c,
        };
        let expected = 0.4 * a + 0.3 * b + 0.3 * c;
        prop_assert_eq!(scores.composite(), expected);
    }

    /// Composite stays within [0,1] for in-range inputs.
    #[test]
    fn prop_composite_bounded(
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        c in 0.0f64..=1.0,
    ) {
        let composite = DimensionScores {
            implementation: a,
            interface: b,
            purpose: c,
        }
        .composite();
        prop_assert!(composite >= 0.0);
        prop_assert!(composite <= 1.0 + 1e-12);
    }

    /// Every score in [0,1] maps to exactly one level, and the level
    /// matches the ordered threshold partition.
    #[test]
    fn prop_thresholds_partition_unit_interval(score in 0.0f64..=1.0) {
        let level = FlagLevel::from_score(score);
        let expected = if score >= THRESHOLD_CRITICAL {
            FlagLevel::Critical
        } else if score >= THRESHOLD_SIGNIFICANT {
            FlagLevel::Significant
        } else if score >= THRESHOLD_MINOR {
            FlagLevel::Minor
        } else {
            FlagLevel::None
        };
        prop_assert_eq!(level, expected);
    }

    /// Mapping is monotone: a higher score never yields a lower level.
    #[test]
    fn prop_threshold_mapping_is_monotone(
        low in 0.0f64..=1.0,
        high in 0.0f64..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        prop_assert!(
            FlagLevel::from_score(low).severity_rank()
                <= FlagLevel::from_score(high).severity_rank()
        );
    }

    /// requires_review exactly matches the review-worthy levels.
    #[test]
    fn prop_requires_review_iff_significant_or_critical(score in 0.0f64..=1.0) {
        let level = FlagLevel::from_score(score);
        prop_assert_eq!(
            level.requires_review(),
            matches!(level, FlagLevel::Significant | FlagLevel::Critical)
        );
    }
}
