//! Implementation drift: Jaccard distance between declared and observed
//! touch point sets.

use rustc_hash::FxHashSet;
use vigil_core::types::UserStory;

use super::facts::ObservedFacts;

/// `1 - |observed ∩ declared| / |observed ∪ declared|`, comparing
/// trimmed, lowercased touch point texts. An empty union means both sides
/// declare nothing: trivially aligned, drift 0.
pub(crate) fn score(story: &UserStory, facts: &ObservedFacts) -> (f64, serde_json::Value) {
    let declared: FxHashSet<String> = story
        .touch_points
        .iter()
        .map(|tp| normalize(&tp.text))
        .collect();
    let observed: FxHashSet<String> = facts.touch_points.iter().map(|t| normalize(t)).collect();

    let overlap = declared.intersection(&observed).count();
    let union = declared.union(&observed).count();
    let drift = if union == 0 {
        0.0
    } else {
        1.0 - overlap as f64 / union as f64
    };

    let mut missing: Vec<&String> = declared.difference(&observed).collect();
    missing.sort_unstable();
    let mut unexpected: Vec<&String> = observed.difference(&declared).collect();
    unexpected.sort_unstable();

    let details = serde_json::json!({
        "declared": declared.len(),
        "observed": observed.len(),
        "overlap": overlap,
        "union": union,
        "missing": missing,
        "unexpected": unexpected,
    });
    (drift, details)
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use vigil_core::types::ids::{ComponentId, StoryId, TouchPointId};
    use vigil_core::types::{Engagement, TouchPoint, TouchPointType, UserStory};

    use super::*;

    fn story_with(touch_points: &[&str]) -> UserStory {
        let story_id = StoryId::generate();
        UserStory {
            id: story_id.clone(),
            component_id: ComponentId::generate(),
            story_text: "As a user, I want x, so that y".to_string(),
            engagement: Engagement::Direct,
            primitive_value: "x".to_string(),
            expression: "y".to_string(),
            confidence: 1.0,
            quality: 1.0,
            created_at: 0,
            updated_at: 0,
            touch_points: touch_points
                .iter()
                .map(|text| TouchPoint {
                    id: TouchPointId::generate(),
                    story_id: story_id.clone(),
                    text: text.to_string(),
                    touch_type: TouchPointType::Interface,
                })
                .collect(),
        }
    }

    fn facts_with(touch_points: &[&str]) -> ObservedFacts {
        ObservedFacts {
            touch_points: touch_points.iter().map(|t| t.to_string()).collect(),
            interface_complexity: 0.5,
            purpose_summary: String::new(),
        }
    }

    #[test]
    fn identical_sets_have_zero_drift() {
        let (drift, _) = score(&story_with(&["api", "cli"]), &facts_with(&["cli", "api"]));
        assert_eq!(drift, 0.0);
    }

    #[test]
    fn disjoint_sets_have_total_drift() {
        let (drift, details) = score(&story_with(&["api"]), &facts_with(&["queue"]));
        assert_eq!(drift, 1.0);
        assert_eq!(details["overlap"], 0);
        assert_eq!(details["union"], 2);
    }

    #[test]
    fn empty_union_is_trivially_aligned() {
        let (drift, _) = score(&story_with(&[]), &facts_with(&[]));
        assert_eq!(drift, 0.0);
    }

    #[test]
    fn comparison_ignores_case_and_whitespace() {
        let (drift, _) = score(&story_with(&["  API  "]), &facts_with(&["api"]));
        assert_eq!(drift, 0.0);
    }

    #[test]
    fn half_overlap_scores_half() {
        // declared {a,b}, observed {b,c}: overlap 1, union 3
        let (drift, details) = score(&story_with(&["a", "b"]), &facts_with(&["b", "c"]));
        assert!((drift - (1.0 - 1.0 / 3.0)).abs() < 1e-12);
        assert_eq!(details["missing"], serde_json::json!(["a"]));
        assert_eq!(details["unexpected"], serde_json::json!(["c"]));
    }
}
