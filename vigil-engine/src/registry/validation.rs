//! Story draft validation. Drafts arrive from the upstream story
//! synthesiser and are never trusted: enumerated fields are text until
//! validated here, and nothing is written on failure.

use vigil_core::errors::RegistryError;
use vigil_core::types::{Engagement, StoryDraft, TouchPointType};

/// A draft whose fields have all been checked and parsed.
pub(crate) struct ValidatedStory {
    pub story_text: String,
    pub engagement: Engagement,
    pub primitive_value: String,
    pub expression: String,
    pub confidence: f64,
    pub quality: f64,
    pub touch_points: Vec<(String, TouchPointType)>,
}

/// The three clauses every story must carry, in some form.
const REQUIRED_CLAUSES: [&str; 3] = ["as a", "i want", "so that"];

pub(crate) fn validate_story(draft: &StoryDraft) -> Result<ValidatedStory, RegistryError> {
    let story_text = draft.story_text.trim();
    if story_text.is_empty() {
        return Err(RegistryError::Validation {
            field: "story_text",
            reason: "must not be empty".to_string(),
        });
    }
    let lowered = story_text.to_lowercase();
    for clause in REQUIRED_CLAUSES {
        if !lowered.contains(clause) {
            return Err(RegistryError::Validation {
                field: "story_text",
                reason: format!("missing required clause \"{clause}\""),
            });
        }
    }

    let engagement =
        Engagement::parse(draft.engagement.trim()).ok_or_else(|| RegistryError::Validation {
            field: "engagement",
            reason: format!("must be direct or proxy, got \"{}\"", draft.engagement),
        })?;

    let primitive_value = non_empty("primitive_value", &draft.primitive_value)?;
    let expression = non_empty("expression", &draft.expression)?;

    let confidence = unit_interval("confidence", draft.confidence)?;
    let quality = unit_interval("quality", draft.quality)?;

    let mut touch_points = Vec::with_capacity(draft.touch_points.len());
    for tp in &draft.touch_points {
        let text = non_empty("touch_point", &tp.text)?;
        let touch_type = TouchPointType::parse(tp.touch_type.trim()).ok_or_else(|| {
            RegistryError::Validation {
                field: "touch_type",
                reason: format!(
                    "must be input, output, interface, or event, got \"{}\"",
                    tp.touch_type
                ),
            }
        })?;
        touch_points.push((text, touch_type));
    }

    Ok(ValidatedStory {
        story_text: story_text.to_string(),
        engagement,
        primitive_value,
        expression,
        confidence,
        quality,
        touch_points,
    })
}

fn non_empty(field: &'static str, raw: &str) -> Result<String, RegistryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn unit_interval(field: &'static str, value: f64) -> Result<f64, RegistryError> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(RegistryError::Validation {
            field,
            reason: format!("must be within [0, 1], got {value}"),
        });
    }
    Ok(value)
}
