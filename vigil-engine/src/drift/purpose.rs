//! Purpose drift: semantic distance between what the component appears to
//! do and the value its story promises.

use vigil_core::errors::DriftError;

use super::facts::SimilarityModel;

pub(crate) fn score(
    model: &dyn SimilarityModel,
    purpose_summary: &str,
    primitive_value: &str,
) -> Result<(f64, serde_json::Value), DriftError> {
    let raw = model.similarity(purpose_summary, primitive_value)?;
    let similarity = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
    let drift = 1.0 - similarity;

    let details = serde_json::json!({
        "similarity": similarity,
        "observed_purpose": purpose_summary,
        "declared_value": primitive_value,
    });
    Ok((drift, details))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl SimilarityModel for Fixed {
        fn similarity(&self, _left: &str, _right: &str) -> Result<f64, DriftError> {
            Ok(self.0)
        }
    }

    #[test]
    fn drift_is_one_minus_similarity() {
        let (drift, details) = score(&Fixed(0.9), "caches lookups", "fast lookups").unwrap();
        assert!((drift - 0.1).abs() < 1e-9);
        assert_eq!(details["similarity"], 0.9);
    }

    #[test]
    fn out_of_range_similarity_is_clamped() {
        assert_eq!(score(&Fixed(1.7), "a", "b").unwrap().0, 0.0);
        assert_eq!(score(&Fixed(-0.4), "a", "b").unwrap().0, 1.0);
    }

    #[test]
    fn model_failure_propagates() {
        struct Broken;
        impl SimilarityModel for Broken {
            fn similarity(&self, _l: &str, _r: &str) -> Result<f64, DriftError> {
                Err(DriftError::Similarity {
                    message: "model offline".to_string(),
                })
            }
        }
        assert!(score(&Broken, "a", "b").is_err());
    }
}
