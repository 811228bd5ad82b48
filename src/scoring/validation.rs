use super::weights::ScoringWeights;

// Custom weights must stay a convex combination for `overall` to mean anything
const SUM_TOLERANCE: f64 = 1e-6;

/// Validate a weight configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// The engine itself accepts any weights it is constructed with; this check
/// belongs at the configuration boundary, before an engine is built.
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let named = [
        ("weights.growth_potential", weights.growth_potential),
        ("weights.engagement_quality", weights.engagement_quality),
        ("weights.content_consistency", weights.content_consistency),
        ("weights.audience_quality", weights.audience_quality),
        ("weights.niche_relevance", weights.niche_relevance),
    ];

    for (name, value) in named {
        if !value.is_finite() {
            errors.push(format!("{}: must be a finite number", name));
        } else if value < 0.0 {
            errors.push(format!("{}: must be non-negative (got {})", name, value));
        }
    }

    let sum = weights.sum();
    if sum.is_finite() && (sum - 1.0).abs() > SUM_TOLERANCE {
        errors.push(format!("weights: must sum to 1.0 (got {})", sum));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
