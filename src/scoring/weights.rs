use serde::{Deserialize, Serialize};

/// Weights for combining the five sub-scores into the overall score.
///
/// Each field is optional in config; unspecified fields keep their default,
/// so a partial override only shifts the dimensions it names.
///
/// Example YAML:
/// ```yaml
/// weights:
///   growth_potential: 0.40
///   niche_relevance: 0.0
/// ```
///
/// The defaults sum to 1.0 and custom weights are expected to as well; see
/// `validate_weights` for the startup check.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringWeights {
    #[serde(default = "default_growth_potential")]
    pub growth_potential: f64,

    #[serde(default = "default_engagement_quality")]
    pub engagement_quality: f64,

    #[serde(default = "default_content_consistency")]
    pub content_consistency: f64,

    #[serde(default = "default_audience_quality")]
    pub audience_quality: f64,

    #[serde(default = "default_niche_relevance")]
    pub niche_relevance: f64,
}

fn default_growth_potential() -> f64 {
    0.30
}

fn default_engagement_quality() -> f64 {
    0.25
}

fn default_content_consistency() -> f64 {
    0.20
}

fn default_audience_quality() -> f64 {
    0.15
}

fn default_niche_relevance() -> f64 {
    0.10
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            growth_potential: default_growth_potential(),
            engagement_quality: default_engagement_quality(),
            content_consistency: default_content_consistency(),
            audience_quality: default_audience_quality(),
            niche_relevance: default_niche_relevance(),
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.growth_potential
            + self.engagement_quality
            + self.content_consistency
            + self.audience_quality
            + self.niche_relevance
    }
}
