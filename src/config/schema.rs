use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringWeights;

/// Top-level config file contents.
///
/// Example YAML:
/// ```yaml
/// niches: [fitness, wellness, nutrition]
/// input: ~/scrapes/latest.json
/// weights:
///   growth_potential: 0.40
///   niche_relevance: 0.0
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Target-niche keywords matched against post text during scoring.
    #[serde(default)]
    pub niches: Vec<String>,

    /// Default batch file to rank when the CLI is given none.
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Sub-score weight overrides; unspecified fields keep their defaults.
    #[serde(default)]
    pub weights: Option<ScoringWeights>,
}
