pub mod weights;
pub mod metrics;
pub mod engine;
pub mod validation;

pub use weights::ScoringWeights;
pub use metrics::{compute_metrics, CreatorMetrics};
pub use engine::{CreatorScore, ScoredCreator, ScoringEngine, Tier};
pub use validation::validate_weights;
