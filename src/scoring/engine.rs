use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metrics::{compute_metrics, CreatorMetrics};
use super::weights::ScoringWeights;
use crate::model::{Creator, Platform, Post};

/// The five sub-scores plus their weighted combination, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreatorScore {
    pub overall: f64,
    pub growth_potential: f64,
    pub engagement_quality: f64,
    pub content_consistency: f64,
    pub audience_quality: f64,
    pub niche_relevance: f64,
}

/// A creator with its computed metrics and score attached. The input creator
/// is cloned in; the engine never mutates what the discovery service handed it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCreator {
    pub creator: Creator,
    pub metrics: CreatorMetrics,
    pub score: CreatorScore,
}

/// Qualification tier, determined by comparing `overall` to fixed cutoffs.
/// The engine only exposes the cutoffs; filtering is the consumer's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Premium,
    Good,
    Acceptable,
}

impl Tier {
    /// Minimum overall score for this tier.
    pub fn threshold(self) -> f64 {
        match self {
            Tier::Premium => 0.75,
            Tier::Good => 0.60,
            Tier::Acceptable => 0.45,
        }
    }

    /// Highest tier the score qualifies for, or `None` below every cutoff.
    pub fn of(overall: f64) -> Option<Tier> {
        [Tier::Premium, Tier::Good, Tier::Acceptable]
            .into_iter()
            .find(|tier| overall >= tier.threshold())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Premium => write!(f, "premium"),
            Tier::Good => write!(f, "good"),
            Tier::Acceptable => write!(f, "acceptable"),
        }
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "premium" => Ok(Tier::Premium),
            "good" => Ok(Tier::Good),
            "acceptable" => Ok(Tier::Acceptable),
            _ => bail!("unknown tier '{}' (expected premium, good, or acceptable)", s),
        }
    }
}

/// Scores creators on five weighted dimensions and ranks them.
///
/// Pure computation: no I/O, no clock reads outside the explicit `now`
/// parameter, so identical inputs always produce identical output.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score one creator against their post window at an explicit `now`.
    pub fn score_creator_at(
        &self,
        creator: &Creator,
        posts: &[Post],
        target_niches: &[String],
        now: DateTime<Utc>,
    ) -> ScoredCreator {
        let metrics = compute_metrics(creator, posts, now);
        let score = self.score(creator, &metrics, posts, target_niches);
        ScoredCreator {
            creator: creator.clone(),
            metrics,
            score,
        }
    }

    /// Score one creator using the current wall clock for the 30-day window.
    pub fn score_creator(
        &self,
        creator: &Creator,
        posts: &[Post],
        target_niches: &[String],
    ) -> ScoredCreator {
        self.score_creator_at(creator, posts, target_niches, Utc::now())
    }

    /// Score a batch of creators and return them sorted by overall score
    /// descending. Ties break on username ascending so the ranking is stable
    /// across runs. A creator missing from the posts map scores as having an
    /// empty post window.
    pub fn score_creators_at(
        &self,
        creators: &[Creator],
        posts_by_username: &HashMap<String, Vec<Post>>,
        target_niches: &[String],
        now: DateTime<Utc>,
    ) -> Vec<ScoredCreator> {
        let mut scored: Vec<ScoredCreator> = creators
            .iter()
            .map(|creator| {
                let posts = posts_by_username
                    .get(&creator.username)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                self.score_creator_at(creator, posts, target_niches, now)
            })
            .collect();

        scored.sort_by(|a, b| {
            let score_cmp = b
                .score
                .overall
                .partial_cmp(&a.score.overall)
                .unwrap_or(Ordering::Equal);
            if score_cmp != Ordering::Equal {
                return score_cmp;
            }
            a.creator.username.cmp(&b.creator.username)
        });
        scored
    }

    /// Batch scoring with the current wall clock.
    pub fn score_creators(
        &self,
        creators: &[Creator],
        posts_by_username: &HashMap<String, Vec<Post>>,
        target_niches: &[String],
    ) -> Vec<ScoredCreator> {
        self.score_creators_at(creators, posts_by_username, target_niches, Utc::now())
    }

    fn score(
        &self,
        creator: &Creator,
        metrics: &CreatorMetrics,
        posts: &[Post],
        target_niches: &[String],
    ) -> CreatorScore {
        let growth_potential = score_growth_potential(creator, metrics);
        let engagement_quality = score_engagement_quality(creator, metrics);
        let content_consistency = score_content_consistency(metrics);
        let audience_quality = score_audience_quality(creator, metrics);
        let niche_relevance = score_niche_relevance(posts, target_niches);

        let overall = growth_potential * self.weights.growth_potential
            + engagement_quality * self.weights.engagement_quality
            + content_consistency * self.weights.content_consistency
            + audience_quality * self.weights.audience_quality
            + niche_relevance * self.weights.niche_relevance;

        CreatorScore {
            // Sub-scores stay in [0,1] and default weights sum to 1; the clamp
            // only matters under custom weight configurations
            overall: overall.clamp(0.0, 1.0),
            growth_potential,
            engagement_quality,
            content_consistency,
            audience_quality,
            niche_relevance,
        }
    }
}

/// Additive point scheme favoring the nano/micro-influencer sweet spot,
/// capped at 1.0.
fn score_growth_potential(creator: &Creator, metrics: &CreatorMetrics) -> f64 {
    let mut score: f64 = 0.0;

    let followers = creator.estimated_followers;
    if (1_000..=50_000).contains(&followers) {
        if (5_000..=20_000).contains(&followers) {
            score += 0.4;
        } else {
            score += 0.3;
        }
    } else if followers < 1_000 {
        score += 0.1;
    } else {
        // Larger accounts have less room to grow
        score += 0.2;
    }

    if metrics.engagement_30_day > 0.05 {
        score += 0.3;
    } else if metrics.engagement_30_day > 0.03 {
        score += 0.2;
    } else if metrics.engagement_30_day > 0.01 {
        score += 0.1;
    }

    if metrics.post_frequency >= 3.0 {
        score += 0.2;
    } else if metrics.post_frequency >= 1.0 {
        score += 0.1;
    }

    if metrics.content_quality >= 0.7 {
        score += 0.1;
    } else if metrics.content_quality >= 0.5 {
        score += 0.05;
    }

    score.min(1.0)
}

/// Engagement-rate tiers with platform-specific boundaries (TikTok's baseline
/// engagement runs higher), plus comment-ratio, quality, and discussion
/// bonuses. Capped at 1.0.
fn score_engagement_quality(creator: &Creator, metrics: &CreatorMetrics) -> f64 {
    let mut score: f64 = 0.0;
    let rate = metrics.engagement_30_day;

    match creator.platform {
        Platform::Instagram => {
            if rate >= 0.06 {
                score += 0.4;
            } else if rate >= 0.03 {
                score += 0.3;
            } else if rate >= 0.01 {
                score += 0.2;
            } else {
                score += 0.1;
            }
        }
        Platform::Tiktok => {
            if rate >= 0.09 {
                score += 0.4;
            } else if rate >= 0.06 {
                score += 0.3;
            } else if rate >= 0.03 {
                score += 0.2;
            } else {
                score += 0.1;
            }
        }
    }

    // Comments relative to likes indicate genuine engagement
    let comment_ratio = if metrics.avg_likes > 0.0 {
        metrics.avg_comments / metrics.avg_likes
    } else {
        0.0
    };
    if comment_ratio >= 0.05 {
        score += 0.2;
    } else if comment_ratio >= 0.02 {
        score += 0.1;
    }

    if metrics.content_quality >= 0.6 {
        score += 0.2;
    } else if metrics.content_quality >= 0.4 {
        score += 0.1;
    }

    // Meaningful discussion under posts
    if metrics.avg_comments >= 10.0 {
        score += 0.2;
    }

    score.min(1.0)
}

/// Posting cadence and quality tiers, plus a flat bonus for any measurable
/// activity at all. Capped at 1.0.
fn score_content_consistency(metrics: &CreatorMetrics) -> f64 {
    let mut score: f64 = 0.0;

    if metrics.post_frequency >= 5.0 {
        score += 0.4;
    } else if metrics.post_frequency >= 3.0 {
        score += 0.3;
    } else if metrics.post_frequency >= 1.0 {
        score += 0.2;
    } else if metrics.post_frequency >= 0.5 {
        score += 0.1;
    }

    if metrics.content_quality >= 0.8 {
        score += 0.3;
    } else if metrics.content_quality >= 0.6 {
        score += 0.2;
    } else if metrics.content_quality >= 0.4 {
        score += 0.1;
    }

    if metrics.engagement_30_day > 0.0 && metrics.avg_likes > 0.0 {
        score += 0.3;
    }

    score.min(1.0)
}

/// Starts from a neutral 0.5 base. Verified badges and a real bio push it up;
/// an engagement rate above the plausible organic range (>= 15%) reads as
/// bought or bot-driven engagement and pushes it down. Clamped to [0, 1].
fn score_audience_quality(creator: &Creator, metrics: &CreatorMetrics) -> f64 {
    let mut score: f64 = 0.5;

    if creator.is_verified {
        score += 0.2;
    }

    if creator.bio.as_ref().is_some_and(|bio| bio.chars().count() > 20) {
        score += 0.1;
    }

    let rate = metrics.engagement_30_day;
    if rate > 0.01 && rate < 0.15 {
        score += 0.2;
    } else if rate >= 0.15 {
        score -= 0.2;
    }

    score.clamp(0.0, 1.0)
}

/// Fraction of posts whose text mentions any target niche, case-insensitive.
/// A post counts once no matter how many niches it matches. Neutral 0.5 when
/// there is nothing to match against (no niches, or no posts).
fn score_niche_relevance(posts: &[Post], target_niches: &[String]) -> f64 {
    if target_niches.is_empty() || posts.is_empty() {
        return 0.5;
    }

    let relevant = posts
        .iter()
        .filter(|post| {
            let content = post.caption.to_lowercase();
            target_niches
                .iter()
                .any(|niche| content.contains(&niche.to_lowercase()))
        })
        .count();

    relevant as f64 / posts.len() as f64
}
