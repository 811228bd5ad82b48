use serde::{Deserialize, Serialize};
use std::fmt;

/// Social platform a creator was discovered on.
///
/// Scoring is platform-aware: engagement-rate tiers differ between the two
/// because baseline engagement on TikTok runs higher than on Instagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Instagram => write!(f, "instagram"),
            Platform::Tiktok => write!(f, "tiktok"),
        }
    }
}

/// A discovered social-media account, as supplied by the discovery service.
///
/// The scoring engine only reads these; it returns a separate record with the
/// computed metrics and score attached rather than mutating the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub username: String,
    pub platform: Platform,
    /// Follower count; 0 when the discovery service could not determine it.
    pub estimated_followers: u64,
    /// Precomputed engagement signal from the discovery service. May be stale;
    /// the engine derives its own 30-day rate from posts instead.
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Creator {
    /// Return a short reference in the format "platform/@username"
    pub fn short_ref(&self) -> String {
        format!("{}/@{}", self.platform, self.username)
    }
}
