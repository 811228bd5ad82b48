use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of content a post is. Play counts only exist on videos, so they
/// live on the variant rather than as a nullable field every caller must
/// remember to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PostKind {
    Photo,
    Carousel,
    Video { plays: u64 },
}

/// One piece of published content, attributed to its creator by username.
///
/// Immutable input: the discovery service supplies these in bulk and the
/// scoring engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Owning creator's handle (back-reference, not ownership).
    pub username: String,
    pub likes: u64,
    pub comments: u64,
    pub timestamp: DateTime<Utc>,
    /// Caption or video description, used for quality and relevance heuristics.
    #[serde(default)]
    pub caption: String,
    /// Lowercase tags extracted from the text by the discovery service.
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(flatten)]
    pub kind: PostKind,
}

impl Post {
    /// Play count for videos; `None` for photo/carousel content. Distinct from
    /// a video with zero plays.
    pub fn plays(&self) -> Option<u64> {
        match self.kind {
            PostKind::Video { plays } => Some(plays),
            PostKind::Photo | PostKind::Carousel => None,
        }
    }

    /// Combined likes + comments, the raw engagement count for one post.
    pub fn engagement(&self) -> u64 {
        self.likes + self.comments
    }
}
