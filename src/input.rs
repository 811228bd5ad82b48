use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::model::{Creator, Platform, Post};

/// One scrape run's payload from the discovery service: the creators it found
/// and their recent posts, attributed by username.
#[derive(Debug, Deserialize)]
pub struct ScrapeBatch {
    pub creators: Vec<Creator>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Load a scrape batch from a JSON file.
pub fn load_batch(path: &Path) -> Result<ScrapeBatch> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file at {}", path.display()))?;
    let batch: ScrapeBatch = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse batch file at {}", path.display()))?;
    Ok(batch)
}

/// Deduplicate creators by (platform, username), keeping the first occurrence.
/// The same account shows up once per hashtag query the scraper ran.
pub fn dedupe_creators(creators: Vec<Creator>) -> Vec<Creator> {
    let mut seen: HashSet<(Platform, String)> = HashSet::new();
    creators
        .into_iter()
        .filter(|c| seen.insert((c.platform, c.username.clone())))
        .collect()
}

/// Group posts by their owning creator's username, the shape the batch
/// scoring contract takes.
pub fn group_posts_by_username(posts: Vec<Post>) -> HashMap<String, Vec<Post>> {
    let mut grouped: HashMap<String, Vec<Post>> = HashMap::new();
    for post in posts {
        grouped.entry(post.username.clone()).or_default().push(post);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> ScrapeBatch {
        let json = r#"{
            "creators": [
                {"username": "fitgirl", "platform": "instagram", "estimated_followers": 12000},
                {"username": "fitgirl", "platform": "instagram", "estimated_followers": 12500},
                {"username": "fitgirl", "platform": "tiktok", "estimated_followers": 8000},
                {"username": "chefmax", "platform": "instagram", "estimated_followers": 4000}
            ],
            "posts": [
                {"username": "fitgirl", "likes": 800, "comments": 40,
                 "timestamp": "2026-01-10T12:00:00Z", "kind": "photo"},
                {"username": "chefmax", "likes": 120, "comments": 9,
                 "timestamp": "2026-01-11T09:30:00Z", "caption": "pasta night",
                 "kind": "carousel"},
                {"username": "fitgirl", "likes": 950, "comments": 55,
                 "timestamp": "2026-01-12T18:00:00Z", "kind": "video", "plays": 20000}
            ]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_batch_parses() {
        let batch = sample_batch();
        assert_eq!(batch.creators.len(), 4);
        assert_eq!(batch.posts.len(), 3);
    }

    #[test]
    fn test_dedupe_keeps_first_per_platform() {
        let batch = sample_batch();
        let creators = dedupe_creators(batch.creators);
        assert_eq!(creators.len(), 3);
        // First fitgirl/instagram record wins
        assert_eq!(creators[0].estimated_followers, 12000);
        // Same handle on another platform is a different account
        assert_eq!(creators[1].platform, Platform::Tiktok);
    }

    #[test]
    fn test_group_posts_by_username() {
        let batch = sample_batch();
        let grouped = group_posts_by_username(batch.posts);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["fitgirl"].len(), 2);
        assert_eq!(grouped["chefmax"].len(), 1);
        assert_eq!(grouped["fitgirl"][1].plays(), Some(20000));
    }

    #[test]
    fn test_posts_field_optional() {
        let batch: ScrapeBatch = serde_json::from_str(r#"{"creators": []}"#).unwrap();
        assert!(batch.posts.is_empty());
    }
}
