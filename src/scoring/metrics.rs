use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::{Creator, Post};

/// Per-creator metrics derived from one scoring call's post window.
///
/// All fields are defined (zero) for a creator with no posts; an empty post
/// list is a normal state for a freshly discovered account, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreatorMetrics {
    pub avg_likes: f64,
    pub avg_comments: f64,
    /// Mean play count over video posts only; 0 when the window has no videos.
    pub avg_views: f64,
    /// Posts per week over the window spanned by the supplied posts.
    pub post_frequency: f64,
    /// Mean per-post quality heuristic, 0-1.
    pub content_quality: f64,
    /// Engagement per follower over posts from the last 30 days before `now`.
    pub engagement_30_day: f64,
}

impl CreatorMetrics {
    pub const ZERO: CreatorMetrics = CreatorMetrics {
        avg_likes: 0.0,
        avg_comments: 0.0,
        avg_views: 0.0,
        post_frequency: 0.0,
        content_quality: 0.0,
        engagement_30_day: 0.0,
    };
}

/// Compute a creator's derived metrics from their post window.
///
/// `now` anchors the 30-day engagement window; callers pass a pinned time when
/// replaying a scraped snapshot, `Utc::now()` otherwise.
pub fn compute_metrics(creator: &Creator, posts: &[Post], now: DateTime<Utc>) -> CreatorMetrics {
    if posts.is_empty() {
        return CreatorMetrics::ZERO;
    }

    let count = posts.len() as f64;
    let total_likes: u64 = posts.iter().map(|p| p.likes).sum();
    let total_comments: u64 = posts.iter().map(|p| p.comments).sum();

    CreatorMetrics {
        avg_likes: total_likes as f64 / count,
        avg_comments: total_comments as f64 / count,
        avg_views: average_views(posts),
        post_frequency: post_frequency(posts),
        content_quality: content_quality(posts),
        engagement_30_day: engagement_30_day(creator, posts, now),
    }
}

/// Mean play count over the video subset. Zero when there are no videos,
/// which is distinct from videos that got zero plays.
fn average_views(posts: &[Post]) -> f64 {
    let plays: Vec<u64> = posts.iter().filter_map(Post::plays).collect();
    if plays.is_empty() {
        return 0.0;
    }
    plays.iter().sum::<u64>() as f64 / plays.len() as f64
}

/// Posts per week over the span between the earliest and latest timestamp.
/// A zero span (single post, or several at the same instant) is treated as
/// one week's worth of posting rather than dividing by zero.
fn post_frequency(posts: &[Post]) -> f64 {
    let earliest = posts.iter().map(|p| p.timestamp).min();
    let latest = posts.iter().map(|p| p.timestamp).max();
    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return 0.0;
    };

    let day_span = (latest - earliest).num_milliseconds() as f64 / 86_400_000.0;
    if day_span == 0.0 {
        return posts.len() as f64 * 7.0;
    }
    (posts.len() as f64 / day_span) * 7.0
}

/// Mean of a per-post quality heuristic: caption length, hashtag usage,
/// comment-to-like ratio, and a minimum-engagement floor. Each post capped at
/// 1.0 before averaging.
fn content_quality(posts: &[Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    let total: f64 = posts.iter().map(post_quality).sum();
    total / posts.len() as f64
}

fn post_quality(post: &Post) -> f64 {
    let mut score: f64 = 0.0;

    let caption_len = post.caption.chars().count();
    if caption_len > 50 {
        score += 0.2;
    }
    if caption_len > 150 {
        score += 0.2;
    }

    // 3-10 hashtags reads as deliberate tagging; more or fewer still beats none
    let tag_count = post.hashtags.len();
    if (3..=10).contains(&tag_count) {
        score += 0.2;
    } else if tag_count > 0 {
        score += 0.1;
    }

    let comment_ratio = post.comments as f64 / post.likes.max(1) as f64;
    if comment_ratio >= 0.02 {
        score += 0.2;
    } else if comment_ratio >= 0.01 {
        score += 0.1;
    }

    if post.likes >= 10 {
        score += 0.2;
    }

    score.min(1.0)
}

/// Average engagement per post over the last 30 days, normalized by follower
/// count. Zero followers or an empty recent window yield 0, not a fault.
fn engagement_30_day(creator: &Creator, posts: &[Post], now: DateTime<Utc>) -> f64 {
    if creator.estimated_followers == 0 {
        return 0.0;
    }

    let cutoff = now - Duration::days(30);
    let recent: Vec<&Post> = posts.iter().filter(|p| p.timestamp >= cutoff).collect();
    if recent.is_empty() {
        return 0.0;
    }

    let total_engagement: u64 = recent.iter().map(|p| p.engagement()).sum();
    let avg_per_post = total_engagement as f64 / recent.len() as f64;
    avg_per_post / creator.estimated_followers as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, PostKind};
    use chrono::TimeZone;

    fn pinned_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn sample_creator(followers: u64) -> Creator {
        Creator {
            username: "fitgirl".to_string(),
            platform: Platform::Instagram,
            estimated_followers: followers,
            engagement_rate: 0.0,
            bio: None,
            is_verified: false,
        }
    }

    fn photo(likes: u64, comments: u64, days_ago: i64, caption: &str, tags: usize) -> Post {
        Post {
            username: "fitgirl".to_string(),
            likes,
            comments,
            timestamp: pinned_now() - Duration::days(days_ago),
            caption: caption.to_string(),
            hashtags: (0..tags).map(|i| format!("tag{}", i)).collect(),
            kind: PostKind::Photo,
        }
    }

    fn video(likes: u64, comments: u64, days_ago: i64, plays: u64) -> Post {
        Post {
            username: "fitgirl".to_string(),
            likes,
            comments,
            timestamp: pinned_now() - Duration::days(days_ago),
            caption: String::new(),
            hashtags: vec![],
            kind: PostKind::Video { plays },
        }
    }

    #[test]
    fn test_empty_posts_yield_zero_metrics() {
        let metrics = compute_metrics(&sample_creator(10_000), &[], pinned_now());
        assert_eq!(metrics, CreatorMetrics::ZERO);
    }

    #[test]
    fn test_like_and_comment_averages() {
        let posts = vec![photo(100, 10, 1, "", 0), photo(300, 30, 2, "", 0)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert_eq!(metrics.avg_likes, 200.0);
        assert_eq!(metrics.avg_comments, 20.0);
    }

    #[test]
    fn test_avg_views_only_counts_videos() {
        let posts = vec![
            photo(100, 10, 1, "", 0),
            video(50, 5, 2, 4000),
            video(50, 5, 3, 2000),
        ];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert_eq!(metrics.avg_views, 3000.0);
    }

    #[test]
    fn test_no_videos_means_zero_views_not_nan() {
        let posts = vec![photo(100, 10, 1, "", 0)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert_eq!(metrics.avg_views, 0.0);
    }

    #[test]
    fn test_post_frequency_over_span() {
        // 10 posts spread over 18 days -> (10 / 18) * 7 posts per week
        let posts: Vec<Post> = (0..10).map(|i| photo(10, 1, i * 2, "", 0)).collect();
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert!((metrics.post_frequency - (10.0 / 18.0) * 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_post_frequency_zero_span() {
        // Two posts at the same instant: one week's worth, not a division by zero
        let posts = vec![photo(10, 1, 3, "", 0), photo(20, 2, 3, "", 0)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert_eq!(metrics.post_frequency, 14.0);
    }

    #[test]
    fn test_content_quality_full_marks() {
        let caption = "a".repeat(160);
        let posts = vec![photo(800, 40, 1, &caption, 5)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        // >150 chars (+0.4), 5 tags (+0.2), ratio 0.05 (+0.2), likes>=10 (+0.2), capped at 1
        assert_eq!(metrics.content_quality, 1.0);
    }

    #[test]
    fn test_content_quality_bare_post() {
        let posts = vec![photo(1, 0, 1, "", 0)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert_eq!(metrics.content_quality, 0.0);
    }

    #[test]
    fn test_content_quality_excessive_hashtags_get_partial_credit() {
        let posts = vec![photo(1, 0, 1, "", 15)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert!((metrics.content_quality - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_engagement_window_excludes_old_posts() {
        // Only the recent post counts: (90 + 10) / 10_000
        let posts = vec![photo(90, 10, 5, "", 0), photo(100_000, 0, 60, "", 0)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert!((metrics.engagement_30_day - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_engagement_zero_when_no_recent_posts() {
        let posts = vec![photo(500, 50, 45, "", 0)];
        let metrics = compute_metrics(&sample_creator(10_000), &posts, pinned_now());
        assert_eq!(metrics.engagement_30_day, 0.0);
    }

    #[test]
    fn test_engagement_zero_followers_is_zero_not_infinite() {
        let posts = vec![photo(500, 50, 5, "", 0)];
        let metrics = compute_metrics(&sample_creator(0), &posts, pinned_now());
        assert_eq!(metrics.engagement_30_day, 0.0);
        assert!(metrics.engagement_30_day.is_finite());
    }
}
