use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{ScoredCreator, Tier};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a count in compact notation (1.5k, 2.3M, 847)
pub fn format_compact(n: u64) -> String {
    let formatted = if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted.replace(".0M", "M").replace(".0k", "k")
}

fn tier_label(overall: f64) -> String {
    match Tier::of(overall) {
        Some(tier) => tier.to_string(),
        None => "-".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked creators as a table with columns:
/// Index, Score, Tier, Handle, Followers, Bio
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column: overall with 2 decimals; tier column: 10 chars, left-aligned
pub fn format_ranked_table(creators: &[ScoredCreator], use_colors: bool) -> String {
    if creators.is_empty() {
        return "No creators found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let tier_width = 10;
    let followers_width = 6;
    let separator = "  ";

    creators
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:.2}", scored.score.overall);
            let tier_str = format!("{:<width$}", tier_label(scored.score.overall), width = tier_width);
            let handle = scored.creator.short_ref();
            let followers_str = format!(
                "{:>width$}",
                format_compact(scored.creator.estimated_followers),
                width = followers_width
            );

            // Bio fills whatever width remains on the line
            let bio = scored.creator.bio.as_deref().unwrap_or("");
            let fixed_width = index_width
                + score_str.len()
                + tier_width
                + handle.len()
                + followers_width
                + separator.len() * 5;
            let bio = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_text(bio, width - fixed_width),
                Some(_) => String::new(),
                None => bio.to_string(),
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}{}{}{}{}",
                    index_str,
                    separator,
                    score_str.bold(),
                    separator,
                    tier_str.green(),
                    separator,
                    handle.cyan(),
                    separator,
                    followers_str.yellow(),
                    separator,
                    bio
                )
            } else {
                format!(
                    "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                    index_str,
                    score_str,
                    tier_str,
                    handle,
                    followers_str,
                    bio,
                    sep = separator
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single scored creator with detailed multi-line output
/// (for verbose mode)
pub fn format_creator_detail(scored: &ScoredCreator, use_colors: bool) -> String {
    let score = &scored.score;
    let metrics = &scored.metrics;
    let followers = format_compact(scored.creator.estimated_followers);
    let tier = tier_label(score.overall);

    let header = if use_colors {
        format!("{}", scored.creator.short_ref().bold())
    } else {
        scored.creator.short_ref()
    };

    format!(
        "{}\n  Overall: {:.2} ({})\n  Growth potential: {:.2}\n  Engagement quality: {:.2}\n  Content consistency: {:.2}\n  Audience quality: {:.2}\n  Niche relevance: {:.2}\n  Followers: {}\n  Avg likes/comments: {:.0} / {:.0}\n  Posts per week: {:.1}\n  Content quality: {:.2}\n  30-day engagement: {:.1}%",
        header,
        score.overall,
        tier,
        score.growth_potential,
        score.engagement_quality,
        score.content_consistency,
        score.audience_quality,
        score.niche_relevance,
        followers,
        metrics.avg_likes,
        metrics.avg_comments,
        metrics.post_frequency,
        metrics.content_quality,
        metrics.engagement_30_day * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Creator, Platform};
    use crate::scoring::{CreatorMetrics, CreatorScore};

    fn sample_scored(username: &str, overall: f64, followers: u64) -> ScoredCreator {
        ScoredCreator {
            creator: Creator {
                username: username.to_string(),
                platform: Platform::Instagram,
                estimated_followers: followers,
                engagement_rate: 0.0,
                bio: Some("Strength coach".to_string()),
                is_verified: false,
            },
            metrics: CreatorMetrics::ZERO,
            score: CreatorScore {
                overall,
                growth_potential: overall,
                engagement_quality: overall,
                content_consistency: overall,
                audience_quality: overall,
                niche_relevance: overall,
            },
        }
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(847), "847");
        assert_eq!(format_compact(1_000), "1k");
        assert_eq!(format_compact(1_500), "1.5k");
        assert_eq!(format_compact(12_500), "12.5k");
        assert_eq!(format_compact(2_300_000), "2.3M");
        assert_eq!(format_compact(1_000_000), "1M");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a very long bio indeed", 10), "a very ...");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_ranked_table(&[], false), "No creators found.");
    }

    #[test]
    fn test_table_row_contents() {
        let rows = vec![
            sample_scored("alpha", 0.93, 12_500),
            sample_scored("bravo", 0.52, 900),
        ];
        let output = format_ranked_table(&rows, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("0.93"));
        assert!(lines[0].contains("premium"));
        assert!(lines[0].contains("instagram/@alpha"));
        assert!(lines[0].contains("12.5k"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("acceptable"));
    }

    #[test]
    fn test_below_threshold_tier_is_dash() {
        let rows = vec![sample_scored("weak", 0.2, 100)];
        let output = format_ranked_table(&rows, false);
        assert!(output.contains("  -   "));
    }

    #[test]
    fn test_detail_lists_sub_scores() {
        let detail = format_creator_detail(&sample_scored("alpha", 0.93, 12_500), false);
        assert!(detail.starts_with("instagram/@alpha"));
        assert!(detail.contains("Overall: 0.93 (premium)"));
        assert!(detail.contains("Growth potential: 0.93"));
        assert!(detail.contains("Followers: 12.5k"));
        assert!(detail.contains("30-day engagement: 0.0%"));
    }
}
