use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::youtube::Video;

/// Widest a title gets in the table before truncation.
const TITLE_WIDTH: usize = 60;

/// A video annotated with its final position in the ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedVideo {
    pub rank: usize,
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: String,
    pub url: String,
    pub duration_formatted: String,
}

/// Sort by view count (descending) and assign 1-based ranks.
/// The sort is stable, so tied counts keep their playlist order.
pub fn rank_videos(mut videos: Vec<Video>) -> Vec<RankedVideo> {
    videos.sort_by(|a, b| b.view_count.cmp(&a.view_count));

    videos
        .into_iter()
        .enumerate()
        .map(|(i, video)| {
            let duration_formatted = format_duration(&video.duration);
            RankedVideo {
                rank: i + 1,
                id: video.id,
                title: video.title,
                published_at: video.published_at,
                view_count: video.view_count,
                like_count: video.like_count,
                comment_count: video.comment_count,
                duration: video.duration,
                url: video.url,
                duration_formatted,
            }
        })
        .collect()
}

/// Render an ISO-8601 duration (e.g., PT1H2M10S) as a clock string.
/// Strings that do not match the expected shape, or whose numbers are too
/// large to parse, pass through unchanged.
pub fn format_duration(duration: &str) -> String {
    let re = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap();

    let Some(caps) = re.captures(duration) else {
        return duration.to_string();
    };

    let number = |group: usize| match caps.get(group) {
        Some(m) => m.as_str().parse::<u64>().ok(),
        None => Some(0),
    };

    let (Some(minutes), Some(seconds)) = (number(2), number(3)) else {
        return duration.to_string();
    };

    match caps.get(1) {
        Some(hours) => match hours.as_str().parse::<u64>() {
            Ok(hours) => format!("{}:{:02}:{:02}", hours, minutes, seconds),
            Err(_) => duration.to_string(),
        },
        None => format!("{}:{:02}", minutes, seconds),
    }
}

/// Abbreviate a counter for the table: 2_300_000 -> "2.3M", 1500 -> "1.5K"
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let cut: String = title.chars().take(TITLE_WIDTH - 3).collect();
    format!("{}...", cut)
}

/// Print the ranking to stdout: heading, total, then one row per video
pub fn print_table(channel: &str, videos: &[RankedVideo]) {
    let heading = format!("Videos for {} ranked by view count", channel);
    println!("{}", heading);
    println!("{}", "=".repeat(heading.len()));
    println!("Total videos: {}", videos.len());
    println!();

    println!(
        "{:<4}  {:>8}  {:>8}  {:>9}  {:<width$}  {}",
        "Rank",
        "Views",
        "Likes",
        "Duration",
        "Title",
        "URL",
        width = TITLE_WIDTH
    );

    for video in videos {
        println!(
            "{:<4}  {:>8}  {:>8}  {:>9}  {:<width$}  {}",
            video.rank,
            format_count(video.view_count),
            format_count(video.like_count),
            video.duration_formatted,
            truncate_title(&video.title),
            video.url,
            width = TITLE_WIDTH
        );
    }
}

/// Serialize the full ranked dataset (untruncated) as pretty-printed JSON
pub fn write_json(path: &Path, videos: &[RankedVideo]) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(videos)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str, views: u64) -> Video {
        Video {
            id: id.to_string(),
            title: title.to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            view_count: views,
            like_count: views / 10,
            comment_count: views / 100,
            duration: "PT5M".to_string(),
            url: format!("https://www.youtube.com/watch?v={}", id),
        }
    }

    #[test]
    fn format_duration_hours_pad_minutes_and_seconds() {
        assert_eq!(format_duration("PT1H2M10S"), "1:02:10");
        assert_eq!(format_duration("PT2H"), "2:00:00");
        assert_eq!(format_duration("PT1H5S"), "1:00:05");
    }

    #[test]
    fn format_duration_without_hours() {
        assert_eq!(format_duration("PT45S"), "0:45");
        assert_eq!(format_duration("PT5M"), "5:00");
        assert_eq!(format_duration("PT12M7S"), "12:07");
    }

    #[test]
    fn format_duration_passes_through_unrecognized() {
        assert_eq!(format_duration("P0D"), "P0D");
        assert_eq!(format_duration("1:02:10"), "1:02:10");
        assert_eq!(format_duration(""), "");
    }

    #[test]
    fn format_duration_passes_through_overflowing_numbers() {
        let huge_seconds = "PT99999999999999999999999S";
        assert_eq!(format_duration(huge_seconds), huge_seconds);
        let huge_minutes = "PT99999999999999999999999M5S";
        assert_eq!(format_duration(huge_minutes), huge_minutes);
        let huge_hours = "PT99999999999999999999999H";
        assert_eq!(format_duration(huge_hours), huge_hours);
    }

    #[test]
    fn format_count_abbreviates_thousands_and_millions() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(2_300_000), "2.3M");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn rank_videos_sorts_descending_and_numbers_from_one() {
        let ranked = rank_videos(vec![
            video("low", "Low", 10),
            video("high", "High", 1_000_000),
            video("mid", "Mid", 500),
        ]);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].id, "high");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].id, "mid");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].id, "low");
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn rank_videos_keeps_fetch_order_for_ties() {
        let ranked = rank_videos(vec![
            video("first", "First uploaded", 100),
            video("second", "Second uploaded", 100),
            video("third", "Third uploaded", 200),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn rank_videos_annotates_formatted_duration() {
        let ranked = rank_videos(vec![video("abc", "Clip", 1)]);
        assert_eq!(ranked[0].duration, "PT5M");
        assert_eq!(ranked[0].duration_formatted, "5:00");
    }

    #[test]
    fn truncate_title_cuts_at_sixty() {
        let title = "x".repeat(70);
        let cell = truncate_title(&title);
        assert_eq!(cell.chars().count(), 60);
        assert_eq!(cell, format!("{}...", "x".repeat(57)));

        let short = "short title";
        assert_eq!(truncate_title(short), short);
        let exact = "y".repeat(60);
        assert_eq!(truncate_title(&exact), exact);
    }

    #[test]
    fn truncate_title_counts_characters_not_bytes() {
        let title = "é".repeat(70);
        let cell = truncate_title(&title);
        assert_eq!(cell.chars().count(), 60);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn written_json_keeps_full_titles() {
        let long_title = "t".repeat(70);
        let ranked = rank_videos(vec![video("abc", &long_title, 5)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channel_videos.json");
        write_json(&path, &ranked).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["title"].as_str().unwrap().chars().count(), 70);
        assert_eq!(parsed[0]["rank"], 1);
        assert_eq!(parsed[0]["viewCount"], 5);
        assert_eq!(parsed[0]["durationFormatted"], "5:00");
        assert_eq!(
            parsed[0]["url"],
            "https://www.youtube.com/watch?v=abc"
        );
    }
}
