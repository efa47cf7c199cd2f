//! Social-media data collection for sovscan.
//!
//! Keyword-driven `YouTube` collection: search each keyword, fetch video
//! statistics and comment threads, and assemble `Record`s ready for the
//! metrics engine. Individual request failures are logged and degrade to
//! empty data; only client construction is fatal.

pub mod error;
pub mod types;
pub mod youtube;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use sovscan_metrics::{Platform, Record};

pub use error::CollectorError;
pub use types::{CollectedComment, VideoHit};
pub use youtube::YouTubeClient;

/// Collection limits and pacing.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub results_per_keyword: usize,
    pub comments_per_video: usize,
    pub inter_request_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            results_per_keyword: 15,
            comments_per_video: 50,
            inter_request_delay: Duration::from_millis(250),
        }
    }
}

/// Collect one `Record` per (keyword, video) pair.
///
/// Search failures for a keyword are logged and skipped; statistics or
/// comment failures for a video degrade to zero stats / no comments. Comment
/// threads are fetched once per distinct video even when several keywords
/// surface it.
pub async fn collect_for_keywords(
    client: &YouTubeClient,
    keywords: &[String],
    config: &CollectorConfig,
) -> Vec<Record> {
    let mut records = Vec::new();
    // Per-video cache: (stats, joined comments, summed comment likes, count).
    let mut fetched: HashMap<String, VideoData> = HashMap::new();

    for keyword in keywords {
        let hits = match client
            .search_videos(keyword, config.results_per_keyword)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "keyword search failed, skipping");
                continue;
            }
        };
        tracing::debug!(keyword = %keyword, videos = hits.len(), "keyword search complete");

        for hit in hits {
            if !fetched.contains_key(&hit.video_id) {
                let data = fetch_video_data(client, &hit.video_id, config).await;
                fetched.insert(hit.video_id.clone(), data);
                tokio::time::sleep(config.inter_request_delay).await;
            }
            let data = &fetched[&hit.video_id];
            records.push(build_record(&hit, keyword, data));
        }
    }

    tracing::info!(
        keywords = keywords.len(),
        records = records.len(),
        "collection complete"
    );
    records
}

struct VideoData {
    stats: sovscan_metrics::EngagementStats,
    all_comments: Option<String>,
    comment_likes: f64,
}

async fn fetch_video_data(
    client: &YouTubeClient,
    video_id: &str,
    config: &CollectorConfig,
) -> VideoData {
    let (stats, comments) = futures::future::join(
        client.video_stats(video_id),
        client.video_comments(video_id, config.comments_per_video),
    )
    .await;

    let stats = match stats {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(video = video_id, error = %e, "stats fetch failed, using zeros");
            sovscan_metrics::EngagementStats::default()
        }
    };

    let comments = match comments {
        Ok(comments) => comments,
        Err(e) => {
            tracing::warn!(video = video_id, error = %e, "comments fetch failed, skipping");
            Vec::new()
        }
    };

    let comment_likes = comments.iter().map(|c| c.likes.max(0.0)).sum();
    let all_comments = if comments.is_empty() {
        None
    } else {
        Some(
            comments
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };

    VideoData {
        stats,
        all_comments,
        comment_likes,
    }
}

fn build_record(hit: &VideoHit, keyword: &str, data: &VideoData) -> Record {
    let mut raw_text = format!("{} {}", hit.title, hit.description)
        .trim()
        .to_string();
    if let Some(comments) = &data.all_comments {
        raw_text.push(' ');
        raw_text.push_str(comments);
    }

    let mut record = Record::from_text(Platform::YouTube, &raw_text);
    record.title = hit.title.clone();
    record.description = hit.description.clone();
    record.channel_title = Some(hit.channel_title.clone());
    record.url = Some(format!("https://www.youtube.com/watch?v={}", hit.video_id));
    record.published_at = hit.published_at.as_deref().and_then(parse_timestamp);
    record.keyword = Some(keyword.to_string());
    record.all_comments = data.all_comments.clone();
    record.engagement = Some(data.stats);
    record.comment_likes = Some(data.comment_likes);
    record
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
