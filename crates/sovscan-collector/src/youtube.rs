//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with typed response deserialization and API-key
//! management. Only the three endpoints the collector needs are covered:
//! keyword search, video statistics, and comment threads.

use std::time::Duration;

use reqwest::{Client, Url};

use sovscan_metrics::EngagementStats;

use crate::error::CollectorError;
use crate::types::{
    CollectedComment, CommentThreadsResponse, SearchResponse, VideoHit, VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the `YouTube` Data API v3.
///
/// Use [`YouTubeClient::new`] for production or
/// [`YouTubeClient::with_base_url`] to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CollectorError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CollectorError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: a trailing slash makes Url::join treat the last segment
        // as a directory rather than replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| CollectorError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches for videos by keyword, relevance-ordered.
    ///
    /// Items without a video id (channels, playlists) are skipped.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::Api`] on a non-2xx response status.
    /// - [`CollectorError::Http`] on network failure.
    /// - [`CollectorError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_videos(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<VideoHit>, CollectorError> {
        let max_results = max_results.min(50).to_string();
        let body = self
            .request_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", keyword),
                    ("type", "video"),
                    ("maxResults", &max_results),
                    ("order", "relevance"),
                ],
            )
            .await?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| CollectorError::Deserialize {
                context: format!("search(q={keyword})"),
                source: e,
            })?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(VideoHit {
                    video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    channel_title: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                })
            })
            .collect())
    }

    /// Fetches view/like/comment counters for one video and derives the
    /// scalar engagement score.
    ///
    /// An unknown video id yields all-zero stats rather than an error.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YouTubeClient::search_videos`].
    pub async fn video_stats(&self, video_id: &str) -> Result<EngagementStats, CollectorError> {
        let body = self
            .request_json("videos", &[("part", "statistics"), ("id", video_id)])
            .await?;

        let response: VideoListResponse =
            serde_json::from_value(body).map_err(|e| CollectorError::Deserialize {
                context: format!("videos(id={video_id})"),
                source: e,
            })?;

        let Some(item) = response.items.into_iter().next() else {
            return Ok(EngagementStats::default());
        };

        let views = parse_count(item.statistics.view_count.as_deref());
        let likes = parse_count(item.statistics.like_count.as_deref());
        let comments = parse_count(item.statistics.comment_count.as_deref());

        Ok(EngagementStats {
            views,
            likes,
            comments,
            engagement_score: engagement_score(views, likes, comments),
        })
    }

    /// Fetches comment threads for one video, plain text, replies included.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YouTubeClient::search_videos`].
    pub async fn video_comments(
        &self,
        video_id: &str,
        max_results: usize,
    ) -> Result<Vec<CollectedComment>, CollectorError> {
        let max_results = max_results.min(100).to_string();
        let body = self
            .request_json(
                "commentThreads",
                &[
                    ("part", "snippet,replies"),
                    ("videoId", video_id),
                    ("maxResults", &max_results),
                    ("order", "relevance"),
                    ("textFormat", "plainText"),
                ],
            )
            .await?;

        let response: CommentThreadsResponse =
            serde_json::from_value(body).map_err(|e| CollectorError::Deserialize {
                context: format!("commentThreads(videoId={video_id})"),
                source: e,
            })?;

        let mut comments = Vec::new();
        for thread in response.items {
            let top = thread
                .snippet
                .and_then(|s| s.top_level_comment)
                .and_then(|c| c.snippet);
            if let Some(snippet) = top {
                if !snippet.text_display.is_empty() {
                    comments.push(CollectedComment {
                        text: snippet.text_display,
                        likes: snippet.like_count,
                    });
                }
            }
            if let Some(replies) = thread.replies {
                for reply in replies.comments {
                    if let Some(snippet) = reply.snippet {
                        if !snippet.text_display.is_empty() {
                            comments.push(CollectedComment {
                                text: snippet.text_display,
                                likes: snippet.like_count,
                            });
                        }
                    }
                }
            }
        }

        Ok(comments)
    }

    async fn request_json(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, CollectorError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| CollectorError::Api(format!("invalid endpoint '{endpoint}': {e}")))?;

        let mut request = self.client.get(url).query(&[("key", &self.api_key)]);
        request = request.query(params);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::Api(format!(
                "{endpoint} request failed with status {status}"
            )));
        }

        Ok(response.json().await?)
    }
}

/// Parse a decimal-string counter; missing or malformed values become 0.
fn parse_count(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
        .max(0.0)
}

/// Scalar engagement score: `(likes + comments*3) / max(views/1000, 1)`.
pub(crate) fn engagement_score(views: f64, likes: f64, comments: f64) -> f64 {
    (likes + comments * 3.0) / (views / 1000.0).max(1.0)
}
