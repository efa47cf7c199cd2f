//! Wire types for the `YouTube` Data API v3 responses the collector consumes.

use serde::Deserialize;

// --- search endpoint -------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    #[serde(default)]
    pub id: SearchItemId,
    #[serde(default)]
    pub snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
}

// --- videos endpoint -------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
    #[serde(default)]
    pub statistics: VideoStatistics,
}

/// The API returns counters as decimal strings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct VideoStatistics {
    #[serde(rename = "viewCount", default)]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount", default)]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount", default)]
    pub comment_count: Option<String>,
}

// --- commentThreads endpoint -----------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadsResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    #[serde(default)]
    pub snippet: Option<CommentThreadSnippet>,
    #[serde(default)]
    pub replies: Option<Replies>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<Comment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Replies {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Comment {
    #[serde(default)]
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommentSnippet {
    #[serde(rename = "textDisplay", default)]
    pub text_display: String,
    #[serde(rename = "likeCount", default)]
    pub like_count: f64,
}

// --- collector-facing shapes -----------------------------------------------

/// One video returned by keyword search.
#[derive(Debug, Clone)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: Option<String>,
}

/// One fetched comment (top-level or reply).
#[derive(Debug, Clone)]
pub struct CollectedComment {
    pub text: String,
    pub likes: f64,
}
