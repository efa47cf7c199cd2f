//! The record model: one row per collected post/video, plus the derived
//! fields added by enrichment.
//!
//! Every derived field is an `Option` with a documented default and is
//! computed only when genuinely absent from upstream input, so enrichment is
//! idempotent and a degraded reload (structured CSV cells that failed to
//! parse) simply triggers re-derivation downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};

/// Source platform of a record.
///
/// Serialized as its display string so the value survives a CSV round trip;
/// unknown strings deserialize into `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    YouTube,
    Google,
    Instagram,
    Other(String),
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        match s.as_str() {
            "YouTube" => Self::YouTube,
            "Google" => Self::Google,
            "Instagram" => Self::Instagram,
            _ => Self::Other(s),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YouTube => write!(f, "YouTube"),
            Self::Google => write!(f, "Google"),
            Self::Instagram => write!(f, "Instagram"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Raw engagement counters as supplied by the collection layer.
///
/// All values are non-negative; zero stands in for "unavailable".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementStats {
    #[serde(default)]
    pub views: f64,
    #[serde(default)]
    pub likes: f64,
    #[serde(default)]
    pub comments: f64,
    #[serde(default)]
    pub engagement_score: f64,
}

/// Coarse sentiment class derived from the polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a polarity score: `> 0.1` positive, `< -0.1` negative,
    /// neutral otherwise.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// One collected post/video with optional derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub platform: Platform,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Search keyword that produced this record; `None` means "all".
    #[serde(default)]
    pub keyword: Option<String>,
    /// Title + description, optionally concatenated with joined comment text.
    #[serde(default)]
    pub raw_text: String,
    /// Newline-joined raw comment text, when comments were fetched.
    #[serde(default)]
    pub all_comments: Option<String>,
    /// Raw engagement counters; `None` when the collection layer had none.
    #[serde(default)]
    pub engagement: Option<EngagementStats>,
    /// Summed like counts on fetched comments. Default 0.
    #[serde(default)]
    pub comment_likes: Option<f64>,

    // Derived fields (enrichment). Defaults documented per field; each is
    // computed only when absent.
    /// Normalized text for scoring. Default: preprocess(raw_text).
    #[serde(default)]
    pub processed_text: Option<String>,
    /// Signed polarity score. Default: scorer(processed_text).
    #[serde(default)]
    pub brand_adjusted_sentiment: Option<f64>,
    /// Coarse class of `brand_adjusted_sentiment`. Default: classify().
    #[serde(default)]
    pub sentiment_overall: Option<SentimentLabel>,
    /// Scalar engagement score. Default: `engagement.engagement_score`, 0 when absent.
    #[serde(default)]
    pub engagement_score: Option<f64>,
    /// Percentile rank in `[0, 1]` among positive-engagement records. Default 0.
    #[serde(default)]
    pub engagement_norm: Option<f64>,
    /// Log-dampened view weight. Default: see [`Record::derived_visibility_weight`].
    #[serde(default)]
    pub visibility_weight: Option<f64>,
    /// Canonical brand names found in the text. Default: extracted from raw_text.
    #[serde(default)]
    pub brand_mentions: Option<Vec<String>>,
    /// Strict target-brand mention flag. Default: derived from `brand_mentions`.
    #[serde(default)]
    pub target_mention: Option<bool>,
    /// Raw composite engagement value. Default: see [`Record::derived_eng_value`].
    #[serde(default)]
    pub eng_value: Option<f64>,
    /// Number of non-blank comment lines. Default: counted from `all_comments`.
    #[serde(default)]
    pub comment_count: Option<usize>,
}

impl Record {
    /// A bare record with no engagement data and no derived fields.
    #[must_use]
    pub fn from_text(platform: Platform, raw_text: &str) -> Self {
        Self {
            platform,
            title: String::new(),
            description: String::new(),
            channel_title: None,
            url: None,
            published_at: None,
            keyword: None,
            raw_text: raw_text.to_string(),
            all_comments: None,
            engagement: None,
            comment_likes: None,
            processed_text: None,
            brand_adjusted_sentiment: None,
            sentiment_overall: None,
            engagement_score: None,
            engagement_norm: None,
            visibility_weight: None,
            brand_mentions: None,
            target_mention: None,
            eng_value: None,
            comment_count: None,
        }
    }

    /// Joined comment text, empty when no comments were fetched.
    #[must_use]
    pub fn comments_text(&self) -> &str {
        self.all_comments.as_deref().unwrap_or("")
    }

    /// Scalar engagement score: the derived field when present, otherwise the
    /// raw counter, floored at zero. Missing data yields 0, never an error.
    #[must_use]
    pub fn effective_engagement_score(&self) -> f64 {
        self.engagement_score
            .or_else(|| self.engagement.map(|stats| stats.engagement_score))
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// Count of non-blank lines in the joined comment text.
    #[must_use]
    pub fn derived_comment_count(&self) -> usize {
        self.comments_text()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
    }

    /// Raw composite engagement value:
    /// `views/1000 + likes*2 + comments*3 + comment_likes`, falling back to
    /// `comment_count + comment_likes` when the primary formula is non-positive
    /// but comment activity exists.
    #[must_use]
    pub fn derived_eng_value(&self) -> f64 {
        let comment_likes = self.comment_likes.unwrap_or(0.0).max(0.0);
        let base = self.engagement.map_or(0.0, |stats| {
            stats.views.max(0.0) / 1000.0
                + stats.likes.max(0.0) * 2.0
                + stats.comments.max(0.0) * 3.0
                + comment_likes
        });
        #[allow(clippy::cast_precision_loss)]
        let comment_count = self
            .comment_count
            .unwrap_or_else(|| self.derived_comment_count()) as f64;
        if base <= 0.0 && (comment_count > 0.0 || comment_likes > 0.0) {
            comment_count + comment_likes
        } else {
            base
        }
    }

    /// Visibility weight: `min(5.0, log10(max(views, 1) + 1))` for YouTube
    /// records, `1.0` for everything else. The cap keeps viral outliers from
    /// dominating aggregate visibility share.
    #[must_use]
    pub fn derived_visibility_weight(&self) -> f64 {
        if self.platform == Platform::YouTube {
            let views = self.engagement.map_or(0.0, |stats| stats.views).max(1.0);
            (views + 1.0).log10().min(5.0)
        } else {
            1.0
        }
    }
}
