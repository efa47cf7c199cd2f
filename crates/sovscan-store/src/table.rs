//! Record ↔ CSV row mapping.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sovscan_metrics::{EngagementStats, Platform, Record, SentimentLabel};

use crate::StoreError;

/// Flat CSV row. Structured values are JSON text inside their cells.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TableRow {
    platform: String,
    title: String,
    description: String,
    channel_title: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    keyword: Option<String>,
    raw_text: String,
    all_comments: Option<String>,
    /// JSON object, e.g. `{"views":100,"likes":2,...}`.
    engagement_metrics: Option<String>,
    comment_likes: Option<f64>,
    processed_text: Option<String>,
    brand_adjusted_sentiment: Option<f64>,
    sentiment_overall: Option<SentimentLabel>,
    engagement_score: Option<f64>,
    engagement_norm: Option<f64>,
    visibility_weight: Option<f64>,
    /// JSON array of canonical brand names.
    brand_mentions: Option<String>,
    target_mention: Option<bool>,
    eng_value: Option<f64>,
    comment_count: Option<usize>,
}

impl TableRow {
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            platform: record.platform.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            channel_title: record.channel_title.clone(),
            url: record.url.clone(),
            published_at: record.published_at.map(|dt| dt.to_rfc3339()),
            keyword: record.keyword.clone(),
            raw_text: record.raw_text.clone(),
            all_comments: record.all_comments.clone(),
            engagement_metrics: record
                .engagement
                .as_ref()
                .and_then(|stats| serde_json::to_string(stats).ok()),
            comment_likes: record.comment_likes,
            processed_text: record.processed_text.clone(),
            brand_adjusted_sentiment: record.brand_adjusted_sentiment,
            sentiment_overall: record.sentiment_overall,
            engagement_score: record.engagement_score,
            engagement_norm: record.engagement_norm,
            visibility_weight: record.visibility_weight,
            brand_mentions: record
                .brand_mentions
                .as_ref()
                .and_then(|mentions| serde_json::to_string(mentions).ok()),
            target_mention: record.target_mention,
            eng_value: record.eng_value,
            comment_count: record.comment_count,
        }
    }

    pub(crate) fn into_record(self) -> Record {
        let engagement = self
            .engagement_metrics
            .as_deref()
            .and_then(parse_structured::<EngagementStats>);
        let brand_mentions = self
            .brand_mentions
            .as_deref()
            .and_then(parse_structured::<Vec<String>>);

        Record {
            platform: Platform::from(self.platform),
            title: self.title,
            description: self.description,
            channel_title: self.channel_title,
            url: self.url,
            published_at: self.published_at.as_deref().and_then(parse_timestamp),
            keyword: self.keyword,
            raw_text: self.raw_text,
            all_comments: self.all_comments,
            engagement,
            comment_likes: self.comment_likes,
            processed_text: self.processed_text,
            brand_adjusted_sentiment: self.brand_adjusted_sentiment,
            sentiment_overall: self.sentiment_overall,
            engagement_score: self.engagement_score,
            engagement_norm: self.engagement_norm,
            visibility_weight: self.visibility_weight,
            brand_mentions,
            target_mention: self.target_mention,
            eng_value: self.eng_value,
            comment_count: self.comment_count,
        }
    }
}

/// Parse a JSON-encoded structured cell; malformed text degrades to `None`
/// so a damaged file still loads and the metrics engine re-derives.
fn parse_structured<T: serde::de::DeserializeOwned>(cell: &str) -> Option<T> {
    if cell.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(cell) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "structured cell failed to parse, treating as absent");
            None
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Write a record table to `path` as CSV.
///
/// # Errors
///
/// Returns [`StoreError`] on I/O or serialization failure.
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(TableRow::from_record(record))?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), records = records.len(), "saved record table");
    Ok(())
}

/// Load a record table from `path`.
///
/// Structured cells that fail to parse degrade to absent fields; a row that
/// does not match the schema at all is an error.
///
/// # Errors
///
/// Returns [`StoreError`] on I/O or CSV-level failure.
pub fn load_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<TableRow>() {
        records.push(row?.into_record());
    }
    tracing::info!(path = %path.display(), records = records.len(), "loaded record table");
    Ok(records)
}
