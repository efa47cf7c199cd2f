//! Enrichment stage: derives the per-record fields the metrics stage
//! consumes.
//!
//! Every derived field is computed only when genuinely absent, so running
//! enrichment over an already-enriched table changes nothing. Missing or
//! malformed engagement data yields zeros, never a failure; an empty table
//! is returned unchanged.

use sovscan_core::BrandCatalog;

use crate::mentions::{extract_brand_mentions, is_strict_target_mention};
use crate::record::{Record, SentimentLabel};
use crate::sentiment::SentimentScorer;
use crate::text::TextPreprocessor;

/// Enrich a record table in place.
pub fn enrich_records(
    records: &mut [Record],
    catalog: &BrandCatalog,
    preprocessor: &dyn TextPreprocessor,
    scorer: &dyn SentimentScorer,
) {
    if records.is_empty() {
        return;
    }

    // The percentile rank is the one cross-record derivation; everything else
    // is per-record.
    let scores: Vec<f64> = records
        .iter()
        .map(Record::effective_engagement_score)
        .collect();
    let norms = percentile_ranks(&scores);

    for (record, (score, norm)) in records.iter_mut().zip(scores.iter().zip(norms)) {
        if record.processed_text.is_none() {
            record.processed_text = Some(preprocessor.preprocess(&record.raw_text));
        }

        if record.engagement_score.is_none() {
            record.engagement_score = Some(*score);
        }
        if record.engagement_norm.is_none() {
            record.engagement_norm = Some(norm);
        }
        if record.visibility_weight.is_none() {
            record.visibility_weight = Some(record.derived_visibility_weight());
        }

        if record.brand_adjusted_sentiment.is_none() {
            let text = record.processed_text.as_deref().unwrap_or("");
            record.brand_adjusted_sentiment = Some(scorer.score(text));
        }
        if record.sentiment_overall.is_none() {
            let score = record.brand_adjusted_sentiment.unwrap_or(0.0);
            record.sentiment_overall = Some(SentimentLabel::classify(score));
        }

        // An empty mention list is treated as absent: a degraded reload can
        // leave one behind, and re-extraction is the documented default.
        let needs_mentions = record
            .brand_mentions
            .as_ref()
            .is_none_or(|mentions| mentions.is_empty());
        if needs_mentions {
            record.brand_mentions = Some(extract_brand_mentions(&record.raw_text, catalog));
        }
        if record.target_mention.is_none() {
            let mentions = record.brand_mentions.as_deref().unwrap_or(&[]);
            record.target_mention = Some(is_strict_target_mention(mentions, catalog));
        }

        if record.comment_count.is_none() {
            record.comment_count = Some(record.derived_comment_count());
        }
        if record.eng_value.is_none() {
            record.eng_value = Some(record.derived_eng_value());
        }
    }

    tracing::debug!(records = records.len(), "enriched record table");
}

/// Percentile ranks in `[0, 1]` over the positive scores, average-rank
/// tie handling (pandas `rank(pct=True)` semantics). Records with a
/// non-positive score rank 0; if no score is positive, every rank is 0.
fn percentile_ranks(scores: &[f64]) -> Vec<f64> {
    let positive: Vec<f64> = scores.iter().copied().filter(|s| *s > 0.0).collect();
    if positive.is_empty() {
        return vec![0.0; scores.len()];
    }

    #[allow(clippy::cast_precision_loss)]
    let n = positive.len() as f64;
    scores
        .iter()
        .map(|&score| {
            if score <= 0.0 {
                return 0.0;
            }
            #[allow(clippy::cast_precision_loss)]
            let below = positive.iter().filter(|&&p| p < score).count() as f64;
            #[allow(clippy::cast_precision_loss)]
            let tied = positive.iter().filter(|&&p| p == score).count() as f64;
            // 1-based average rank of the tie group.
            let avg_rank = below + (tied + 1.0) / 2.0;
            avg_rank / n
        })
        .collect()
}
