//! Metrics computation stage: produces the share-of-voice report from an
//! enriched record table.
//!
//! The report is an immutable snapshot computed in one pass over the table.
//! Any derived field that is absent on a record (e.g. after a degraded CSV
//! reload) is re-derived internally, so the stage never fails: every zero
//! denominator and empty subset yields `0`, never NaN and never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sovscan_core::BrandCatalog;

use crate::mentions::{
    count_occurrences, extract_brand_mentions, is_broad_target_presence, is_strict_target_mention,
};
use crate::record::{Platform, Record};
use crate::sentiment::{SentimentScorer, POSITIVE_THRESHOLD};

/// Floor for the composite-weight total; an all-zero weight configuration
/// yields an all-zero composite instead of a division by zero.
const MIN_WEIGHT_TOTAL: f64 = 1e-6;

/// Floor for the benchmark share denominators (summed norms/visibility).
const BENCHMARK_DENOM_FLOOR: f64 = 1e-9;

/// Weights of the four composite dimensions. Non-negative; renormalized to
/// sum to 1 before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SovWeights {
    pub basic: f64,
    pub engagement: f64,
    pub sentiment: f64,
    pub visibility: f64,
}

impl Default for SovWeights {
    fn default() -> Self {
        Self {
            basic: 0.40,
            engagement: 0.30,
            sentiment: 0.20,
            visibility: 0.10,
        }
    }
}

impl SovWeights {
    /// Weights divided by their total, with the total floored at `1e-6`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = (self.basic + self.engagement + self.sentiment + self.visibility)
            .max(MIN_WEIGHT_TOTAL);
        Self {
            basic: self.basic / total,
            engagement: self.engagement / total,
            sentiment: self.sentiment / total,
            visibility: self.visibility / total,
        }
    }

    /// Weighted blend of the four dimension scores, using normalized weights.
    ///
    /// Applied identically to the report-level composite and every
    /// benchmark entry so all brands are scored by the same formula.
    #[must_use]
    pub fn composite(&self, basic: f64, engagement: f64, sentiment: f64, visibility: f64) -> f64 {
        let w = self.normalized();
        w.basic * basic + w.engagement * engagement + w.sentiment * sentiment
            + w.visibility * visibility
    }
}

/// Options for metrics computation.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub weights: SovWeights,
    /// Platform excluded from the per-platform breakdown.
    pub excluded_platform: Option<Platform>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            weights: SovWeights::default(),
            excluded_platform: Some(Platform::Instagram),
        }
    }
}

/// Per-competitor benchmark numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorStats {
    /// Records mentioning this competitor.
    pub records: usize,
    /// Share of all records, in percent.
    pub sov: f64,
    pub avg_sentiment: f64,
    pub avg_engagement: f64,
    /// Percent of mentioning records with positive sentiment.
    pub positive_rate: f64,
    /// Summed raw engagement value over mentioning records. Unbounded.
    pub eng_value_sum: f64,
}

/// Per-brand scores along the four SoV dimensions plus the composite,
/// computed symmetrically for the target and every competitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandBenchmark {
    pub basic_sov: f64,
    pub engagement_sov: f64,
    pub sentiment_positive_rate: f64,
    pub visibility_sov: f64,
    pub composite_sov: f64,
    /// Unbounded raw total.
    pub eng_value_sum: f64,
    pub records: usize,
}

/// Raw audit totals behind `engagement_sov` and `comments_sov`. Unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngagementTotals {
    pub eng_value_total: f64,
    pub eng_value_target: f64,
    pub comment_mentions_total: usize,
    pub comment_mentions_target: usize,
}

/// The share-of-voice report. All `*_sov`, `*_rate` fields are percentages
/// in `[0, 100]`; zero denominators yield exactly `0`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SovReport {
    /// Broad-presence share.
    pub presence_rate: f64,
    /// Strict-mention share.
    pub basic_sov: f64,
    pub engagement_sov: f64,
    pub sentiment_sov: f64,
    pub quality_sov: f64,
    pub visibility_weighted_sov: f64,
    /// Occurrence-level share within comment text.
    pub comments_sov: f64,
    pub composite_sov: f64,
    /// Strict-mention share per platform, excluded platform omitted.
    pub platform_sov: BTreeMap<String, f64>,
    pub total_records: usize,
    /// Records with the strict target-mention flag.
    pub target_mentions: usize,
    pub competitor_mentions: BTreeMap<String, CompetitorStats>,
    pub brand_benchmark: BTreeMap<String, BrandBenchmark>,
    pub totals: EngagementTotals,
}

/// Per-record values the metrics aggregate over, with absent derived fields
/// re-derived per the enrichment defaults.
struct RecordView {
    mentions: Vec<String>,
    strict: bool,
    broad: bool,
    /// Raw engagement value, floored at 1.0 for broad-present records so a
    /// flagged record without stats still registers.
    eng_value: f64,
    engagement_norm: f64,
    sentiment: f64,
    visibility: f64,
}

fn build_view(record: &Record, catalog: &BrandCatalog, scorer: &dyn SentimentScorer) -> RecordView {
    let mentions = match &record.brand_mentions {
        Some(mentions) if !mentions.is_empty() => mentions.clone(),
        _ => extract_brand_mentions(&record.raw_text, catalog),
    };
    let strict = record
        .target_mention
        .unwrap_or_else(|| is_strict_target_mention(&mentions, catalog));
    let broad = is_broad_target_presence(record, strict, catalog);

    // Fields documented as non-negative are floored at zero on read, so a
    // malformed reload cannot push a share metric outside [0, 100].
    let raw_eng = record
        .eng_value
        .unwrap_or_else(|| record.derived_eng_value())
        .max(0.0);
    let eng_value = if broad { raw_eng.max(1.0) } else { raw_eng };

    let sentiment = record.brand_adjusted_sentiment.unwrap_or_else(|| {
        scorer.score(record.processed_text.as_deref().unwrap_or(&record.raw_text))
    });

    RecordView {
        mentions,
        strict,
        broad,
        eng_value,
        engagement_norm: record.engagement_norm.unwrap_or(0.0).max(0.0),
        sentiment,
        visibility: record
            .visibility_weight
            .unwrap_or_else(|| record.derived_visibility_weight())
            .max(0.0),
    }
}

/// Compute the share-of-voice report for one record table.
///
/// Pure and infallible: an empty table yields an all-zero report with empty
/// maps, and every zero-denominator metric is exactly `0`.
#[must_use]
#[allow(clippy::too_many_lines)]
#[allow(clippy::cast_precision_loss)]
pub fn compute_metrics(
    records: &[Record],
    catalog: &BrandCatalog,
    scorer: &dyn SentimentScorer,
    config: &MetricsConfig,
) -> SovReport {
    if records.is_empty() {
        tracing::debug!("empty record table, returning zero report");
        return SovReport::default();
    }

    let views: Vec<RecordView> = records
        .iter()
        .map(|record| build_view(record, catalog, scorer))
        .collect();

    let total_records = records.len();
    let total = total_records as f64;

    let target_mentions = views.iter().filter(|v| v.strict).count();
    let broad_count = views.iter().filter(|v| v.broad).count();

    let basic_sov = target_mentions as f64 / total * 100.0;
    let presence_rate = broad_count as f64 / total * 100.0;

    // Comments SoV: each occurrence is a unit, canonical names only.
    let mut comment_mentions_target = 0usize;
    let mut comment_mentions_total = 0usize;
    for record in records {
        let comments = record.comments_text();
        comment_mentions_target += count_occurrences(comments, &catalog.target.name);
        for brand in catalog.brands() {
            comment_mentions_total += count_occurrences(comments, &brand.name);
        }
    }
    let comments_sov = if comment_mentions_total > 0 {
        comment_mentions_target as f64 / comment_mentions_total as f64 * 100.0
    } else {
        0.0
    };

    // Engagement SoV over the floored values.
    let eng_value_total: f64 = views.iter().map(|v| v.eng_value).sum();
    let eng_value_target: f64 = views.iter().filter(|v| v.broad).map(|v| v.eng_value).sum();
    let engagement_sov = if eng_value_total > 0.0 {
        eng_value_target / eng_value_total * 100.0
    } else {
        0.0
    };

    // Sentiment SoV: per-record positive rate over comment lines mentioning
    // the target, averaged over records with at least one such line.
    let target_lower = catalog.target.name.to_lowercase();
    let mut positive_rates = Vec::new();
    for record in records {
        let mut lines = 0usize;
        let mut positives = 0usize;
        for line in record.comments_text().lines() {
            if !line.to_lowercase().contains(&target_lower) {
                continue;
            }
            lines += 1;
            if scorer.score(line) > POSITIVE_THRESHOLD {
                positives += 1;
            }
        }
        if lines > 0 {
            positive_rates.push(positives as f64 / lines as f64 * 100.0);
        }
    }
    let sentiment_sov = if positive_rates.is_empty() {
        0.0
    } else {
        positive_rates.iter().sum::<f64>() / positive_rates.len() as f64
    };

    // Quality SoV over the positive-engagement subset.
    let quality_target: f64 = views
        .iter()
        .filter(|v| v.engagement_norm > 0.0 && v.strict)
        .map(|v| v.engagement_norm * v.sentiment)
        .sum();
    let quality_total: f64 = views
        .iter()
        .filter(|v| v.engagement_norm > 0.0)
        .map(|v| v.engagement_norm * v.sentiment)
        .sum();
    // Negative sentiment in the mix can push the raw ratio outside [0, 100];
    // the reported share stays clamped to percentage bounds.
    let quality_sov = if quality_total > 0.0 {
        (quality_target / quality_total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    // Visibility share over strict mentions.
    let visibility_total: f64 = views.iter().map(|v| v.visibility).sum();
    let visibility_target: f64 = views.iter().filter(|v| v.strict).map(|v| v.visibility).sum();
    let visibility_weighted_sov = if visibility_total > 0.0 {
        visibility_target / visibility_total * 100.0
    } else {
        0.0
    };

    let composite_sov = config.weights.composite(
        basic_sov,
        engagement_sov,
        sentiment_sov,
        visibility_weighted_sov,
    );

    // Per-platform strict-mention share.
    let mut platform_sov = BTreeMap::new();
    let platforms: Vec<Platform> = {
        let mut seen = Vec::new();
        for record in records {
            if !seen.contains(&record.platform) {
                seen.push(record.platform.clone());
            }
        }
        seen
    };
    for platform in platforms {
        if config.excluded_platform.as_ref() == Some(&platform) {
            continue;
        }
        let subset: Vec<&RecordView> = records
            .iter()
            .zip(&views)
            .filter(|(record, _)| record.platform == platform)
            .map(|(_, view)| view)
            .collect();
        if subset.is_empty() {
            continue;
        }
        let strict = subset.iter().filter(|v| v.strict).count();
        platform_sov.insert(
            platform.to_string(),
            strict as f64 / subset.len() as f64 * 100.0,
        );
    }

    // Competitor summaries, only for competitors with at least one mention.
    let mut competitor_mentions = BTreeMap::new();
    for competitor in &catalog.competitors {
        let subset: Vec<&RecordView> = views
            .iter()
            .filter(|v| {
                v.mentions
                    .iter()
                    .any(|m| m.eq_ignore_ascii_case(&competitor.name))
            })
            .collect();
        if subset.is_empty() {
            continue;
        }
        let n = subset.len() as f64;
        let positive = subset
            .iter()
            .filter(|v| v.sentiment > POSITIVE_THRESHOLD)
            .count();
        competitor_mentions.insert(
            competitor.name.clone(),
            CompetitorStats {
                records: subset.len(),
                sov: n / total * 100.0,
                avg_sentiment: subset.iter().map(|v| v.sentiment).sum::<f64>() / n,
                avg_engagement: subset.iter().map(|v| v.engagement_norm).sum::<f64>() / n,
                positive_rate: positive as f64 / n * 100.0,
                eng_value_sum: subset.iter().map(|v| v.eng_value).sum(),
            },
        );
    }

    // Symmetric benchmark: every brand, target included, scored by the same
    // formula. Brands with no mentioning records are omitted.
    let norm_total = views
        .iter()
        .map(|v| v.engagement_norm)
        .sum::<f64>()
        .max(BENCHMARK_DENOM_FLOOR);
    let vis_total = visibility_total.max(BENCHMARK_DENOM_FLOOR);

    let mut brand_benchmark = BTreeMap::new();
    for brand in catalog.brands() {
        let subset: Vec<&RecordView> = views
            .iter()
            .filter(|v| v.mentions.iter().any(|m| m.eq_ignore_ascii_case(&brand.name)))
            .collect();
        if subset.is_empty() {
            continue;
        }
        let n = subset.len() as f64;
        let basic = n / total * 100.0;
        let engagement = subset.iter().map(|v| v.engagement_norm).sum::<f64>() / norm_total * 100.0;
        let visibility = subset.iter().map(|v| v.visibility).sum::<f64>() / vis_total * 100.0;
        let positive = subset
            .iter()
            .filter(|v| v.sentiment > POSITIVE_THRESHOLD)
            .count();
        let positive_rate = positive as f64 / n * 100.0;
        brand_benchmark.insert(
            brand.name.clone(),
            BrandBenchmark {
                basic_sov: basic,
                engagement_sov: engagement,
                sentiment_positive_rate: positive_rate,
                visibility_sov: visibility,
                composite_sov: config
                    .weights
                    .composite(basic, engagement, positive_rate, visibility),
                eng_value_sum: subset.iter().map(|v| v.eng_value).sum(),
                records: subset.len(),
            },
        );
    }

    tracing::debug!(
        records = total_records,
        target_mentions,
        presence = broad_count,
        "computed share-of-voice report"
    );

    SovReport {
        presence_rate,
        basic_sov,
        engagement_sov,
        sentiment_sov,
        quality_sov,
        visibility_weighted_sov,
        comments_sov,
        composite_sov,
        platform_sov,
        total_records,
        target_mentions,
        competitor_mentions,
        brand_benchmark,
        totals: EngagementTotals {
            eng_value_total,
            eng_value_target,
            comment_mentions_total,
            comment_mentions_target,
        },
    }
}

#[cfg(test)]
mod tests {
    use sovscan_core::{BrandCatalog, BrandSpec};

    use crate::enrich::enrich_records;
    use crate::record::{EngagementStats, Platform, Record};
    use crate::sentiment::LexiconScorer;
    use crate::text::SimplePreprocessor;

    use super::*;

    fn catalog() -> BrandCatalog {
        BrandCatalog {
            target: BrandSpec::with_aliases("Atomberg", &["atom berg"]),
            competitors: vec![
                BrandSpec::new("Havells"),
                BrandSpec::new("Crompton"),
                BrandSpec::new("Orient"),
            ],
        }
    }

    fn compute(records: &[Record]) -> SovReport {
        compute_metrics(records, &catalog(), &LexiconScorer, &MetricsConfig::default())
    }

    fn assert_percentage(value: f64, name: &str) {
        assert!(
            (0.0..=100.0).contains(&value) && value.is_finite(),
            "{name} out of range: {value}"
        );
    }

    // -----------------------------------------------------------------------
    // Degenerate inputs
    // -----------------------------------------------------------------------

    #[test]
    fn empty_table_returns_zero_report() {
        let report = compute(&[]);
        assert_eq!(report.presence_rate, 0.0);
        assert_eq!(report.basic_sov, 0.0);
        assert_eq!(report.engagement_sov, 0.0);
        assert_eq!(report.sentiment_sov, 0.0);
        assert_eq!(report.quality_sov, 0.0);
        assert_eq!(report.visibility_weighted_sov, 0.0);
        assert_eq!(report.comments_sov, 0.0);
        assert_eq!(report.composite_sov, 0.0);
        assert_eq!(report.total_records, 0);
        assert_eq!(report.target_mentions, 0);
        assert!(report.platform_sov.is_empty());
        assert!(report.competitor_mentions.is_empty());
        assert!(report.brand_benchmark.is_empty());
        assert_eq!(report.totals, EngagementTotals::default());
    }

    #[test]
    fn no_brand_signal_yields_zero_percentages() {
        let records = vec![Record::from_text(Platform::Google, "generic fan review")];
        let report = compute(&records);
        assert_eq!(report.basic_sov, 0.0);
        assert_eq!(report.presence_rate, 0.0);
        assert_eq!(report.engagement_sov, 0.0);
        assert_eq!(report.comments_sov, 0.0);
        assert_eq!(report.composite_sov, 0.0);
    }

    // -----------------------------------------------------------------------
    // Basic / presence
    // -----------------------------------------------------------------------

    #[test]
    fn all_strict_mentions_give_basic_sov_100() {
        let records: Vec<Record> = (0..10)
            .map(|i| Record::from_text(Platform::YouTube, &format!("Atomberg fan review {i}")))
            .collect();
        let report = compute(&records);
        assert_eq!(report.basic_sov, 100.0);
        assert_eq!(report.target_mentions, 10);
        assert_eq!(report.total_records, 10);
    }

    #[test]
    fn presence_rate_is_broader_than_basic_sov() {
        // Strict flag explicitly false, but the channel title names the brand:
        // basic stays 0 while presence catches it.
        let mut record = Record::from_text(Platform::YouTube, "smart fan review");
        record.target_mention = Some(false);
        record.channel_title = Some("Atomberg Official".to_string());
        let report = compute(&[record]);
        assert_eq!(report.basic_sov, 0.0);
        assert_eq!(report.presence_rate, 100.0);
    }

    #[test]
    fn existing_strict_flag_is_respected() {
        // The flag wins over what re-extraction would conclude.
        let mut record = Record::from_text(Platform::YouTube, "no brands in this text");
        record.target_mention = Some(true);
        let report = compute(&[record]);
        assert_eq!(report.basic_sov, 100.0);
    }

    #[test]
    fn keyword_counts_toward_presence_only() {
        let mut record = Record::from_text(Platform::YouTube, "cool fan");
        record.keyword = Some("atomberg ceiling fan".to_string());
        let report = compute(&[record]);
        assert_eq!(report.basic_sov, 0.0);
        assert_eq!(report.presence_rate, 100.0);
    }

    // -----------------------------------------------------------------------
    // Engagement
    // -----------------------------------------------------------------------

    #[test]
    fn engagement_sov_applies_zero_floor_to_flagged_records() {
        // First record: eng_value 100, not brand-present. Second: brand-present
        // with no stats at all, floored to 1.0 rather than dropping out.
        let mut rich = Record::from_text(Platform::YouTube, "popular fan video");
        rich.engagement = Some(EngagementStats {
            views: 100_000.0,
            ..EngagementStats::default()
        });
        let flagged = Record::from_text(Platform::YouTube, "atomberg fan");

        let report = compute(&[rich, flagged]);
        let expected = 1.0 / 101.0 * 100.0;
        assert!(
            (report.engagement_sov - expected).abs() < 1e-9,
            "expected ~{expected}, got {}",
            report.engagement_sov
        );
        assert_eq!(report.totals.eng_value_total, 101.0);
        assert_eq!(report.totals.eng_value_target, 1.0);
    }

    #[test]
    fn engagement_sov_zero_when_no_engagement_anywhere() {
        let records = vec![Record::from_text(Platform::Google, "plain result")];
        let report = compute(&records);
        assert_eq!(report.engagement_sov, 0.0);
        assert_eq!(report.totals.eng_value_total, 0.0);
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    #[test]
    fn comments_sov_counts_occurrences_not_records() {
        // 2 target occurrences, 1 competitor occurrence across the table.
        let mut a = Record::from_text(Platform::YouTube, "fan video");
        a.all_comments = Some("atomberg atomberg havells".to_string());
        let b = Record::from_text(Platform::YouTube, "another video");
        let c = Record::from_text(Platform::YouTube, "third video");

        let report = compute(&[a, b, c]);
        let expected = 2.0 / 3.0 * 100.0;
        assert!(
            (report.comments_sov - expected).abs() < 1e-9,
            "expected ~{expected}, got {}",
            report.comments_sov
        );
        assert_eq!(report.totals.comment_mentions_total, 3);
        assert_eq!(report.totals.comment_mentions_target, 2);
    }

    #[test]
    fn comments_sov_zero_without_comment_mentions() {
        let mut record = Record::from_text(Platform::YouTube, "atomberg fan");
        record.all_comments = Some("nice video".to_string());
        let report = compute(&[record]);
        assert_eq!(report.comments_sov, 0.0);
    }

    // -----------------------------------------------------------------------
    // Sentiment
    // -----------------------------------------------------------------------

    #[test]
    fn sentiment_sov_averages_per_record_positive_rates() {
        // Record A: 1 of 1 brand-mentioning lines positive -> 100.
        // Record B: 1 of 2 positive -> 50. Mean = 75.
        let mut a = Record::from_text(Platform::YouTube, "fan video");
        a.all_comments = Some("atomberg is great\nunrelated line".to_string());
        let mut b = Record::from_text(Platform::YouTube, "other video");
        b.all_comments = Some("atomberg is great\natomberg is terrible".to_string());

        let report = compute(&[a, b]);
        assert!(
            (report.sentiment_sov - 75.0).abs() < 1e-9,
            "expected 75, got {}",
            report.sentiment_sov
        );
    }

    #[test]
    fn sentiment_sov_skips_records_without_brand_lines() {
        let mut a = Record::from_text(Platform::YouTube, "fan video");
        a.all_comments = Some("atomberg is great".to_string());
        let mut b = Record::from_text(Platform::YouTube, "other video");
        b.all_comments = Some("this fan is terrible".to_string());

        let report = compute(&[a, b]);
        assert_eq!(report.sentiment_sov, 100.0);
    }

    #[test]
    fn sentiment_sov_zero_without_brand_comment_lines() {
        let report = compute(&[Record::from_text(Platform::YouTube, "atomberg fan")]);
        assert_eq!(report.sentiment_sov, 0.0);
    }

    // -----------------------------------------------------------------------
    // Quality
    // -----------------------------------------------------------------------

    #[test]
    fn quality_sov_restricted_to_engaged_records() {
        let mut target = Record::from_text(Platform::YouTube, "atomberg fan");
        target.engagement_norm = Some(1.0);
        target.brand_adjusted_sentiment = Some(0.5);
        let mut other = Record::from_text(Platform::YouTube, "havells fan");
        other.engagement_norm = Some(0.5);
        other.brand_adjusted_sentiment = Some(0.5);
        let mut unengaged = Record::from_text(Platform::YouTube, "atomberg again");
        unengaged.engagement_norm = Some(0.0);
        unengaged.brand_adjusted_sentiment = Some(1.0);

        let report = compute(&[target, other, unengaged]);
        // (1.0*0.5) / (1.0*0.5 + 0.5*0.5) * 100 = 66.67
        let expected = 0.5 / 0.75 * 100.0;
        assert!(
            (report.quality_sov - expected).abs() < 1e-9,
            "expected ~{expected}, got {}",
            report.quality_sov
        );
    }

    #[test]
    fn quality_sov_zero_when_denominator_not_positive() {
        let mut record = Record::from_text(Platform::YouTube, "atomberg fan");
        record.engagement_norm = Some(1.0);
        record.brand_adjusted_sentiment = Some(-0.5);
        let report = compute(&[record]);
        assert_eq!(report.quality_sov, 0.0);
    }

    // -----------------------------------------------------------------------
    // Visibility / composite
    // -----------------------------------------------------------------------

    #[test]
    fn visibility_weighted_sov_uses_strict_mentions() {
        let mut target = Record::from_text(Platform::YouTube, "atomberg fan");
        target.visibility_weight = Some(3.0);
        let mut other = Record::from_text(Platform::YouTube, "havells fan");
        other.visibility_weight = Some(1.0);

        let report = compute(&[target, other]);
        assert!((report.visibility_weighted_sov - 75.0).abs() < 1e-9);
    }

    #[test]
    fn composite_is_weighted_blend_of_dimensions() {
        let records = vec![Record::from_text(Platform::YouTube, "atomberg fan")];
        let config = MetricsConfig {
            weights: SovWeights {
                basic: 2.0,
                engagement: 0.0,
                sentiment: 0.0,
                visibility: 0.0,
            },
            ..MetricsConfig::default()
        };
        let report = compute_metrics(&records, &catalog(), &LexiconScorer, &config);
        // Renormalized weights make the composite equal the basic dimension.
        assert!((report.composite_sov - report.basic_sov).abs() < 1e-9);
    }

    #[test]
    fn composite_zero_when_all_weights_zero() {
        let records = vec![Record::from_text(Platform::YouTube, "atomberg fan")];
        let config = MetricsConfig {
            weights: SovWeights {
                basic: 0.0,
                engagement: 0.0,
                sentiment: 0.0,
                visibility: 0.0,
            },
            ..MetricsConfig::default()
        };
        let report = compute_metrics(&records, &catalog(), &LexiconScorer, &config);
        assert_eq!(report.composite_sov, 0.0);
    }

    // -----------------------------------------------------------------------
    // Platform breakdown
    // -----------------------------------------------------------------------

    #[test]
    fn platform_sov_computed_per_platform() {
        let records = vec![
            Record::from_text(Platform::YouTube, "atomberg fan"),
            Record::from_text(Platform::YouTube, "havells fan"),
            Record::from_text(Platform::Google, "atomberg result"),
        ];
        let report = compute(&records);
        assert_eq!(report.platform_sov.get("YouTube"), Some(&50.0));
        assert_eq!(report.platform_sov.get("Google"), Some(&100.0));
    }

    #[test]
    fn platform_sov_excludes_configured_platform() {
        let records = vec![
            Record::from_text(Platform::Instagram, "atomberg post"),
            Record::from_text(Platform::YouTube, "atomberg fan"),
        ];
        let report = compute(&records);
        assert!(!report.platform_sov.contains_key("Instagram"));
        assert!(report.platform_sov.contains_key("YouTube"));
    }

    // -----------------------------------------------------------------------
    // Competitors / benchmark
    // -----------------------------------------------------------------------

    #[test]
    fn competitor_mentions_only_for_mentioned_brands() {
        let records = vec![
            Record::from_text(Platform::YouTube, "havells fan is great"),
            Record::from_text(Platform::YouTube, "atomberg fan"),
        ];
        let report = compute(&records);
        let havells = report.competitor_mentions.get("Havells").unwrap();
        assert_eq!(havells.records, 1);
        assert_eq!(havells.sov, 50.0);
        assert_eq!(havells.positive_rate, 100.0);
        assert!(!report.competitor_mentions.contains_key("Crompton"));
        assert!(!report.competitor_mentions.contains_key("Orient"));
        // The target never appears in the competitor table.
        assert!(!report.competitor_mentions.contains_key("Atomberg"));
    }

    #[test]
    fn benchmark_scores_target_and_competitors_symmetrically() {
        let mut a = Record::from_text(Platform::YouTube, "atomberg fan review");
        a.engagement_norm = Some(1.0);
        a.visibility_weight = Some(2.0);
        let mut b = Record::from_text(Platform::YouTube, "havells fan review");
        b.engagement_norm = Some(0.5);
        b.visibility_weight = Some(1.0);

        let report = compute(&[a, b]);
        let target = report.brand_benchmark.get("Atomberg").unwrap();
        let competitor = report.brand_benchmark.get("Havells").unwrap();
        assert_eq!(target.records, 1);
        assert_eq!(competitor.records, 1);
        assert_eq!(target.basic_sov, 50.0);
        assert_eq!(competitor.basic_sov, 50.0);
        // norm shares: 1.0/1.5 and 0.5/1.5
        assert!((target.engagement_sov - 1.0 / 1.5 * 100.0).abs() < 1e-6);
        assert!((competitor.engagement_sov - 0.5 / 1.5 * 100.0).abs() < 1e-6);
        // visibility shares: 2/3 and 1/3
        assert!((target.visibility_sov - 2.0 / 3.0 * 100.0).abs() < 1e-6);
        assert!(!report.brand_benchmark.contains_key("Crompton"));
    }

    #[test]
    fn benchmark_composite_uses_same_weights_as_report() {
        let records = vec![Record::from_text(Platform::YouTube, "atomberg fan")];
        let config = MetricsConfig::default();
        let report = compute_metrics(&records, &catalog(), &LexiconScorer, &config);
        let entry = report.brand_benchmark.get("Atomberg").unwrap();
        let expected = config.weights.composite(
            entry.basic_sov,
            entry.engagement_sov,
            entry.sentiment_positive_rate,
            entry.visibility_sov,
        );
        assert!((entry.composite_sov - expected).abs() < 1e-9);
    }

    // -----------------------------------------------------------------------
    // Degraded input / bounds
    // -----------------------------------------------------------------------

    #[test]
    fn derives_mentions_when_absent_after_degraded_reload() {
        // A reload that lost its structured cells: no mentions, no flags,
        // no engagement mapping. Metrics re-derive and still count the brand.
        let record = Record::from_text(Platform::YouTube, "atomberg smart fan");
        let report = compute(&[record]);
        assert_eq!(report.basic_sov, 100.0);
    }

    #[test]
    fn all_percentages_stay_in_bounds_on_mixed_table() {
        let mut records: Vec<Record> = vec![
            Record::from_text(Platform::YouTube, "Atomberg fan is great"),
            Record::from_text(Platform::YouTube, "Havells vs atomberg"),
            Record::from_text(Platform::Google, "crompton fan price"),
            Record::from_text(Platform::Instagram, "orient fan post"),
            Record::from_text(Platform::YouTube, "generic ceiling fan"),
        ];
        records[0].engagement = Some(EngagementStats {
            views: 50_000.0,
            likes: 200.0,
            comments: 30.0,
            engagement_score: 1.5,
        });
        records[0].all_comments =
            Some("atomberg is great\nlove this atomberg\nhavells was worse".to_string());
        records[1].all_comments = Some("havells all the way".to_string());
        enrich_records(
            &mut records,
            &catalog(),
            &SimplePreprocessor,
            &LexiconScorer,
        );

        let report = compute(&records);
        assert_percentage(report.presence_rate, "presence_rate");
        assert_percentage(report.basic_sov, "basic_sov");
        assert_percentage(report.engagement_sov, "engagement_sov");
        assert_percentage(report.sentiment_sov, "sentiment_sov");
        assert_percentage(report.quality_sov, "quality_sov");
        assert_percentage(report.visibility_weighted_sov, "visibility_weighted_sov");
        assert_percentage(report.comments_sov, "comments_sov");
        assert_percentage(report.composite_sov, "composite_sov");
        for (platform, sov) in &report.platform_sov {
            assert_percentage(*sov, platform);
        }
        for (brand, stats) in &report.competitor_mentions {
            assert_percentage(stats.sov, brand);
            assert_percentage(stats.positive_rate, brand);
        }
        for (brand, entry) in &report.brand_benchmark {
            assert_percentage(entry.basic_sov, brand);
            assert_percentage(entry.engagement_sov, brand);
            assert_percentage(entry.sentiment_positive_rate, brand);
            assert_percentage(entry.visibility_sov, brand);
            assert_percentage(entry.composite_sov, brand);
        }
    }
}
