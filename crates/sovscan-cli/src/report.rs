//! `report` command: enrich a persisted table and print the SoV report.

use std::path::Path;

use sovscan_core::AppConfig;
use sovscan_metrics::{
    compute_metrics, enrich_records, LexiconScorer, MetricsConfig, SimplePreprocessor, SovReport,
    SovWeights,
};
use sovscan_store::{find_latest_table, load_records};

/// Load a table (given path or newest in the reports dir), enrich it, and
/// print the offline metrics block. Optionally write the full report as JSON.
///
/// # Errors
///
/// Returns an error if no table exists to load — the one fatal loader
/// condition — or on I/O failure. Metric computation itself never fails.
pub(crate) fn run_report(
    config: &AppConfig,
    table: Option<&Path>,
    json: Option<&Path>,
) -> anyhow::Result<()> {
    let path = match table {
        Some(path) => path.to_path_buf(),
        None => find_latest_table(&config.reports_dir)?.ok_or_else(|| {
            anyhow::anyhow!(
                "no table found in {}; run `sovscan collect` first",
                config.reports_dir.display()
            )
        })?,
    };

    let catalog = sovscan_core::load_catalog(&config.brands_path)?;
    let mut records = load_records(&path)?;
    enrich_records(&mut records, &catalog, &SimplePreprocessor, &LexiconScorer);

    let metrics_config = MetricsConfig {
        weights: SovWeights {
            basic: config.weight_basic,
            engagement: config.weight_engagement,
            sentiment: config.weight_sentiment,
            visibility: config.weight_visibility,
        },
        ..MetricsConfig::default()
    };
    let report = compute_metrics(&records, &catalog, &LexiconScorer, &metrics_config);

    print_report(&path, &catalog.target.name, &report);

    if let Some(json_path) = json {
        std::fs::write(json_path, serde_json::to_string_pretty(&report)?)?;
        println!("wrote report JSON to {}", json_path.display());
    }

    Ok(())
}

fn print_report(path: &Path, target: &str, report: &SovReport) {
    let rule = "=".repeat(70);
    println!("{rule}");
    println!("OFFLINE METRICS (from {}, no API calls)", path.display());
    println!("{rule}");
    println!("Rows: {}", report.total_records);
    println!("Presence Rate: {:.2}%", report.presence_rate);
    println!("Basic SoV: {:.2}%", report.basic_sov);
    println!("Positive Share: {:.2}%", report.sentiment_sov);
    println!("Comments SoV: {:.2}%", report.comments_sov);
    println!("Composite Index: {:.2}%", report.composite_sov);
    println!("Eng Total: {:.2}", report.totals.eng_value_total);
    println!("Eng {target}: {:.2}", report.totals.eng_value_target);
    println!(
        "Comment Mentions Total: {}",
        report.totals.comment_mentions_total
    );
    println!(
        "Comment Mentions {target}: {}",
        report.totals.comment_mentions_target
    );
    if !report.platform_sov.is_empty() {
        println!("{rule}");
        for (platform, sov) in &report.platform_sov {
            println!("{platform} SoV: {sov:.2}%");
        }
    }
    println!("{rule}");
}
