//! `collect` command: fetch records from YouTube and persist a table.

use std::path::PathBuf;
use std::time::Duration;

use sovscan_collector::{collect_for_keywords, CollectorConfig, YouTubeClient};
use sovscan_core::AppConfig;
use sovscan_store::{save_records, timestamped_path, EXTRACTED_PREFIX};

/// Default keyword set for the smart-fan market.
const DEFAULT_KEYWORDS: &[&str] = &[
    "smart fan",
    "ceiling fan",
    "atomberg fan",
    "energy efficient fan",
    "BLDC fan",
    "smart ceiling fan",
    "atomberg smart fan",
    "premium fan",
    "atomberg ceiling fan",
    "energy saving fan",
    "smart home fan",
    "IoT fan",
    "atomberg BLDC",
    "atomberg energy efficient",
    "smart ceiling fan review",
];

/// Run collection for the given (or default) keywords and save the table.
///
/// # Errors
///
/// Returns an error if no API key is configured, the HTTP client cannot be
/// built, or the table cannot be written. Per-keyword collection failures
/// are logged and skipped inside the collector.
pub(crate) async fn run_collect(
    config: &AppConfig,
    keywords: Vec<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let api_key = config.youtube_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("YOUTUBE_API_KEY is not set; collection requires an API key")
    })?;

    let keywords = if keywords.is_empty() {
        DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect()
    } else {
        keywords
    };

    let client = YouTubeClient::new(api_key, config.request_timeout_secs, &config.user_agent)?;
    let collector_config = CollectorConfig {
        results_per_keyword: config.results_per_keyword,
        comments_per_video: config.comments_per_video,
        inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
    };

    let records = collect_for_keywords(&client, &keywords, &collector_config).await;
    if records.is_empty() {
        tracing::warn!("collection produced no records");
    }

    std::fs::create_dir_all(&config.reports_dir)?;
    let path =
        output.unwrap_or_else(|| timestamped_path(&config.reports_dir, EXTRACTED_PREFIX));
    save_records(&path, &records)?;

    println!("saved {} records to {}", records.len(), path.display());
    Ok(())
}
