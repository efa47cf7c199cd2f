//! Discovery of persisted tables in the reports directory.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::StoreError;

/// Filename prefix for freshly collected tables.
pub const EXTRACTED_PREFIX: &str = "sov_extracted";
/// Filename prefix for enriched tables.
pub const PROCESSED_PREFIX: &str = "sov_processed";

/// Find the newest persisted table in `dir`.
///
/// Timestamped filenames sort chronologically, so the newest file per prefix
/// is the lexicographic maximum. A processed table wins over an extracted
/// one of any age. A missing directory yields `None`, not an error.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory exists but cannot be read.
pub fn find_latest_table(dir: &Path) -> Result<Option<PathBuf>, StoreError> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut extracted = Vec::new();
    let mut processed = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.ends_with(".csv") {
            continue;
        }
        if name.starts_with(EXTRACTED_PREFIX) {
            extracted.push(entry.path());
        } else if name.starts_with(PROCESSED_PREFIX) {
            processed.push(entry.path());
        }
    }

    extracted.sort();
    processed.sort();

    Ok(processed.pop().or_else(|| extracted.pop()))
}

/// Timestamped CSV path under `dir`: `{prefix}_{YYYYmmdd_HHMMSS}.csv`.
#[must_use]
pub fn timestamped_path(dir: &Path, prefix: &str) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{prefix}_{stamp}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "platform\n").unwrap();
    }

    #[test]
    fn missing_directory_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(find_latest_table(&missing).unwrap().is_none());
    }

    #[test]
    fn empty_directory_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_latest_table(dir.path()).unwrap().is_none());
    }

    #[test]
    fn newest_extracted_table_wins_by_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "sov_extracted_20260101_000000.csv");
        touch(dir.path(), "sov_extracted_20260301_120000.csv");
        touch(dir.path(), "sov_extracted_20260201_000000.csv");

        let latest = find_latest_table(dir.path()).unwrap().unwrap();
        assert!(latest.ends_with("sov_extracted_20260301_120000.csv"));
    }

    #[test]
    fn processed_table_wins_over_extracted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "sov_extracted_20260301_120000.csv");
        touch(dir.path(), "sov_processed_20260101_000000.csv");

        let latest = find_latest_table(dir.path()).unwrap().unwrap();
        assert!(latest.ends_with("sov_processed_20260101_000000.csv"));
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "sov_extracted_20260101_000000.csv.bak");
        assert!(find_latest_table(dir.path()).unwrap().is_none());
    }

    #[test]
    fn timestamped_path_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = timestamped_path(dir.path(), EXTRACTED_PREFIX);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("sov_extracted_"));
        assert!(name.ends_with(".csv"));
        // prefix + '_' + 8 date digits + '_' + 6 time digits + ".csv"
        assert_eq!(name.len(), EXTRACTED_PREFIX.len() + 1 + 8 + 1 + 6 + 4);
    }
}
