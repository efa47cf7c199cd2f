//! CSV persistence for sovscan record tables.
//!
//! The table is a plain delimited file; structured values
//! (`engagement_metrics`, `brand_mentions`) are stored as JSON text inside
//! their cells. On reload a cell that fails to parse as its structured type
//! is treated as absent rather than an error, so a degraded file still loads
//! and the metrics engine re-derives what it needs.

mod discover;
mod error;
mod table;

pub use discover::{find_latest_table, timestamped_path, EXTRACTED_PREFIX, PROCESSED_PREFIX};
pub use error::StoreError;
pub use table::{load_records, save_records};
