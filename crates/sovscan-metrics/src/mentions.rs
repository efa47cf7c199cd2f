//! Brand presence predicates.
//!
//! Three deliberately distinct tests with different strictness, because
//! different metrics depend on different ones:
//!
//! 1. [`extract_brand_mentions`] — variant substring search over one text,
//!    returning canonical brand names.
//! 2. [`is_strict_target_mention`] — the per-record flag behind `basic_sov`
//!    and the visibility share: an extracted mention equals the target's
//!    canonical name.
//! 3. [`is_broad_target_presence`] — the union test behind `presence_rate`
//!    and `engagement_sov`: strict flag, variant match in any ancillary
//!    field, or the search keyword naming the target.
//!
//! Do not unify them.

use std::collections::HashSet;

use sovscan_core::BrandCatalog;

use crate::record::Record;

/// Extract canonical brand names mentioned in `text`.
///
/// Case-insensitive substring search over every brand's variant list, target
/// brand first, then competitors in configured order. Returns the canonical
/// name (never the matched variant) for each brand with at least one hit,
/// deduplicated case-insensitively with order preserved.
#[must_use]
pub fn extract_brand_mentions(text: &str, catalog: &BrandCatalog) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for brand in catalog.brands() {
        let hit = brand
            .variants()
            .iter()
            .any(|variant| haystack.contains(&variant.to_lowercase()));
        if hit && seen.insert(brand.name.to_lowercase()) {
            found.push(brand.name.clone());
        }
    }

    found
}

/// Strict per-record mention flag: some extracted mention equals the target's
/// canonical name, case-insensitively.
#[must_use]
pub fn is_strict_target_mention(mentions: &[String], catalog: &BrandCatalog) -> bool {
    mentions
        .iter()
        .any(|m| m.eq_ignore_ascii_case(&catalog.target.name))
}

/// Broad presence test: the strict flag, OR any target variant appearing in
/// `raw_text`, `title`, `description`, the joined comments, or the channel
/// title, OR the search keyword containing the target's canonical name.
///
/// Deliberately looser than the strict flag so mentions occurring only in
/// ancillary fields are not under-counted.
#[must_use]
pub fn is_broad_target_presence(record: &Record, strict: bool, catalog: &BrandCatalog) -> bool {
    if strict {
        return true;
    }

    let variants: Vec<String> = catalog
        .target
        .variants()
        .iter()
        .map(|v| v.to_lowercase())
        .collect();

    let fields = [
        record.raw_text.as_str(),
        record.title.as_str(),
        record.description.as_str(),
        record.comments_text(),
        record.channel_title.as_deref().unwrap_or(""),
    ];
    for field in fields {
        if field.is_empty() {
            continue;
        }
        let lowered = field.to_lowercase();
        if variants.iter().any(|v| lowered.contains(v)) {
            return true;
        }
    }

    let target_lower = catalog.target.name.to_lowercase();
    record
        .keyword
        .as_deref()
        .is_some_and(|k| k.to_lowercase().contains(&target_lower))
}

/// Non-overlapping case-insensitive occurrence count of `needle` in `haystack`.
#[must_use]
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .to_lowercase()
        .matches(&needle.to_lowercase())
        .count()
}
