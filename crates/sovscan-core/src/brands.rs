//! Brand catalog: the target brand and its competitors, with the textual
//! variants used for mention matching.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One brand: canonical display name plus extra matchable aliases
/// (common misspellings, legacy names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSpec {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl BrandSpec {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aliases(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
        }
    }

    /// Matchable textual variants of this brand.
    ///
    /// The canonical name, the name with spaces removed, spaces replaced by
    /// `-`, spaces replaced by `_`, then every configured alias. Deduplicated
    /// case-insensitively, first-seen form preserved. For single-word names
    /// the spacing variants collapse into one entry.
    #[must_use]
    pub fn variants(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        let candidates = [
            self.name.clone(),
            self.name.replace(' ', ""),
            self.name.replace(' ', "-"),
            self.name.replace(' ', "_"),
        ];
        for v in candidates.into_iter().chain(self.aliases.iter().cloned()) {
            if v.trim().is_empty() {
                continue;
            }
            if seen.insert(v.to_lowercase()) {
                out.push(v);
            }
        }
        out
    }
}

/// Immutable brand configuration passed into enrichment and metrics.
///
/// The target brand comes first in every ordered operation; competitors keep
/// their configured order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCatalog {
    pub target: BrandSpec,
    #[serde(default)]
    pub competitors: Vec<BrandSpec>,
}

impl BrandCatalog {
    /// All brands, target first, competitors in configured order.
    pub fn brands(&self) -> impl Iterator<Item = &BrandSpec> {
        std::iter::once(&self.target).chain(self.competitors.iter())
    }
}

/// Load and validate the brand catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_catalog(path: &Path) -> Result<BrandCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: BrandCatalog = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &BrandCatalog) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for brand in catalog.brands() {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(brand.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }

        if brand.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has an empty alias",
                brand.name
            )));
        }
    }

    Ok(())
}
