//! Line catalog and line name normalization.
//!
//! The catalog is an explicit, ordered list of `raw -> canonical` pairs.
//! Nothing depends on an entry's position: the built-in catalog is
//! generated from [`SUFFIX_LINES`] and [`BESPOKE_LINES`] once, and every
//! lookup afterwards goes through the mapping.

use crate::constants::{BESPOKE_LINES, LINE_SUFFIX, SUFFIX_LINES};
use crate::error::{Result, TransitError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One recognized transit line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMapping {
    /// Name as it appears in raw membership entries (case-sensitive)
    pub raw: String,
    /// Display name written to the output
    pub canonical: String,
}

impl LineMapping {
    pub fn new(raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            canonical: canonical.into(),
        }
    }
}

/// Ordered set of recognized transit lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCatalog {
    entries: Vec<LineMapping>,
}

impl Default for LineCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LineCatalog {
    pub fn new(entries: Vec<LineMapping>) -> Self {
        Self { entries }
    }

    /// The London network: Underground lines get a `" Line"` suffix, the
    /// rest keep bespoke names.
    pub fn builtin() -> Self {
        let suffixed = SUFFIX_LINES
            .iter()
            .map(|raw| LineMapping::new(*raw, format!("{raw}{LINE_SUFFIX}")));
        let bespoke = BESPOKE_LINES
            .iter()
            .map(|(raw, canonical)| LineMapping::new(*raw, *canonical));

        Self {
            entries: suffixed.chain(bespoke).collect(),
        }
    }

    pub fn entries(&self) -> &[LineMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject empty catalogs, blank names and duplicate raw names
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(TransitError::configuration(
                "line catalog is empty; every line membership would be dropped",
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.raw.trim().is_empty() {
                return Err(TransitError::configuration(
                    "line catalog entry has an empty raw name",
                ));
            }
            if entry.canonical.trim().is_empty() {
                return Err(TransitError::configuration(format!(
                    "line '{}' has an empty canonical name",
                    entry.raw
                )));
            }
            if !seen.insert(entry.raw.as_str()) {
                return Err(TransitError::configuration(format!(
                    "line '{}' appears more than once in the catalog",
                    entry.raw
                )));
            }
        }

        Ok(())
    }
}

/// Maps raw line membership names to canonical names
#[derive(Debug, Clone)]
pub struct LineNameNormalizer {
    canonical_by_raw: HashMap<String, String>,
}

impl Default for LineNameNormalizer {
    fn default() -> Self {
        Self::from_entries(LineCatalog::builtin().entries())
    }
}

impl LineNameNormalizer {
    /// Build a normalizer from a validated catalog
    pub fn new(catalog: &LineCatalog) -> Result<Self> {
        catalog.validate()?;
        Ok(Self::from_entries(catalog.entries()))
    }

    fn from_entries(entries: &[LineMapping]) -> Self {
        let canonical_by_raw = entries
            .iter()
            .map(|entry| (entry.raw.clone(), entry.canonical.clone()))
            .collect();
        Self { canonical_by_raw }
    }

    /// Canonical name for `raw_name`, or `None` when the line is not in the
    /// catalog and the membership should be dropped.
    pub fn normalize(&self, raw_name: &str) -> Option<&str> {
        self.canonical_by_raw.get(raw_name).map(String::as_str)
    }

    pub fn is_known(&self, raw_name: &str) -> bool {
        self.canonical_by_raw.contains_key(raw_name)
    }
}
