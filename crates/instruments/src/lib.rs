//! Security reference data.
//!
//! Maps an ISIN to a tradable ticker, display name, market and sector. The
//! table is a data asset, not logic: a default copy ships with the crate and
//! an external JSON file with the same shape can replace it without code
//! changes. Unknown ISINs are expected — callers fall back to deriving the
//! market from the registration country printed on the statement.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use utils::AssetType;

/// Reference entry for one known security.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityInfo {
    pub ticker: String,
    pub name: String,
    pub market: String,
    pub sector: String,
}

/// Immutable ISIN lookup table, constructed once and injected into parsers.
#[derive(Debug, Clone, Default)]
pub struct SecurityReference {
    securities: HashMap<String, SecurityInfo>,
}

impl SecurityReference {
    /// Builds the reference from the data asset bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(include_str!("../data/securities.json"))
            .context("Bundled securities table is not valid")
    }

    /// Loads a replacement table from an external JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Reading securities table: {}", path.as_ref().display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Parsing securities table: {}", path.as_ref().display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let securities: HashMap<String, SecurityInfo> = serde_json::from_str(raw)?;
        Ok(Self { securities })
    }

    /// Builds a table from an in-memory JSON value (test fixtures).
    pub fn from_value(value: Value) -> Result<Self> {
        let securities: HashMap<String, SecurityInfo> = serde_json::from_value(value)?;
        Ok(Self { securities })
    }

    /// Looks up a security by ISIN. A miss is common and not an error.
    pub fn resolve(&self, isin: &str) -> Option<&SecurityInfo> {
        self.securities.get(isin)
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

// Registration-country labels as printed on French statements. "tats-unis"
// matches "États-Unis" however the accent survived text extraction.
const COUNTRY_MARKETS: [(&str, &str); 10] = [
    ("france", "Paris"),
    ("tats-unis", "US"),
    ("allemagne", "Frankfurt"),
    ("pays-bas", "Amsterdam"),
    ("irlande", "London"),
    ("luxembourg", "Luxembourg"),
    ("royaume-uni", "London"),
    ("italie", "Milan"),
    ("espagne", "Madrid"),
    ("afrique du sud", "Johannesburg"),
];

/// Derives a market tag from a registration-country string. Unknown or
/// missing countries default to "US".
pub fn country_to_market(country: &str) -> &'static str {
    let country = country.to_lowercase();
    for (needle, market) in COUNTRY_MARKETS {
        if country.contains(needle) {
            return market;
        }
    }
    "US"
}

const ETF_KEYWORDS: [&str; 11] = [
    "etf",
    "ucits",
    "ishares",
    "vanguard",
    "lyxor",
    "amundi",
    "spdr",
    "xtrackers",
    "vaneck",
    "physical",
    "open end zt",
];

const ALTERNATIVE_KEYWORDS: [&str; 3] = ["eltif", "nexus", "alternative"];

const REAL_ESTATE_KEYWORDS: [&str; 5] = ["scpi", "opci", "reit", "immobilier", "real estate"];

/// Heuristic asset-type classification over a security's text fields.
///
/// Case-insensitive keyword match over the concatenated inputs; ETF keywords
/// win over alternative-fund keywords, which win over real-estate keywords.
/// Pure: the same inputs always yield the same classification.
pub fn classify_asset(name: &str, description: &str, sector: &str) -> AssetType {
    let combined = format!("{} {} {}", name, description, sector).to_lowercase();

    if ETF_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return AssetType::Etf;
    }
    if ALTERNATIVE_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return AssetType::Alternative;
    }
    if REAL_ESTATE_KEYWORDS.iter().any(|kw| combined.contains(kw)) {
        return AssetType::Scpi;
    }
    AssetType::Stock
}
