use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Coarse asset classification attached to every position record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AssetType {
    #[default]
    #[serde(rename = "stock")]
    Stock,
    #[serde(rename = "ETF")]
    Etf,
    #[serde(rename = "SCPI")]
    Scpi,
    #[serde(rename = "Alternative")]
    Alternative,
}

/// One normalized portfolio position extracted from a statement.
///
/// Records are plain data with no identity of their own: `position_id` and
/// `as_of_date` are assigned by the store merge, never by a parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PositionRecord {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub isin: String,
    pub shares: f64,
    pub price_per_share: f64,
    pub value: f64,
    pub avg_cost: f64,
    pub market: String,
    #[serde(default)]
    pub sector: String,
    pub asset_type: AssetType,
    #[serde(default)]
    pub country: String,
    pub account: String,
}

/// An ISIN is two uppercase country letters followed by ten alphanumerics.
pub fn is_valid_isin(s: &str) -> bool {
    s.len() == 12
        && s.chars().take(2).all(|c| c.is_ascii_uppercase())
        && s.chars()
            .skip(2)
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Drops records whose ISIN was already seen, keeping first occurrences.
/// Records without an ISIN are never deduplicated.
pub fn dedup_by_isin(records: Vec<PositionRecord>) -> Vec<PositionRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        if !record.isin.is_empty() && !seen.insert(record.isin.clone()) {
            continue;
        }
        out.push(record);
    }
    out
}

/// Stable store id for a position: the same security in the same account
/// always hashes to the same id, so re-importing a statement is a no-op.
pub fn make_position_id(record: &PositionRecord) -> String {
    let security = if record.isin.is_empty() {
        &record.ticker
    } else {
        &record.isin
    };
    let mut hasher = Sha256::new();
    hasher.update(format!("{}|{}", record.account, security).as_bytes());
    let hash = hex::encode(hasher.finalize());
    format!("POS-{}", &hash[..16])
}

/// Statistics about a store merge operation.
#[derive(Debug, Clone)]
pub struct MergeStats {
    pub added: usize,
    pub skipped: usize,
    pub total: usize,
}

impl MergeStats {
    pub fn has_duplicates(&self) -> bool {
        self.skipped > 0
    }
}

/// Merges parsed positions into an existing database template with duplicate
/// detection. Positions are considered duplicates if they hash to the same
/// `position_id` (same account and security).
///
/// # Arguments
/// * `template` - The existing database.json as a Value
/// * `new_positions` - Parsed position records to merge
/// * `as_of_date` - Statement date stamped onto every stored position
///
/// # Returns
/// * `Result<(Value, MergeStats)>` - The merged database and merge statistics
pub fn merge_positions_with_deduplication(
    mut template: Value,
    new_positions: &[PositionRecord],
    as_of_date: &str,
) -> Result<(Value, MergeStats)> {
    let arr = template
        .get_mut("positions")
        .and_then(|v| v.as_array_mut())
        .ok_or_else(|| anyhow!("database.json missing 'positions' array"))?;

    let mut existing_ids: HashSet<String> = arr
        .iter()
        .filter_map(|pos| {
            pos.get("position_id")
                .and_then(|id| id.as_str())
                .map(|s| s.to_string())
        })
        .collect();

    let mut stats = MergeStats {
        added: 0,
        skipped: 0,
        total: new_positions.len(),
    };

    for record in new_positions {
        let position_id = make_position_id(record);
        if existing_ids.contains(&position_id) {
            stats.skipped += 1;
            continue;
        }

        let mut pos = serde_json::to_value(record)?;
        if let Some(obj) = pos.as_object_mut() {
            obj.insert("position_id".to_string(), Value::String(position_id.clone()));
            obj.insert(
                "as_of_date".to_string(),
                Value::String(as_of_date.to_string()),
            );
        }
        arr.push(pos);
        existing_ids.insert(position_id);
        stats.added += 1;
    }

    Ok((template, stats))
}
