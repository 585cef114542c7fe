use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use instruments::classify_asset;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use utils::{AssetType, PositionRecord};

pub const PARSER_NAME: &str = "manual_csv";

pub const MANUAL_ACCOUNT: &str = "MANUAL";

/// Maps a header row to column indices, accepting the spelling variants a
/// hand-written portfolio CSV shows up with (Ticker/Symbol, AvgCost/Cost,
/// Shares/Quantity, ...). Lookup is case-insensitive; unrecognized columns
/// are simply never asked for.
struct HeaderIndex {
    idx: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(headers: &StringRecord) -> Self {
        let mut idx = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            let key = name.trim().to_lowercase();
            if !key.is_empty() {
                idx.entry(key).or_insert(i);
            }
        }
        Self { idx }
    }

    fn get<'a>(&self, row: &'a StringRecord, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .find_map(|alias| self.idx.get(*alias).copied())
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Manually authored portfolio CSV parser.
///
/// Unlike the statement path there is no segmentation or locale ambiguity:
/// columns map straight onto position fields, numbers are plain decimals,
/// and the ticker column is mandatory (an ISIN cannot stand in for it).
pub struct ManualCsvParser {
    pub account_id: String,
}

impl ManualCsvParser {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }

    /// Creates the account entry rows without an Account column fall into.
    pub fn create_accounts(&self) -> Vec<Value> {
        vec![json!({
            "account_id": self.account_id,
            "structural_type": "brokerage",
            "institution": null,
            "country": null,
            "iban": null,
            "bic": null,
            "account_number": null,
            "owner": "self",
            "is_liability": false,
            "supports_positions": true,
            "opened_date": null,
            "closed_date": null,
            "is_active": true,
            "notes": "Manually maintained portfolio positions (CSV import)"
        })]
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PositionRecord>> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Cannot open {}", path.as_ref().display()))?;
        self.parse_reader(file)
    }

    /// Parses CSV content into position records, one per usable row.
    /// Rows without a ticker are skipped, not errors.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<PositionRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers().context("CSV input has no header row")?.clone();
        let header = HeaderIndex::new(&headers);

        let mut positions = Vec::new();

        for (idx, record) in rdr.records().enumerate() {
            let row = match record {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Skipping row {}: {}", idx + 1, e);
                    continue;
                }
            };

            let Some(ticker) = header.get(&row, &["ticker", "symbol"]) else {
                eprintln!("Skipping row {}: no ticker", idx + 1);
                continue;
            };
            let ticker = ticker.to_uppercase();

            let name = header
                .get(&row, &["name"])
                .unwrap_or(ticker.as_str())
                .to_string();
            let shares = parse_plain_number(header.get(&row, &["shares", "quantity"]));
            let avg_cost = parse_plain_number(header.get(&row, &["avgcost", "avg_cost", "cost"]));
            let market = header.get(&row, &["market"]).unwrap_or("US").to_string();
            let sector = header.get(&row, &["sector"]).unwrap_or("").to_string();
            let isin = header.get(&row, &["isin"]).unwrap_or("").to_string();
            let account = header
                .get(&row, &["account"])
                .unwrap_or(self.account_id.as_str())
                .to_string();

            let asset_type = match header.get(&row, &["assettype", "asset_type"]) {
                Some(label) => parse_asset_type(label),
                None => classify_asset(&name, "", &sector),
            };

            // No price column exists on this path; the average cost is the
            // best available stand-in for both price and value.
            positions.push(PositionRecord {
                ticker,
                name,
                description: String::new(),
                isin,
                shares,
                price_per_share: avg_cost,
                value: shares * avg_cost,
                avg_cost,
                market,
                sector,
                asset_type,
                country: String::new(),
                account,
            });
        }

        Ok(positions)
    }
}

/// Plain decimal parse: manually authored CSVs carry no locale formatting.
fn parse_plain_number(field: Option<&str>) -> f64 {
    field
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
        .max(0.0)
}

fn parse_asset_type(label: &str) -> AssetType {
    match label.trim().to_lowercase().as_str() {
        "etf" => AssetType::Etf,
        "scpi" => AssetType::Scpi,
        "alternative" => AssetType::Alternative,
        _ => AssetType::Stock,
    }
}
