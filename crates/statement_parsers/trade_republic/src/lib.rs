use anyhow::{Context, Result};
use chrono::NaiveDate;
use instruments::{classify_asset, country_to_market, SecurityReference};
use regex::Regex;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;
use utils::{dedup_by_isin, is_valid_isin, parse_locale_number, PositionRecord};

pub const PARSER_NAME: &str = "trade_republic";

pub const TR_CTO: &str = "TR_CTO";
pub const TR_PEA: &str = "TR_PEA";

/// How many lines around a bare ISIN are scanned in the fallback strategy.
const ISIN_WINDOW: usize = 6;

/// Which block-segmentation strategy applies to a document. Chosen once per
/// document: anchored segmentation whenever at least one shares line exists,
/// the ISIN window scan otherwise. Running both would duplicate positions.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SegmentStrategy {
    SharesAnchor,
    IsinWindow,
}

/// Result of parsing one statement.
#[derive(Debug)]
pub struct ParsedStatement {
    /// First statement date found in the document, if any.
    pub statement_date: Option<NaiveDate>,
    pub positions: Vec<PositionRecord>,
}

/// Classification of one block line. Rules are ordered and the first match
/// wins, so an ISIN line is never mistaken for text and a date is never
/// mistaken for a number.
#[derive(Debug, PartialEq)]
enum LineKind {
    Isin(String),
    Country(String),
    Boilerplate,
    Date,
    Number(f64),
    Text(String),
}

/// Fields recovered from one position block before assembly.
#[derive(Debug, Default)]
struct BlockFields {
    name: String,
    description: String,
    isin: String,
    country: String,
    numbers: Vec<f64>,
}

struct LineRules {
    shares_anchor: Regex,
    isin_label: Regex,
    bare_isin: Regex,
    date: Regex,
    account_cto: Regex,
    account_pea: Regex,
    window_quantity: Regex,
    window_avg_price: Regex,
    window_price: Regex,
    window_value: Regex,
}

impl LineRules {
    fn new() -> Self {
        Self {
            shares_anchor: Regex::new(r"^(\d+(?:[.,]\d+)?)\s*titre\(s\)\s*(.*)$").unwrap(),
            isin_label: Regex::new(r"ISIN\s*:\s*([A-Z]{2}[A-Z0-9]{10})").unwrap(),
            // The trailing check digit keeps plain uppercase words from
            // anchoring a window.
            bare_isin: Regex::new(r"\b([A-Z]{2}[A-Z0-9]{9}[0-9])\b").unwrap(),
            date: Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(),
            account_cto: Regex::new(r"(?i)COMPTE-TITRES\s+ORDINAIRE").unwrap(),
            account_pea: Regex::new(r"(?i)PLAN\s+D['’]?\s*[ÉE]PARGNE").unwrap(),
            window_quantity: Regex::new(r"(?i)quantit[ée]\s*:?\s*(-?\d[\d.,]*)").unwrap(),
            window_avg_price: Regex::new(r"(?i)prix\s+moyen\s*:?\s*(-?\d[\d.,]*)").unwrap(),
            window_price: Regex::new(r"(?i)(?:prix\s+actuel|cours)\s*:?\s*(-?\d[\d.,]*)").unwrap(),
            window_value: Regex::new(r"(?i)(?:valeur|montant)\s*:?\s*(-?\d[\d.,]*)").unwrap(),
        }
    }
}

/// Trade Republic portfolio-statement parser (French layout).
///
/// Statements print one block per position:
///
/// ```text
/// 0,285659 titre(s)    Alphabet Inc.
///                      Reg. Shs Cap.Stk Cl. A DL-,001
///                      ISIN : US02079K3059
///                      Pays d'enregistrement: États-Unis
///                      264,45
///                      26/02/2026
///                      75,54
/// ```
///
/// with account section headers (`COMPTE-TITRES ORDINAIRE`,
/// `PLAN D'ÉPARGNE EN ACTIONS`) between groups of blocks. Some exports skip
/// the shares lines entirely; those are handled by scanning a window of
/// lines around each ISIN instead.
pub struct TradeRepublicParser {
    pub account_id_cto: String,
    pub account_id_pea: String,
    reference: SecurityReference,
    rules: LineRules,
}

impl TradeRepublicParser {
    pub fn new(reference: SecurityReference) -> Self {
        Self {
            account_id_cto: TR_CTO.to_string(),
            account_id_pea: TR_PEA.to_string(),
            reference,
            rules: LineRules::new(),
        }
    }

    /// Creates account entries for the two Trade Republic sub-accounts.
    /// IBAN/BIC and the account number are not printed on portfolio
    /// statements and are left null for manual completion.
    pub fn create_accounts(&self) -> Vec<Value> {
        vec![
            json!({
                "account_id": self.account_id_cto,
                "structural_type": "brokerage",
                "institution": "Trade Republic",
                "country": "DE",
                "iban": null,
                "bic": null,
                "account_number": null,
                "owner": "self",
                "is_liability": false,
                "supports_positions": true,
                "opened_date": null,
                "closed_date": null,
                "is_active": true,
                "notes": "Trade Republic ordinary securities account (compte-titres ordinaire)"
            }),
            json!({
                "account_id": self.account_id_pea,
                "structural_type": "brokerage",
                "institution": "Trade Republic",
                "country": "DE",
                "iban": null,
                "bic": null,
                "account_number": null,
                "owner": "self",
                "is_liability": false,
                "supports_positions": true,
                "opened_date": null,
                "closed_date": null,
                "is_active": true,
                "notes": "Trade Republic tax-advantaged equity plan (plan d'épargne en actions)"
            }),
        ]
    }

    /// Parses the text layer of a statement PDF, as produced by an external
    /// extractor. The file holds plain UTF-8 text, one statement line each.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedStatement> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Cannot open {}", path.as_ref().display()))?;
        Ok(self.parse_text(&text))
    }

    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<ParsedStatement> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Ok(self.parse_text(&buf))
    }

    /// Extracts every recoverable position from statement text.
    ///
    /// Never fails on malformed content: unreadable fields default, blocks
    /// without a share quantity are dropped, and empty input yields an empty
    /// list. The result is deduplicated by ISIN (first occurrence wins).
    pub fn parse_text(&self, text: &str) -> ParsedStatement {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let statement_date = self.find_statement_date(&lines);

        let strategy = if lines.iter().any(|l| self.rules.shares_anchor.is_match(l)) {
            SegmentStrategy::SharesAnchor
        } else {
            SegmentStrategy::IsinWindow
        };

        let positions = match strategy {
            SegmentStrategy::SharesAnchor => self.parse_anchored(&lines),
            SegmentStrategy::IsinWindow => self.parse_isin_windows(&lines),
        };

        ParsedStatement {
            statement_date,
            positions: dedup_by_isin(positions),
        }
    }

    /// Primary strategy: segment on "N titre(s) ..." anchor lines.
    fn parse_anchored(&self, lines: &[&str]) -> Vec<PositionRecord> {
        let mut positions = Vec::new();
        let mut current_account = self.account_id_cto.clone();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if let Some(account) = self.match_account_header(line) {
                current_account = account;
            }

            let Some(caps) = self.rules.shares_anchor.captures(line) else {
                i += 1;
                continue;
            };
            let Some(shares) = parse_locale_number(&caps[1]) else {
                i += 1;
                continue;
            };

            // The anchor's trailing text is the block's first content line.
            let mut block: Vec<&str> = Vec::new();
            let remainder = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            if !remainder.is_empty() {
                block.push(remainder);
            }

            let mut j = i + 1;
            while j < lines.len() && !self.is_block_boundary(lines[j]) {
                if !lines[j].is_empty() {
                    block.push(lines[j]);
                }
                j += 1;
            }

            if let Some(record) = self.assemble(shares, &block, &current_account) {
                positions.push(record);
            }

            // Resume on the boundary line so the next anchor or section
            // header is processed normally.
            i = j;
        }

        positions
    }

    fn is_block_boundary(&self, line: &str) -> bool {
        self.rules.shares_anchor.is_match(line)
            || line.contains("NOMBRE DE POSITIONS")
            || line.starts_with("Veuillez noter")
            || line.contains("TRADE REPUBLIC BANK")
            || self.match_account_header(line).is_some()
    }

    fn match_account_header(&self, line: &str) -> Option<String> {
        if self.rules.account_cto.is_match(line) {
            Some(self.account_id_cto.clone())
        } else if self.rules.account_pea.is_match(line) {
            Some(self.account_id_pea.clone())
        } else {
            None
        }
    }

    fn classify_line(&self, line: &str) -> LineKind {
        if let Some(caps) = self.rules.isin_label.captures(line) {
            return LineKind::Isin(caps[1].to_string());
        }
        let lower = line.to_lowercase();
        if lower.contains("enregistrement") {
            let country = line
                .split_once(':')
                .map(|(_, tail)| tail.trim())
                .unwrap_or("");
            return LineKind::Country(country.to_string());
        }
        if lower.contains("relev") && lower.contains("transaction") {
            return LineKind::Boilerplate;
        }
        if self.rules.date.is_match(line) {
            return LineKind::Date;
        }
        if let Some(value) = parse_locale_number(line) {
            return LineKind::Number(value);
        }
        LineKind::Text(line.to_string())
    }

    fn extract_fields(&self, block: &[&str]) -> BlockFields {
        let mut fields = BlockFields::default();

        for line in block {
            if line.is_empty() {
                continue;
            }
            match self.classify_line(line) {
                LineKind::Isin(isin) => {
                    if fields.isin.is_empty() {
                        fields.isin = isin;
                    }
                }
                LineKind::Country(country) => {
                    if fields.country.is_empty() {
                        fields.country = country;
                    }
                }
                LineKind::Boilerplate | LineKind::Date => {}
                LineKind::Number(value) => fields.numbers.push(value),
                LineKind::Text(text) => {
                    if fields.name.is_empty() {
                        fields.name = text;
                    } else if fields.description.is_empty() {
                        fields.description = text;
                    }
                }
            }
        }

        fields
    }

    fn assemble(&self, shares: f64, block: &[&str], account: &str) -> Option<PositionRecord> {
        if block.is_empty() {
            return None;
        }
        let fields = self.extract_fields(block);
        let (price, value) = interpret_numbers(shares, &fields.numbers);
        Some(self.finish_record(shares, price, value, None, fields, account))
    }

    /// Fallback strategy: scan a symmetric window of lines around each bare
    /// ISIN. Windows may overlap; deduplication by ISIN sorts that out.
    fn parse_isin_windows(&self, lines: &[&str]) -> Vec<PositionRecord> {
        let mut positions = Vec::new();
        let mut current_account = self.account_id_cto.clone();

        for (i, line) in lines.iter().enumerate() {
            if let Some(account) = self.match_account_header(line) {
                current_account = account;
            }

            let Some(isin) = self.find_bare_isin(line) else {
                continue;
            };

            let start = i.saturating_sub(ISIN_WINDOW);
            let end = (i + ISIN_WINDOW + 1).min(lines.len());
            let window = &lines[start..end];

            if let Some(record) = self.assemble_window(&isin, window, i - start, &current_account) {
                positions.push(record);
            }
        }

        positions
    }

    fn find_bare_isin(&self, line: &str) -> Option<String> {
        self.rules
            .bare_isin
            .captures(line)
            .map(|caps| caps[1].to_string())
            .filter(|isin| is_valid_isin(isin))
    }

    /// Window extraction matches labelled fields independently because line
    /// order inside a window is not stable across statement languages. The
    /// quantity label is mandatory; a window without one yields no record.
    fn assemble_window(
        &self,
        isin: &str,
        window: &[&str],
        isin_idx: usize,
        account: &str,
    ) -> Option<PositionRecord> {
        let joined = window.join("\n");

        let shares = self
            .capture_number(&self.rules.window_quantity, &joined)
            .filter(|n| *n >= 0.0)?;
        let avg_cost = self
            .capture_number(&self.rules.window_avg_price, &joined)
            .filter(|n| *n >= 0.0);
        let price = self
            .capture_number(&self.rules.window_price, &joined)
            .filter(|n| *n >= 0.0)
            .unwrap_or(0.0);
        let value = self
            .capture_number(&self.rules.window_value, &joined)
            .filter(|n| *n >= 0.0)
            .unwrap_or(shares * price);

        let fields = BlockFields {
            isin: isin.to_string(),
            name: self.window_name(window, isin_idx).unwrap_or_default(),
            country: self.window_country(window).unwrap_or_default(),
            ..BlockFields::default()
        };

        Some(self.finish_record(shares, price, value, avg_cost, fields, account))
    }

    fn capture_number(&self, re: &Regex, text: &str) -> Option<f64> {
        re.captures(text)
            .and_then(|caps| parse_locale_number(&caps[1]))
    }

    /// The security name carries no label; take the closest plain-text line
    /// above the ISIN, skipping numbers, dates, field labels and headers.
    fn window_name(&self, window: &[&str], isin_idx: usize) -> Option<String> {
        window[..isin_idx]
            .iter()
            .rev()
            .find_map(|line| match self.classify_line(line) {
                LineKind::Text(text)
                    if !self.is_window_label(&text)
                        && self.match_account_header(&text).is_none() =>
                {
                    Some(text)
                }
                _ => None,
            })
    }

    fn is_window_label(&self, line: &str) -> bool {
        self.rules.window_quantity.is_match(line)
            || self.rules.window_avg_price.is_match(line)
            || self.rules.window_price.is_match(line)
            || self.rules.window_value.is_match(line)
    }

    fn window_country(&self, window: &[&str]) -> Option<String> {
        window
            .iter()
            .find_map(|line| match self.classify_line(line) {
                LineKind::Country(country) if !country.is_empty() => Some(country),
                _ => None,
            })
    }

    /// Shared tail of both strategies: reference lookup, market fallback,
    /// classification, rounding.
    fn finish_record(
        &self,
        shares: f64,
        price: f64,
        value: f64,
        avg_cost: Option<f64>,
        fields: BlockFields,
        account: &str,
    ) -> PositionRecord {
        let BlockFields {
            mut name,
            description,
            isin,
            country,
            ..
        } = fields;

        let mut ticker = String::new();
        let mut sector = String::new();
        let market;

        if let Some(info) = self.reference.resolve(&isin) {
            ticker = info.ticker.clone();
            market = info.market.clone();
            sector = info.sector.clone();
            if name.len() < 3 {
                name = info.name.clone();
            }
        } else {
            market = country_to_market(&country).to_string();
        }

        if name.is_empty() {
            name = isin.clone();
        }

        let asset_type = classify_asset(&name, &description, &sector);

        // "ETF-Technology" style sectors keep only the trailing segment.
        if let Some((_, suffix)) = sector.rsplit_once('-') {
            sector = suffix.to_string();
        }

        let price = round4(price);

        PositionRecord {
            ticker,
            name,
            description,
            isin,
            shares,
            price_per_share: price,
            value: round2(value),
            avg_cost: round4(avg_cost.unwrap_or(price)),
            market,
            sector,
            asset_type,
            country,
            account: account.to_string(),
        }
    }

    fn find_statement_date(&self, lines: &[&str]) -> Option<NaiveDate> {
        lines.iter().find_map(|line| {
            if self.rules.date.is_match(line) {
                NaiveDate::parse_from_str(line, "%d/%m/%Y").ok()
            } else {
                None
            }
        })
    }
}

/// Positions print the unit price first and the total value last; anything
/// in between is a performance delta. Negative tokens are deltas too and
/// are never taken as a price or value.
fn interpret_numbers(shares: f64, numbers: &[f64]) -> (f64, f64) {
    let amounts: Vec<f64> = numbers.iter().copied().filter(|n| *n >= 0.0).collect();
    match amounts.len() {
        0 => (0.0, 0.0),
        1 => (amounts[0], shares * amounts[0]),
        _ => (amounts[0], amounts[amounts.len() - 1]),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use utils::AssetType;

    fn parser() -> TradeRepublicParser {
        TradeRepublicParser::new(SecurityReference::bundled().unwrap())
    }

    fn parser_with_empty_reference() -> TradeRepublicParser {
        TradeRepublicParser::new(SecurityReference::from_value(json!({})).unwrap())
    }

    #[test]
    fn test_alphabet_block_end_to_end() {
        let text = "\
0,285659 titre(s)    Alphabet Inc.
Reg. Shs Cap.Stk Cl. A DL-,001
ISIN : US02079K3059
Pays d'enregistrement: États-Unis
264,45
26/02/2026
75,54
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);

        let pos = &parsed.positions[0];
        assert_eq!(pos.shares, 0.285659);
        assert_eq!(pos.isin, "US02079K3059");
        assert_eq!(pos.ticker, "GOOGL");
        assert_eq!(pos.name, "Alphabet Inc.");
        assert_eq!(pos.description, "Reg. Shs Cap.Stk Cl. A DL-,001");
        assert_eq!(pos.price_per_share, 264.45);
        assert_eq!(pos.value, 75.54);
        assert_eq!(pos.avg_cost, 264.45);
        assert_eq!(pos.market, "US");
        assert_eq!(pos.sector, "Technology");
        assert_eq!(pos.asset_type, AssetType::Stock);
        assert_eq!(pos.country, "États-Unis");
        assert_eq!(pos.account, TR_CTO);

        assert_eq!(
            parsed.statement_date,
            NaiveDate::from_ymd_opt(2026, 2, 26)
        );
    }

    #[test]
    fn test_unknown_isin_falls_back_to_country_market() {
        let text = "\
1 titre(s) Société Générale de Test
ISIN : FR0000000000
Pays d'enregistrement: France
10,00
";
        let parsed = parser_with_empty_reference().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);

        let pos = &parsed.positions[0];
        assert_eq!(pos.market, "Paris");
        assert_eq!(pos.ticker, "");
        assert_eq!(pos.sector, "");
        assert_eq!(pos.country, "France");
    }

    #[test]
    fn test_single_numeric_value_derives_total() {
        let text = "\
2 titre(s) Fonds Exemple
ISIN : FR0000000000
150,00
";
        let parsed = parser_with_empty_reference().parse_text(text);
        let pos = &parsed.positions[0];

        assert_eq!(pos.price_per_share, 150.0);
        assert_eq!(pos.avg_cost, 150.0);
        assert_eq!(pos.value, 2.0 * 150.0);
    }

    #[test]
    fn test_no_numeric_values_default_to_zero() {
        let text = "\
3 titre(s) Sans Prix
ISIN : FR0000000000
";
        let parsed = parser_with_empty_reference().parse_text(text);
        let pos = &parsed.positions[0];

        assert_eq!(pos.shares, 3.0);
        assert_eq!(pos.price_per_share, 0.0);
        assert_eq!(pos.value, 0.0);
    }

    #[test]
    fn test_negative_deltas_are_never_prices() {
        let text = "\
1 titre(s) Position En Perte
ISIN : FR0000000000
-12,34
100,00
95,00
";
        let parsed = parser_with_empty_reference().parse_text(text);
        let pos = &parsed.positions[0];

        assert_eq!(pos.price_per_share, 100.0);
        assert_eq!(pos.value, 95.0);
    }

    #[test]
    fn test_account_section_tracking() {
        let text = "\
COMPTE-TITRES ORDINAIRE
1 titre(s) Apple Inc.
ISIN : US0378331005
170,00
PLAN D'ÉPARGNE EN ACTIONS
2 titre(s) LVMH
ISIN : FR0000121014
600,00
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 2);
        assert_eq!(parsed.positions[0].account, TR_CTO);
        assert_eq!(parsed.positions[1].account, TR_PEA);
    }

    #[test]
    fn test_blocks_stop_at_next_anchor() {
        let text = "\
1 titre(s) Apple Inc.
ISIN : US0378331005
170,00
2 titre(s) Microsoft Corp.
ISIN : US5949181045
400,00
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 2);

        // The first block must not swallow the second position's lines.
        assert_eq!(parsed.positions[0].name, "Apple Inc.");
        assert_eq!(parsed.positions[0].description, "");
        assert_eq!(parsed.positions[0].value, 170.0);
        assert_eq!(parsed.positions[1].name, "Microsoft Corp.");
    }

    #[test]
    fn test_blocks_stop_at_section_markers() {
        let text = "\
1 titre(s) Apple Inc.
ISIN : US0378331005
170,00
NOMBRE DE POSITIONS : 1
Veuillez noter que les cours affichés sont indicatifs.
TRADE REPUBLIC BANK GMBH
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);
        assert_eq!(parsed.positions[0].description, "");
    }

    #[test]
    fn test_duplicate_isin_keeps_first_record() {
        let text = "\
1 titre(s) Apple Inc.
ISIN : US0378331005
170,00
5 titre(s) Apple Inc. (doublon)
ISIN : US0378331005
171,00
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);
        assert_eq!(parsed.positions[0].shares, 1.0);
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        let parsed = parser().parse_text("");
        assert!(parsed.positions.is_empty());
        assert!(parsed.statement_date.is_none());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "\
0,5 titre(s) Apple Inc.
ISIN : US0378331005
170,00
26/02/2026
85,00
";
        let p = parser();
        let first = p.parse_text(text);
        let second = p.parse_text(text);
        assert_eq!(first.positions, second.positions);
        assert_eq!(first.statement_date, second.statement_date);
    }

    #[test]
    fn test_isin_window_fallback() {
        // No "titre(s)" anchors anywhere: the window strategy applies.
        let text = "\
COMPTE-TITRES ORDINAIRE
Apple Inc.
ISIN : US0378331005
Quantité : 10
Prix moyen : 150,00
Prix actuel : 170,00
Valeur : 1.700,00
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);

        let pos = &parsed.positions[0];
        assert_eq!(pos.shares, 10.0);
        assert_eq!(pos.name, "Apple Inc.");
        assert_eq!(pos.ticker, "AAPL");
        assert_eq!(pos.price_per_share, 170.0);
        assert_eq!(pos.value, 1700.0);
        // A labelled average price is kept distinct from the current price.
        assert_eq!(pos.avg_cost, 150.0);
        assert_eq!(pos.account, TR_CTO);
    }

    #[test]
    fn test_window_without_quantity_is_dropped() {
        let text = "\
Apple Inc.
ISIN : US0378331005
Prix actuel : 170,00
";
        let parsed = parser().parse_text(text);
        assert!(parsed.positions.is_empty());
    }

    #[test]
    fn test_overlapping_windows_deduplicate() {
        let text = "\
Apple Inc.
ISIN : US0378331005
Quantité : 10
Prix actuel : 170,00
Référence US0378331005
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);
    }

    #[test]
    fn test_anchored_strategy_excludes_window_matches() {
        // One shares anchor exists, so only the anchored strategy runs: the
        // labelled lone ISIN further down must not produce a second record.
        let text = "\
1 titre(s) Apple Inc.
ISIN : US0378331005
170,00
Veuillez noter que les cours affichés sont indicatifs.
Microsoft Corp.
US5949181045
Quantité : 4
Prix actuel : 400,00
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions.len(), 1);
        assert_eq!(parsed.positions[0].isin, "US0378331005");
    }

    #[test]
    fn test_short_name_replaced_by_reference_name() {
        let text = "\
1 titre(s) A
ISIN : US02079K3059
264,45
";
        let parsed = parser().parse_text(text);
        assert_eq!(parsed.positions[0].name, "Alphabet Inc.");
    }

    #[test]
    fn test_etf_sector_suffix_and_classification() {
        let text = "\
2 titre(s) iShares Core S&P 500
ISIN : IE00B5BMR087
500,00
";
        let parsed = parser().parse_text(text);
        let pos = &parsed.positions[0];
        assert_eq!(pos.asset_type, AssetType::Etf);
        // "ETF-US" keeps only the trailing segment.
        assert_eq!(pos.sector, "US");
    }

    #[test]
    fn test_boilerplate_and_date_lines_are_discarded() {
        let text = "\
1 titre(s) Apple Inc.
Relevé de transaction
ISIN : US0378331005
26/02/2026
170,00
";
        let parsed = parser().parse_text(text);
        let pos = &parsed.positions[0];
        assert_eq!(pos.description, "");
        assert_eq!(pos.price_per_share, 170.0);
    }
}
