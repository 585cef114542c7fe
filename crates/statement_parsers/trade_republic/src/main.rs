use anyhow::Result;
use chrono::Local;
use std::env;

use instruments::SecurityReference;
use trade_republic::TradeRepublicParser;

fn main() -> Result<()> {
    // Usage:
    //   trade_republic <statement.txt> <database.json|folder> [output.json] [securities.json]
    //
    // <statement.txt> is the text layer of the portfolio statement PDF, as
    // produced by an external extractor (e.g. pdftotext -layout).
    //
    // Defaults:
    //   statement.txt
    //   database.json
    //   output.json = database.json (in place)
    //   securities.json = table bundled with the instruments crate

    let args: Vec<String> = env::args().collect();

    let input_path = args.get(1).map(|s| s.as_str()).unwrap_or("statement.txt");
    let database_arg = args.get(2).map(|s| s.as_str()).unwrap_or("database.json");
    let database_path = utils::resolve_database_path(database_arg);
    let output_path = args
        .get(3)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| database_path.clone());

    let reference = match args.get(4) {
        Some(path) => SecurityReference::from_path(path)?,
        None => SecurityReference::bundled()?,
    };

    let parser = TradeRepublicParser::new(reference);
    let parsed = parser.parse_file(input_path)?;

    if parsed.positions.is_empty() {
        eprintln!("⚠️  No positions recovered from {}", input_path);
    }

    // Positions are stamped with the statement date when the document
    // carries one, with today's date otherwise.
    let as_of = parsed
        .statement_date
        .unwrap_or_else(|| Local::now().naive_local().date())
        .format("%Y-%m-%d")
        .to_string();

    let database = utils::read_or_init_database(&database_path)?;
    let (database, account_stats) =
        utils::merge_accounts_with_deduplication(database, parser.create_accounts())?;
    let (database, stats) =
        utils::merge_positions_with_deduplication(database, &parsed.positions, &as_of)?;

    utils::write_database(&output_path, &database)?;

    println!(
        "OK: wrote {} ({} positions added, {} skipped, {} accounts added)",
        output_path.display(),
        stats.added,
        stats.skipped,
        account_stats.added
    );
    Ok(())
}
