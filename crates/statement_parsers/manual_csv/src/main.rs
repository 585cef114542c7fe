use anyhow::Result;
use chrono::Local;
use std::env;

use manual_csv::{ManualCsvParser, MANUAL_ACCOUNT};

fn main() -> Result<()> {
    // Usage:
    //   manual_csv <portfolio.csv> <database.json|folder> [output.json] [account_id]
    //
    // Defaults:
    //   portfolio.csv
    //   database.json
    //   output.json = database.json (in place)
    //   account_id = MANUAL

    let args: Vec<String> = env::args().collect();

    let input_path = args.get(1).map(|s| s.as_str()).unwrap_or("portfolio.csv");
    let database_arg = args.get(2).map(|s| s.as_str()).unwrap_or("database.json");
    let database_path = utils::resolve_database_path(database_arg);
    let output_path = args
        .get(3)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| database_path.clone());
    let account_id = args
        .get(4)
        .cloned()
        .unwrap_or_else(|| MANUAL_ACCOUNT.to_string());

    let parser = ManualCsvParser::new(account_id);
    let positions = parser.parse_file(input_path)?;

    if positions.is_empty() {
        eprintln!("⚠️  No positions recovered from {}", input_path);
    }

    // A hand-written CSV carries no statement date; stamp with today.
    let as_of = Local::now().naive_local().date().format("%Y-%m-%d").to_string();

    let database = utils::read_or_init_database(&database_path)?;
    let (database, account_stats) =
        utils::merge_accounts_with_deduplication(database, parser.create_accounts())?;
    let (database, stats) =
        utils::merge_positions_with_deduplication(database, &positions, &as_of)?;

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
