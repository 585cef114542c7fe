use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Merges new accounts into an existing database template with duplicate
/// detection. Accounts are considered duplicates if they have the same
/// `account_id`, so parsers can unconditionally submit their accounts on
/// every import.
///
/// # Arguments
/// * `template` - The existing database.json as a Value
/// * `new_accounts` - Vector of new account objects to merge
///
/// # Returns
/// * `Result<(Value, MergeStats)>` - The merged database and merge statistics
pub fn merge_accounts_with_deduplication(
    mut template: Value,
    new_accounts: Vec<Value>,
) -> Result<(Value, crate::MergeStats)> {
    let arr = template
        .get_mut("accounts")
        .and_then(|v| v.as_array_mut())
        .ok_or_else(|| anyhow!("database.json missing 'accounts' array"))?;

    // Build a set of existing account IDs
    let mut existing_ids: HashSet<String> = arr
        .iter()
        .filter_map(|acc| {
            acc.get("account_id")
                .and_then(|id| id.as_str())
                .map(|s| s.to_string())
        })
        .collect();

    let mut stats = crate::MergeStats {
        added: 0,
        skipped: 0,
        total: new_accounts.len(),
    };

    // Only add accounts that don't already exist
    for account in new_accounts {
        let account_id = account
            .get("account_id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| anyhow!("Account missing 'account_id' field"))?
            .to_string();

        if existing_ids.contains(&account_id) {
            stats.skipped += 1;
        } else {
            arr.push(account);
            existing_ids.insert(account_id);
            stats.added += 1;
        }
    }

    Ok((template, stats))
}
