pub mod accounts;
pub mod database;
pub mod numbers;
pub mod positions;

// Re-export commonly used items
pub use crate::accounts::merge_accounts_with_deduplication;
pub use crate::database::{read_or_init_database, resolve_database_path, write_database};
pub use crate::numbers::parse_locale_number;
pub use crate::positions::{
    dedup_by_isin, is_valid_isin, make_position_id, merge_positions_with_deduplication, AssetType,
    MergeStats, PositionRecord,
};
