use anyhow::{Context, Result};
use serde_json::Value;
use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// Resolves a store argument to a concrete database.json path.
/// A directory (or a path without a `.json` extension) means
/// `<dir>/database.json`.
pub fn resolve_database_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_dir() || !path.to_string_lossy().ends_with(".json") {
        path.join("database.json")
    } else {
        path.to_path_buf()
    }
}

/// Reads the store document, falling back to an empty structure when the
/// file is missing or not valid JSON.
pub fn read_or_init_database<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            Ok(serde_json::from_str(&contents).unwrap_or_else(|_| empty_database()))
        }
        Err(_) => Ok(empty_database()),
    }
}

/// Writes the store document as pretty JSON.
pub fn write_database<P: AsRef<Path>>(path: P, database: &Value) -> Result<()> {
    let contents = serde_json::to_string_pretty(database)?;
    let mut file = File::create(path.as_ref())
        .with_context(|| format!("Cannot write {}", path.as_ref().display()))?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

fn empty_database() -> Value {
    serde_json::json!({
        "accounts": [],
        "positions": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_database_path_appends_filename_to_folders() {
        let resolved = resolve_database_path("some/folder");
        assert!(resolved.ends_with("folder/database.json"));
    }

    #[test]
    fn test_resolve_database_path_keeps_json_paths() {
        let resolved = resolve_database_path("store/portfolio.json");
        assert!(resolved.ends_with("store/portfolio.json"));
    }

    #[test]
    fn test_read_missing_database_initializes_empty_structure() {
        let db = read_or_init_database("does/not/exist/database.json").unwrap();
        assert!(db.get("accounts").and_then(|v| v.as_array()).is_some());
        assert!(db.get("positions").and_then(|v| v.as_array()).is_some());
    }
}
