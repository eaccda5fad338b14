//! fixset-test: conformance fixtures for fixset
//!
//! YAML fixtures under the workspace `fixtures/` directory describe a rule or
//! fix set config plus the expected outcome for each element. The same files
//! drive every implementation of the naming rules.
//!
//! # Layout
//!
//! - `01_rule/` — single [`Rule`](fixset::Rule) resolution ([`rule_fixture`])
//! - `02_fix_set/` — include/exclude composition ([`fixture`])
//! - `03_config/` — config documents that must be rejected ([`fixture`])
//!
//! # Example
//!
//! ```
//! use fixset_test::{fixtures_dir, yaml_files};
//!
//! let files = yaml_files(&fixtures_dir().join("02_fix_set")).unwrap();
//! assert!(!files.is_empty());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "fixtures")]
pub mod fixture;
#[cfg(feature = "fixtures")]
pub mod rule_fixture;

/// The workspace `fixtures/` directory.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    // ext/test -> ext -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("fixtures"), |root| root.join("fixtures"))
}

/// `.yaml` / `.yml` files in `dir`, sorted by name.
///
/// # Errors
///
/// Returns the underlying I/O error if `dir` cannot be read.
pub fn yaml_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_dir_exists() {
        let dir = fixtures_dir();
        assert!(dir.is_dir(), "missing fixtures dir: {}", dir.display());
    }

    #[test]
    fn yaml_files_are_sorted() {
        let files = yaml_files(&fixtures_dir().join("01_rule")).unwrap();
        assert!(!files.is_empty());
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn yaml_files_missing_dir_errors() {
        assert!(yaml_files(&fixtures_dir().join("does_not_exist")).is_err());
    }
}
