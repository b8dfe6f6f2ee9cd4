//! Finding a file by spoken name under a directory tree.

use crate::error::SkillError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Turns a dictated file name into a searchable one: lower-cased, with
/// the word "dot" joined as `.`, so "report dot pdf" becomes `report.pdf`.
pub fn spoken_filename(heard: &str) -> String {
    let mut name = String::with_capacity(heard.len());
    let mut joined = true;
    for word in heard.split_whitespace() {
        let word = word.to_lowercase();
        if word == "dot" {
            name.push('.');
            joined = true;
            continue;
        }
        if !joined {
            name.push(' ');
        }
        name.push_str(&word);
        joined = false;
    }
    name
}

/// First regular file under `root`, in file-name order, whose name
/// contains `query` case-insensitively. Unreadable entries are skipped.
pub fn find_file(root: &Path, query: &str) -> Option<PathBuf> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| debug!(error = %e, "skipping unreadable entry"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .contains(&query)
        })
        .map(walkdir::DirEntry::into_path)
}

/// [`find_file`] on the blocking pool, so a large tree does not stall the
/// runtime.
pub async fn search(root: PathBuf, query: String) -> Result<Option<PathBuf>, SkillError> {
    tokio::task::spawn_blocking(move || find_file(&root, &query))
        .await
        .map_err(|e| SkillError::Search(e.to_string()))
}

/// The user's home directory from `HOME` (or `USERPROFILE` on Windows).
pub fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .filter_map(std::env::var_os)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}
