//! Discovery and loading of persisted index files

use crate::error::{QaError, QaResult};
use crate::types::{BookEntry, Index, IndexSelection};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STRUCTURE_SUFFIX: &str = "_structure.json";

/// Read-only view over the results directory
#[derive(Debug, Clone)]
pub struct IndexStore {
    results_dir: PathBuf,
}

impl IndexStore {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// All `*_structure.json` files, sorted; empty if the directory is missing
    pub fn list_index_files(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.results_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {}", self.results_dir.display(), e);
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.ends_with(STRUCTURE_SUFFIX))
            })
            .collect();
        files.sort();
        files
    }

    pub fn list_books(&self) -> Vec<BookEntry> {
        self.list_index_files()
            .into_iter()
            .map(|path| BookEntry {
                book_id: book_id_from_path(&path),
                index_path: path.display().to_string(),
            })
            .collect()
    }

    pub fn book_path(&self, book_id: &str) -> PathBuf {
        self.results_dir.join(format!("{}{}", book_id, STRUCTURE_SUFFIX))
    }

    /// Turn a selection into existing index paths, failing on the first missing one
    pub fn resolve(&self, selection: &IndexSelection) -> QaResult<Vec<PathBuf>> {
        let paths = match selection {
            IndexSelection::Paths(paths) => paths
                .iter()
                .map(|p| {
                    let path = PathBuf::from(p);
                    if path.is_file() {
                        Ok(path)
                    } else {
                        Err(QaError::index_not_found(p))
                    }
                })
                .collect::<QaResult<Vec<_>>>()?,
            IndexSelection::Books(books) => books
                .iter()
                .map(|book| {
                    let path = self.book_path(book);
                    if path.is_file() {
                        Ok(path)
                    } else {
                        Err(QaError::index_not_found(path.display()))
                    }
                })
                .collect::<QaResult<Vec<_>>>()?,
            IndexSelection::All => self.list_index_files(),
        };

        if paths.is_empty() {
            return Err(QaError::no_index());
        }
        Ok(paths)
    }

    /// Parse one index file
    pub fn load(&self, path: &Path) -> QaResult<Index> {
        let load = || -> anyhow::Result<Index> {
            let raw = fs::read_to_string(path).context("read failed")?;
            let index = serde_json::from_str(&raw).context("invalid index JSON")?;
            Ok(index)
        };
        load().map_err(|source| QaError::IndexLoad {
            path: path.display().to_string(),
            source,
        })
    }
}

/// `foo_structure.json` → `foo`; any other file name → its stem
pub fn book_id_from_path(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    match name.strip_suffix(STRUCTURE_SUFFIX) {
        Some(book_id) => book_id.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
