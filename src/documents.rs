//! Read-only access to a directory tree of PDF files.

use base64::{engine::general_purpose, Engine as _};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct DocumentLibrary {
    root: PathBuf,
}

impl DocumentLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names of the immediate subdirectories of the root, sorted. Empty if the root is missing.
    pub fn folders(&self) -> Result<Vec<String>, AppError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut folders = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                folders.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        folders.sort();
        Ok(folders)
    }

    /// PDF file names (case-insensitive extension) across the given folders,
    /// deduplicated and sorted. Unknown or unsafe folder names are skipped.
    pub fn pdf_files<S: AsRef<str>>(&self, folders: &[S]) -> Result<Vec<String>, AppError> {
        let mut names = BTreeSet::new();

        for folder in folders {
            let folder = folder.as_ref();
            if !is_plain_name(folder) {
                tracing::warn!("Skipping unsafe folder name {:?}", folder);
                continue;
            }
            let dir = self.root.join(folder);
            if !dir.is_dir() {
                tracing::debug!("Folder {} does not exist", dir.display());
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                // Follows symlinks, so linked PDFs are listed too.
                if !entry.path().is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.to_lowercase().ends_with(".pdf") {
                    names.insert(name);
                }
            }
        }

        Ok(names.into_iter().collect())
    }

    /// Locate `filename`: directly under the root first, then anywhere below it.
    ///
    /// The recursive search is depth-first with entries visited in name order, so with
    /// duplicate names across folders the first folder by that order wins.
    pub fn find(&self, filename: &str) -> Result<Option<PathBuf>, AppError> {
        if !is_plain_name(filename) || !self.root.is_dir() {
            return Ok(None);
        }

        let direct = self.root.join(filename);
        if direct.is_file() {
            return Ok(Some(direct));
        }

        Ok(search_tree(&self.root, filename)?)
    }

    /// The file's bytes, base64-encoded.
    pub fn fetch_base64(&self, filename: &str) -> Result<String, AppError> {
        let path = self
            .find(filename)?
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", filename)))?;
        let bytes = fs::read(&path)?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }
}

/// A single path segment: no separators, no `.`/`..`.
fn is_plain_name(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn search_tree(dir: &Path, filename: &str) -> io::Result<Option<PathBuf>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    // Files at this level are checked before descending, like a top-down walk.
    // File symlinks are followed; directory symlinks are not, so link cycles can't recurse.
    let mut subdirs = Vec::new();
    for entry in entries {
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.path());
        } else if entry.file_name() == filename && entry.path().is_file() {
            return Ok(Some(entry.path()));
        }
    }

    for subdir in subdirs {
        if let Some(found) = search_tree(&subdir, filename)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
