//! Content source abstraction for reading card documents.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;
use walkdir::WalkDir;

use crate::model::{SyntaxData, SyntaxDocument};

/// Trait for abstracting file I/O so loaders can be fed from memory in tests.
pub trait ContentSource {
    /// Read a file at the given logical path and return its content as a string.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
    /// List `.json` files below a directory path, sorted by path.
    fn list_json_files(&mut self, path: &Utf8Path) -> Result<Vec<Utf8PathBuf>>;
    /// Whether the logical path names a directory.
    fn is_dir(&mut self, path: &Utf8Path) -> bool;
}

/// Reads files directly from the local filesystem.
pub struct FsSource;

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_std_path()).with_context(|| format!("Failed to read {}", path))
    }

    fn list_json_files(&mut self, path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(path.as_std_path()).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Walk dir {}", path))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let p = Utf8PathBuf::from_path_buf(entry.into_path())
                .map_err(|p| anyhow::anyhow!("Non-UTF8 path {}", p.display()))?;
            if p.extension() == Some("json") {
                files.push(p);
            }
        }
        files.sort();
        Ok(files)
    }

    fn is_dir(&mut self, path: &Utf8Path) -> bool {
        path.is_dir()
    }
}

/// Load every card from `path`.
///
/// A file is parsed as one document. A directory contributes every `.json`
/// file below it, in path order, with their cards concatenated.
pub fn load_cards<S: ContentSource>(source: &mut S, path: &Utf8Path) -> Result<Vec<SyntaxData>> {
    let files = if source.is_dir(path) {
        source.list_json_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut cards = Vec::new();
    for file in &files {
        let text = source.read_to_string(file)?;
        let doc = SyntaxDocument::from_json_str(&text)
            .with_context(|| format!("Invalid card document {}", file))?;
        info!(path = %file, cards = doc.cards.len(), "loaded card document");
        cards.extend(doc.cards);
    }
    Ok(cards)
}
