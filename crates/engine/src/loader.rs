//! Document loaders used by [`crate::MemoryEngine`].
//!
//! A loader turns the source named in an add request into one or more text
//! documents. Loaders are registered per [`crate::DataType`].

use ragtool_core::{AppError, AppResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// A unit of loaded text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub source: String,
    pub content: String,
}

/// Turns a source reference into text documents.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, source: &str) -> AppResult<Vec<LoadedDocument>>;
}

/// Raw text: the source string is the content.
#[derive(Debug, Default)]
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn load(&self, source: &str) -> AppResult<Vec<LoadedDocument>> {
        Ok(vec![LoadedDocument {
            source: source.to_string(),
            content: source.to_string(),
        }])
    }
}

/// UTF-8 files read from disk.
#[derive(Debug, Default)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, source: &str) -> AppResult<Vec<LoadedDocument>> {
        let content = fs::read_to_string(source)
            .map_err(|e| AppError::Engine(format!("Failed to read {}: {}", source, e)))?;

        Ok(vec![LoadedDocument {
            source: source.to_string(),
            content,
        }])
    }
}

/// Every UTF-8 file under a directory, one document per file.
///
/// Files that are not valid UTF-8 are skipped.
#[derive(Debug, Default)]
pub struct DirectoryLoader;

impl DocumentLoader for DirectoryLoader {
    fn load(&self, source: &str) -> AppResult<Vec<LoadedDocument>> {
        let root = Path::new(source);
        if !root.is_dir() {
            return Err(AppError::Engine(format!("Not a directory: {}", source)));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(content) => documents.push(LoadedDocument {
                    source: path.to_string_lossy().to_string(),
                    content,
                }),
                Err(e) => tracing::warn!("Skipping unreadable file {:?}: {}", path, e),
            }
        }

        tracing::debug!("Loaded {} files from {}", documents.len(), source);
        Ok(documents)
    }
}
