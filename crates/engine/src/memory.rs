//! In-process reference engine.
//!
//! Keeps whole documents in memory and ranks them by query-term overlap.
//! There are no embeddings and nothing is persisted; the engine exists so the
//! adapters can be driven end to end without an external service.

use crate::blocks::{format_source_block, join_blocks};
use crate::config::EngineConfig;
use crate::data_type::DataType;
use crate::filter::{WhereFilter, SOURCE_FIELD};
use crate::loader::{DirectoryLoader, DocumentLoader, FileLoader, TextLoader};
use crate::request::{AddRequest, DATA_TYPE_OPTION};
use crate::{BuildEngine, RagEngine};
use chrono::{DateTime, Utc};
use ragtool_core::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Answer returned when no stored document matches a query.
pub const NO_RESULTS: &str = "No relevant content found.";

/// A stored document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub source: String,
    pub data_type: DataType,
    pub content: String,
    /// Request options plus `source` and `data_type`
    pub metadata: Map<String, Value>,
    pub added_at: DateTime<Utc>,
    #[serde(skip)]
    content_hash: String,
}

/// In-memory [`RagEngine`].
pub struct MemoryEngine {
    config: EngineConfig,
    documents: RwLock<Vec<Document>>,
    loaders: HashMap<DataType, Arc<dyn DocumentLoader>>,
}

impl MemoryEngine {
    /// Create an engine with the built-in loaders.
    ///
    /// Text, plain files (text, CSV, JSON, XML, MDX) and directories are
    /// supported out of the box. PDF, DOCX and websites need a registered
    /// loader.
    pub fn new(config: EngineConfig) -> Self {
        let mut loaders: HashMap<DataType, Arc<dyn DocumentLoader>> = HashMap::new();
        loaders.insert(DataType::Text, Arc::new(TextLoader));
        let files: Arc<dyn DocumentLoader> = Arc::new(FileLoader);
        for data_type in [
            DataType::TextFile,
            DataType::Csv,
            DataType::Json,
            DataType::Xml,
            DataType::Mdx,
        ] {
            loaders.insert(data_type, Arc::clone(&files));
        }
        loaders.insert(DataType::Directory, Arc::new(DirectoryLoader));

        tracing::debug!(
            "Created memory engine for collection '{}' (top_k: {}, summarize: {})",
            config.collection_name,
            config.top_k,
            config.summarize
        );

        Self {
            config,
            documents: RwLock::new(Vec::new()),
            loaders,
        }
    }

    /// Register (or replace) the loader for a data type.
    pub fn with_loader(mut self, data_type: DataType, loader: impl DocumentLoader + 'static) -> Self {
        self.register_loader(data_type, loader);
        self
    }

    pub fn register_loader(&mut self, data_type: DataType, loader: impl DocumentLoader + 'static) {
        self.loaders.insert(data_type, Arc::new(loader));
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of stored documents.
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Distinct sources in insertion order.
    pub fn sources(&self) -> AppResult<Vec<String>> {
        let documents = self.read()?;
        let mut seen = HashSet::new();
        Ok(documents
            .iter()
            .filter(|d| seen.insert(d.source.as_str()))
            .map(|d| d.source.clone())
            .collect())
    }

    /// Snapshot of the stored documents.
    pub fn documents(&self) -> AppResult<Vec<Document>> {
        Ok(self.read()?.clone())
    }

    /// Remove every document.
    pub fn reset(&self) -> AppResult<()> {
        self.write()?.clear();
        tracing::info!("Reset collection '{}'", self.config.collection_name);
        Ok(())
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Document>>> {
        self.documents
            .read()
            .map_err(|_| AppError::Engine("Document store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Document>>> {
        self.documents
            .write()
            .map_err(|_| AppError::Engine("Document store lock poisoned".to_string()))
    }
}

impl BuildEngine for MemoryEngine {
    fn build(config: EngineConfig) -> AppResult<Self> {
        Ok(Self::new(config))
    }
}

#[async_trait::async_trait]
impl RagEngine for MemoryEngine {
    async fn add(&self, request: AddRequest) -> AppResult<()> {
        let source = request
            .source()
            .ok_or_else(|| AppError::Engine("add requires a source argument".to_string()))?;

        let data_type = request
            .data_type
            .unwrap_or_else(|| DataType::detect(source));

        let loader = self.loaders.get(&data_type).ok_or_else(|| {
            AppError::Engine(format!(
                "No loader registered for data type '{}'",
                data_type
            ))
        })?;

        let loaded = loader.load(source)?;

        let mut documents = self.write()?;
        let mut added = 0usize;

        for doc in loaded {
            let content_hash = hash_document(&doc.source, &doc.content);
            if documents.iter().any(|d| d.content_hash == content_hash) {
                tracing::debug!("Skipping duplicate document from {}", doc.source);
                continue;
            }

            let mut metadata = request.options.clone();
            metadata.insert(SOURCE_FIELD.to_string(), Value::String(doc.source.clone()));
            metadata.insert(
                DATA_TYPE_OPTION.to_string(),
                Value::String(data_type.as_str().to_string()),
            );

            documents.push(Document {
                id: uuid::Uuid::new_v4().to_string(),
                source: doc.source,
                data_type,
                content: doc.content,
                metadata,
                added_at: Utc::now(),
                content_hash,
            });
            added += 1;
        }

        tracing::info!(
            "Added {} document(s) from {} ({}) to '{}'",
            added,
            source,
            data_type,
            self.config.collection_name
        );

        Ok(())
    }

    async fn query(&self, question: &str, filter: Option<&WhereFilter>) -> AppResult<String> {
        let terms = tokenize(question);
        let documents = self.read()?;

        let mut ranked: Vec<(usize, &Document)> = documents
            .iter()
            .filter(|d| filter.map_or(true, |f| f.matches(&d.metadata)))
            .map(|d| (score(&terms, &d.content), d))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable sort: equal scores keep insertion order
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(self.config.top_k);

        tracing::debug!(
            "Query matched {} document(s) in '{}' (filter: {:?})",
            ranked.len(),
            self.config.collection_name,
            filter
        );

        if ranked.is_empty() {
            return Ok(NO_RESULTS.to_string());
        }

        let answer = if self.config.summarize {
            ranked
                .iter()
                .map(|(_, d)| d.content.trim())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            join_blocks(
                ranked
                    .iter()
                    .map(|(_, d)| format_source_block(&d.source, d.content.trim())),
            )
        };

        Ok(answer)
    }
}

fn hash_document(source: &str, content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update([0u8]);
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Lowercased alphanumeric words, minus stop words and single characters.
fn tokenize(text: &str) -> HashSet<String> {
    const STOP_WORDS: &[&str] = &[
        "the", "is", "at", "which", "on", "an", "as", "are", "was", "were", "for", "to", "of",
        "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has",
        "had", "it", "its", "what", "how", "does", "do",
    ];

    text.split(|c: char| !c.is_alphanumeric())
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() > 1 && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

fn score(terms: &HashSet<String>, content: &str) -> usize {
    let words = tokenize(content);
    terms.iter().filter(|t| words.contains(*t)).count()
}
