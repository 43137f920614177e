//! Adapter construction parameters.

use ragtool_core::{AppConfig, RagSettings};
use ragtool_engine::{EmbeddingConfig, EngineConfig};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Default collection for [`crate::RagAdapter`].
pub const DEFAULT_COLLECTION: &str = "crewai_knowledge_base";

/// Default collection for [`crate::PdfRagAdapter`].
pub const PDF_DEFAULT_COLLECTION: &str = "crewai_pdf_knowledge_base";

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

pub const DEFAULT_TOP_K: usize = 5;

/// Parameters an adapter hands to its engine.
///
/// Nothing is validated here; invalid values fail inside the engine.
/// `embedding_options` is passed opaquely to the embedding provider.
#[derive(Clone, PartialEq, Serialize)]
pub struct AdapterConfig {
    pub collection_name: String,
    pub persist_directory: Option<PathBuf>,
    pub embedding_model: String,
    pub summarize: bool,
    pub top_k: usize,
    #[serde(serialize_with = "serialize_secret")]
    pub embedding_api_key: Option<String>,
    pub embedding_options: Map<String, Value>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION.to_string(),
            persist_directory: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            summarize: false,
            top_k: DEFAULT_TOP_K,
            embedding_api_key: None,
            embedding_options: Map::new(),
        }
    }
}

impl AdapterConfig {
    /// Defaults for PDF knowledge bases.
    pub fn pdf() -> Self {
        Self {
            collection_name: PDF_DEFAULT_COLLECTION.to_string(),
            ..Self::default()
        }
    }

    pub fn with_collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    pub fn with_persist_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.persist_directory = Some(dir.into());
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_summarize(mut self, summarize: bool) -> Self {
        self.summarize = summarize;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_embedding_api_key(mut self, key: impl Into<String>) -> Self {
        self.embedding_api_key = Some(key.into());
        self
    }

    /// Add one provider option.
    pub fn with_embedding_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.embedding_options.insert(key.into(), value.into());
        self
    }

    /// Overlay the settings that are set onto this config.
    ///
    /// Provider options are merged key by key.
    pub fn apply_settings(mut self, settings: &RagSettings) -> Self {
        if let Some(ref name) = settings.collection_name {
            self.collection_name = name.clone();
        }
        if let Some(ref dir) = settings.persist_directory {
            self.persist_directory = Some(dir.clone());
        }
        if let Some(ref model) = settings.embedding_model {
            self.embedding_model = model.clone();
        }
        if let Some(summarize) = settings.summarize {
            self.summarize = summarize;
        }
        if let Some(top_k) = settings.top_k {
            self.top_k = top_k;
        }
        if let Some(ref key) = settings.embedding_api_key {
            self.embedding_api_key = Some(key.clone());
        }
        for (key, value) in &settings.embedding_options {
            self.embedding_options.insert(key.clone(), value.clone());
        }
        self
    }

    /// Build from application config on top of `base` defaults.
    ///
    /// The API key is resolved through [`AppConfig::resolve_api_key`].
    pub fn from_app_config(base: Self, app: &AppConfig) -> Self {
        let mut config = base.apply_settings(&app.rag);
        if let Some(key) = app.resolve_api_key() {
            config.embedding_api_key = Some(key);
        }
        config
    }

    /// Engine constructor parameters with the given embedding options.
    pub fn engine_config(&self, embedding_config: EmbeddingConfig) -> EngineConfig {
        EngineConfig {
            collection_name: self.collection_name.clone(),
            persist_directory: self.persist_directory.clone(),
            embedding_model: self.embedding_model.clone(),
            summarize: self.summarize,
            top_k: self.top_k,
            embedding_config,
        }
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("collection_name", &self.collection_name)
            .field("persist_directory", &self.persist_directory)
            .field("embedding_model", &self.embedding_model)
            .field("summarize", &self.summarize)
            .field("top_k", &self.top_k)
            .field("embedding_api_key", &self.embedding_api_key.as_ref().map(|_| "***"))
            .field("embedding_options", &self.embedding_options)
            .finish()
    }
}

fn serialize_secret<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_str("***"),
        None => serializer.serialize_none(),
    }
}
