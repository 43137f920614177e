//! Engine and embedding configuration.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Configuration handed to an engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    /// Named partition of stored documents
    pub collection_name: String,

    /// Storage location; `None` lets the engine pick its default
    pub persist_directory: Option<PathBuf>,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Return prose instead of cited source blocks
    pub summarize: bool,

    /// Number of results per query
    pub top_k: usize,

    /// Options for the embedding provider
    pub embedding_config: EmbeddingConfig,
}

/// Embedding provider options.
///
/// Rendered as a flat mapping: `model` (when set), `api_key`, then every
/// provider option. Provider options are merged last and win on key
/// collisions; they are passed through without interpretation.
#[derive(Clone, Default, PartialEq)]
pub struct EmbeddingConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub provider_options: Map<String, Value>,
}

impl EmbeddingConfig {
    /// Create an embedding config carrying only an API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            model: None,
            api_key,
            provider_options: Map::new(),
        }
    }

    /// Include the model identifier in the mapping.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the opaque provider options.
    pub fn with_provider_options(mut self, options: Map<String, Value>) -> Self {
        self.provider_options = options;
        self
    }

    /// Render the mapping passed to the embedding provider.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(ref model) = self.model {
            map.insert("model".to_string(), Value::String(model.clone()));
        }
        map.insert(
            "api_key".to_string(),
            self.api_key.clone().map(Value::String).unwrap_or(Value::Null),
        );
        for (key, value) in &self.provider_options {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("provider_options", &self.provider_options)
            .finish()
    }
}

impl Serialize for EmbeddingConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_without_model() {
        let config = EmbeddingConfig::new(Some("sk-test".to_string()));
        let map = config.to_map();

        assert_eq!(map.get("api_key"), Some(&json!("sk-test")));
        assert!(!map.contains_key("model"));
    }

    #[test]
    fn test_map_missing_api_key_is_null() {
        let map = EmbeddingConfig::new(None).to_map();
        assert_eq!(map.get("api_key"), Some(&Value::Null));
    }

    #[test]
    fn test_provider_options_win_on_collision() {
        let mut options = Map::new();
        options.insert("model".to_string(), json!("override-model"));
        options.insert("dimensions".to_string(), json!(256));

        let config = EmbeddingConfig::new(None)
            .with_model("text-embedding-3-small")
            .with_provider_options(options);
        let map = config.to_map();

        assert_eq!(map.get("model"), Some(&json!("override-model")));
        assert_eq!(map.get("dimensions"), Some(&json!(256)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = EmbeddingConfig::new(Some("sk-secret".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_redacted_serialization() {
        let config = EmbeddingConfig::new(Some("sk-secret".to_string())).redacted();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({"api_key": "***"}));
    }
}
