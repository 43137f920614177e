//! Pass-through adapter.

use crate::config::AdapterConfig;
use crate::Adapter;
use ragtool_core::AppResult;
use ragtool_engine::{AddRequest, BuildEngine, EmbeddingConfig, EngineConfig, RagEngine};

/// Forwards `add` and `query` to the wrapped engine unchanged.
///
/// Output formatting (summarized or raw) is left entirely to the engine.
pub struct RagAdapter<E> {
    engine: E,
    summarize: bool,
}

impl<E: BuildEngine> RagAdapter<E> {
    /// Build the wrapped engine from `config`.
    pub fn new(config: AdapterConfig) -> AppResult<Self> {
        let engine = E::build(Self::engine_config(&config))?;
        Ok(Self::with_engine(&config, engine))
    }
}

impl<E: RagEngine> RagAdapter<E> {
    /// Wrap an engine that was built elsewhere.
    pub fn with_engine(config: &AdapterConfig, engine: E) -> Self {
        Self {
            engine,
            summarize: config.summarize,
        }
    }

    /// Engine parameters for `config`.
    ///
    /// The embedding mapping carries the API key and the provider options.
    pub fn engine_config(config: &AdapterConfig) -> EngineConfig {
        let embedding = EmbeddingConfig::new(config.embedding_api_key.clone())
            .with_provider_options(config.embedding_options.clone());
        config.engine_config(embedding)
    }

    /// Whether the engine was configured for summarized answers.
    pub fn summarize(&self) -> bool {
        self.summarize
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[async_trait::async_trait]
impl<E: RagEngine> Adapter for RagAdapter<E> {
    async fn add(&mut self, request: AddRequest) -> AppResult<()> {
        tracing::debug!("Forwarding add for {:?}", request.source());
        self.engine.add(request).await
    }

    async fn query(&self, question: &str) -> AppResult<String> {
        tracing::debug!("Forwarding query: {}", question);
        self.engine.query(question, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingEngine;
    use ragtool_core::AppError;
    use ragtool_engine::DataType;
    use serde_json::json;

    #[test]
    fn test_new_builds_engine_from_config() {
        let config = AdapterConfig::default()
            .with_embedding_api_key("sk-test")
            .with_embedding_option("dimensions", 256);

        let adapter: RagAdapter<RecordingEngine> = RagAdapter::new(config).unwrap();
        let built = adapter.engine().built_with.clone().unwrap();

        assert_eq!(built.collection_name, "crewai_knowledge_base");
        assert_eq!(built.embedding_model, "text-embedding-3-small");
        assert_eq!(built.top_k, 5);
        assert!(!built.summarize);
        assert_eq!(
            serde_json::Value::Object(built.embedding_config.to_map()),
            json!({"api_key": "sk-test", "dimensions": 256})
        );
    }

    #[test]
    fn test_embedding_mapping_has_no_model() {
        let config = AdapterConfig::default().with_embedding_model("custom-embed");
        let engine_config = RagAdapter::<RecordingEngine>::engine_config(&config);

        assert_eq!(engine_config.embedding_model, "custom-embed");
        assert!(!engine_config.embedding_config.to_map().contains_key("model"));
    }

    #[tokio::test]
    async fn test_add_forwards_request_unchanged() {
        let engine = RecordingEngine::responding("");
        let mut adapter = RagAdapter::with_engine(&AdapterConfig::default(), engine.clone());

        let request = AddRequest::from_args(["notes.txt", "extra.txt"])
            .with_data_type(DataType::TextFile)
            .with_option("chunk_size", 200);
        adapter.add(request.clone()).await.unwrap();

        assert_eq!(engine.adds(), vec![request]);
    }

    #[tokio::test]
    async fn test_query_passes_result_through() {
        let raw = "[Source: a.txt]\ncontent A\n\n[Source: b.txt]\ncontent B";
        let engine = RecordingEngine::responding(raw);
        let adapter = RagAdapter::with_engine(&AdapterConfig::default(), engine.clone());

        let answer = adapter.query("what is in a?").await.unwrap();

        assert_eq!(answer, raw);
        let call = engine.last_query();
        assert_eq!(call.question, "what is in a?");
        assert_eq!(call.filter, None);
    }

    #[tokio::test]
    async fn test_summarize_mode_is_identity() {
        let engine = RecordingEngine::responding("A concise summary.");
        let config = AdapterConfig::default().with_summarize(true);
        let adapter = RagAdapter::with_engine(&config, engine);

        assert!(adapter.summarize());
        assert_eq!(adapter.query("summary?").await.unwrap(), "A concise summary.");
    }

    #[tokio::test]
    async fn test_engine_errors_propagate() {
        let engine = RecordingEngine::failing("embedding provider unavailable");
        let mut adapter = RagAdapter::with_engine(&AdapterConfig::default(), engine);

        let add = adapter.add(AddRequest::new("x")).await;
        assert!(matches!(add, Err(AppError::Engine(ref m)) if m == "embedding provider unavailable"));

        let query = adapter.query("x").await;
        assert!(matches!(query, Err(AppError::Engine(_))));
    }
}
