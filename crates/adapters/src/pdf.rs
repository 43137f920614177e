//! PDF adapter with source-scoped queries.

use crate::config::AdapterConfig;
use crate::format::strip_source_citations;
use crate::Adapter;
use ragtool_core::AppResult;
use ragtool_engine::request::DATA_TYPE_OPTION;
use ragtool_engine::{
    AddRequest, BuildEngine, DataType, EmbeddingConfig, EngineConfig, RagEngine, WhereFilter,
};

/// Adapter for PDF knowledge bases.
///
/// Every ingested source is tagged as [`DataType::Pdf`]. The adapter
/// remembers the source of the most recent `add` and restricts queries to
/// it. In raw mode, `[Source: ...]` citation lines are stripped from the
/// engine's answer.
///
/// `add` needs `&mut self`; share an adapter across tasks only behind a lock,
/// or use [`PdfRagAdapter::session`] for a fixed source.
pub struct PdfRagAdapter<E> {
    engine: E,
    summarize: bool,
    src: Option<String>,
}

impl<E: BuildEngine> PdfRagAdapter<E> {
    /// Build the wrapped engine from `config`.
    pub fn new(config: AdapterConfig) -> AppResult<Self> {
        let engine = E::build(Self::engine_config(&config))?;
        Ok(Self::with_engine(&config, engine))
    }
}

impl<E: RagEngine> PdfRagAdapter<E> {
    /// Wrap an engine that was built elsewhere.
    pub fn with_engine(config: &AdapterConfig, engine: E) -> Self {
        Self {
            engine,
            summarize: config.summarize,
            src: None,
        }
    }

    /// Engine parameters for `config`.
    ///
    /// The embedding mapping carries the model, the API key and the provider
    /// options.
    pub fn engine_config(config: &AdapterConfig) -> EngineConfig {
        let embedding = EmbeddingConfig::new(config.embedding_api_key.clone())
            .with_model(config.embedding_model.clone())
            .with_provider_options(config.embedding_options.clone());
        config.engine_config(embedding)
    }

    /// Whether results are returned as-is instead of reshaped.
    pub fn summarize(&self) -> bool {
        self.summarize
    }

    /// Source of the most recent `add`, if it named one.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Filter that `query` applies: the last added source, or none.
    pub fn current_filter(&self) -> Option<WhereFilter> {
        self.src.as_ref().map(|src| WhereFilter::source(src.clone()))
    }

    /// Query with an explicit filter instead of the remembered source.
    ///
    /// The result is reshaped the same way as [`Adapter::query`].
    pub async fn query_with_filter(
        &self,
        question: &str,
        filter: Option<&WhereFilter>,
    ) -> AppResult<String> {
        tracing::debug!("PDF query '{}' (filter: {:?})", question, filter);
        let result = self.engine.query(question, filter).await?;
        Ok(self.reshape(result))
    }

    /// A view scoped to one source that leaves `src` untouched.
    pub fn session(&self, source: impl Into<String>) -> PdfSession<'_, E> {
        let source = source.into();
        PdfSession {
            filter: WhereFilter::source(source.clone()),
            adapter: self,
            source,
        }
    }

    fn reshape(&self, result: String) -> String {
        if self.summarize {
            result
        } else {
            strip_source_citations(&result)
        }
    }
}

/// Force the PDF document type; callers cannot override it.
fn as_pdf_request(mut request: AddRequest) -> AddRequest {
    if let Some(previous) = request.options.remove(DATA_TYPE_OPTION) {
        tracing::debug!("Ignoring caller data_type option {}", previous);
    }
    request.data_type = Some(DataType::Pdf);
    request
}

#[async_trait::async_trait]
impl<E: RagEngine> Adapter for PdfRagAdapter<E> {
    async fn add(&mut self, request: AddRequest) -> AppResult<()> {
        self.src = request.source().map(str::to_string);
        tracing::debug!("PDF add, current source now {:?}", self.src);
        self.engine.add(as_pdf_request(request)).await
    }

    async fn query(&self, question: &str) -> AppResult<String> {
        let filter = self.current_filter();
        self.query_with_filter(question, filter.as_ref()).await
    }
}

/// Source-scoped view of a [`PdfRagAdapter`].
///
/// Queries always filter on the session's source, whatever the adapter's
/// remembered source is.
pub struct PdfSession<'a, E> {
    adapter: &'a PdfRagAdapter<E>,
    source: String,
    filter: WhereFilter,
}

impl<E: RagEngine> PdfSession<'_, E> {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Ingest the session source as a PDF.
    ///
    /// `request.args` are replaced by the session source; options are kept.
    pub async fn add(&self, mut request: AddRequest) -> AppResult<()> {
        request.args = vec![self.source.clone()];
        self.adapter.engine.add(as_pdf_request(request)).await
    }

    pub async fn query(&self, question: &str) -> AppResult<String> {
        self.adapter
            .query_with_filter(question, Some(&self.filter))
            .await
    }
}
