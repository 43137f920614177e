//! Knowledge-base tool for host frameworks.

use crate::Adapter;
use ragtool_core::AppResult;
use ragtool_engine::AddRequest;

pub const DEFAULT_TOOL_NAME: &str = "Knowledge base";

pub const DEFAULT_TOOL_DESCRIPTION: &str =
    "A knowledge base that can be used to answer questions.";

/// A named tool answering questions from an adapter.
pub struct RagTool {
    name: String,
    description: String,
    adapter: Box<dyn Adapter>,
}

impl RagTool {
    pub fn new(adapter: impl Adapter + 'static) -> Self {
        Self {
            name: DEFAULT_TOOL_NAME.to_string(),
            description: DEFAULT_TOOL_DESCRIPTION.to_string(),
            adapter: Box::new(adapter),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Add content to the underlying knowledge base.
    pub async fn add(&mut self, request: AddRequest) -> AppResult<()> {
        self.adapter.add(request).await
    }

    /// Answer `query` with the relevant content from the knowledge base.
    pub async fn run(&self, query: &str) -> AppResult<String> {
        tracing::info!("Tool '{}' running query: {}", self.name, query);
        let content = self.adapter.query(query).await?;
        Ok(format!("Relevant Content:\n{}", content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use crate::pdf::PdfRagAdapter;
    use crate::rag::RagAdapter;
    use crate::testing::RecordingEngine;
    use ragtool_core::AppError;

    #[tokio::test]
    async fn test_run_prefixes_content() {
        let engine = RecordingEngine::responding("Paris is the capital.");
        let tool = RagTool::new(RagAdapter::with_engine(&AdapterConfig::default(), engine));

        assert_eq!(tool.name(), "Knowledge base");
        assert_eq!(
            tool.run("capital?").await.unwrap(),
            "Relevant Content:\nParis is the capital."
        );
    }

    #[tokio::test]
    async fn test_add_goes_through_adapter() {
        let engine = RecordingEngine::responding("[Source: a.pdf]\nbody");
        let adapter = PdfRagAdapter::with_engine(&AdapterConfig::pdf(), engine.clone());
        let mut tool = RagTool::new(adapter)
            .with_name("PDF search")
            .with_description("Searches a PDF");

        tool.add(AddRequest::new("a.pdf")).await.unwrap();
        let answer = tool.run("q").await.unwrap();

        assert_eq!(tool.name(), "PDF search");
        assert_eq!(tool.description(), "Searches a PDF");
        assert_eq!(answer, "Relevant Content:\nbody");
        assert_eq!(
            engine.last_query().filter,
            Some(ragtool_engine::WhereFilter::source("a.pdf"))
        );
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let engine = RecordingEngine::failing("index offline");
        let tool = RagTool::new(RagAdapter::with_engine(&AdapterConfig::default(), engine));

        assert!(matches!(tool.run("q").await, Err(AppError::Engine(_))));
    }
}
