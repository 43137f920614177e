//! Knowledge-base adapters for tool frameworks.
//!
//! Exposes a RAG engine through the narrow [`Adapter`] interface: `add` a
//! source, `query` with a question, get text back.
//!
//! - [`RagAdapter`]: forwards both calls to the wrapped engine unchanged.
//! - [`PdfRagAdapter`]: ingests PDFs, scopes queries to the last added source
//!   and strips citation lines from raw results.
//! - [`RagTool`]: host-facing tool wrapping any adapter.
//!
//! # Example
//! ```no_run
//! use ragtool_adapters::{Adapter, AdapterConfig, RagAdapter};
//! use ragtool_engine::{AddRequest, MemoryEngine};
//!
//! # async fn example() -> ragtool_core::AppResult<()> {
//! let mut adapter: RagAdapter<MemoryEngine> = RagAdapter::new(AdapterConfig::default())?;
//! adapter.add(AddRequest::new("notes.txt")).await?;
//! println!("{}", adapter.query("What changed?").await?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod format;
pub mod pdf;
pub mod rag;
pub mod tool;

#[cfg(test)]
mod testing;

pub use config::AdapterConfig;
pub use format::strip_source_citations;
pub use pdf::{PdfRagAdapter, PdfSession};
pub use rag::RagAdapter;
pub use tool::RagTool;

use ragtool_core::AppResult;
use ragtool_engine::AddRequest;

/// The interface a host tool framework consumes.
#[async_trait::async_trait]
pub trait Adapter: Send + Sync {
    /// Add content to the knowledge base.
    async fn add(&mut self, request: AddRequest) -> AppResult<()>;

    /// Query the knowledge base with a question and return the answer.
    async fn query(&self, question: &str) -> AppResult<String>;
}
