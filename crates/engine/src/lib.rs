//! RAG engine seam for ragtool adapters.
//!
//! Defines the engine capability set the adapters wrap (`add` and `query`),
//! the values that cross that boundary, and [`MemoryEngine`], a small
//! in-process engine used by the CLI and tests.

pub mod blocks;
pub mod config;
pub mod data_type;
pub mod filter;
pub mod loader;
pub mod memory;
pub mod request;

pub use blocks::{format_source_block, join_blocks, BLOCK_SEPARATOR, SOURCE_MARKER};
pub use config::{EmbeddingConfig, EngineConfig};
pub use data_type::DataType;
pub use filter::WhereFilter;
pub use loader::{DocumentLoader, LoadedDocument};
pub use memory::{Document, MemoryEngine, NO_RESULTS};
pub use request::AddRequest;

use ragtool_core::AppResult;

/// A retrieval-augmented-generation engine.
///
/// Engines own embedding, storage and retrieval. Callers see two operations:
/// ingest a source and answer a question as formatted text.
#[async_trait::async_trait]
pub trait RagEngine: Send + Sync {
    /// Ingest the source described by `request` into the engine's index.
    async fn add(&self, request: AddRequest) -> AppResult<()>;

    /// Answer `question`, optionally restricted to documents matching `filter`.
    ///
    /// In raw mode the result is a sequence of `[Source: ...]` blocks joined by
    /// [`BLOCK_SEPARATOR`]; in summarize mode it is plain prose.
    async fn query(&self, question: &str, filter: Option<&WhereFilter>) -> AppResult<String>;
}

/// Engines that can be constructed from an [`EngineConfig`].
pub trait BuildEngine: RagEngine + Sized {
    fn build(config: EngineConfig) -> AppResult<Self>;
}
