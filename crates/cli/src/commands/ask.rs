//! Ask command handler.
//!
//! Loads the given sources into an in-memory knowledge base and answers one
//! question about them.

use clap::Args;
use ragtool_adapters::{Adapter, AdapterConfig, RagAdapter};
use ragtool_core::{config::AppConfig, AppResult};
use ragtool_engine::{AddRequest, MemoryEngine};

/// Ingest sources and ask a question about them
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Source to ingest (file, directory or literal text); repeatable
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Collection name
    #[arg(long)]
    pub collection: Option<String>,

    /// Number of results to retrieve
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Return prose instead of cited source blocks
    #[arg(long)]
    pub summarize: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Resolve the adapter configuration: defaults, then config file and
    /// environment, then flags.
    fn adapter_config(&self, config: &AppConfig) -> AdapterConfig {
        let mut adapter_config = AdapterConfig::from_app_config(AdapterConfig::default(), config);

        if let Some(ref collection) = self.collection {
            adapter_config.collection_name = collection.clone();
        }
        if let Some(top_k) = self.top_k {
            adapter_config.top_k = top_k;
        }
        if self.summarize {
            adapter_config.summarize = true;
        }

        adapter_config
    }

    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command with {} source(s)", self.sources.len());

        let adapter_config = self.adapter_config(config);
        tracing::debug!("Adapter config: {:?}", adapter_config);

        let mut adapter: RagAdapter<MemoryEngine> = RagAdapter::new(adapter_config.clone())?;

        for source in &self.sources {
            adapter.add(AddRequest::new(source.clone())).await?;
        }

        let answer = adapter.query(&self.question).await?;

        if self.json {
            let output = serde_json::json!({
                "collection": adapter_config.collection_name,
                "question": self.question,
                "sources": self.sources,
                "summarize": adapter_config.summarize,
                "answer": answer,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
