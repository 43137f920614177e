//! Config command handler.

use clap::Args;
use ragtool_adapters::{AdapterConfig, PdfRagAdapter, RagAdapter};
use ragtool_core::{config::AppConfig, AppResult};
use ragtool_engine::MemoryEngine;

/// Show the resolved adapter configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Show the PDF adapter configuration
    #[arg(long)]
    pub pdf: bool,

    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

impl ConfigCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing config command (pdf: {})", self.pdf);

        let base = if self.pdf {
            AdapterConfig::pdf()
        } else {
            AdapterConfig::default()
        };
        let adapter_config = AdapterConfig::from_app_config(base, config);

        let mut engine_config = if self.pdf {
            PdfRagAdapter::<MemoryEngine>::engine_config(&adapter_config)
        } else {
            RagAdapter::<MemoryEngine>::engine_config(&adapter_config)
        };
        engine_config.embedding_config = engine_config.embedding_config.redacted();

        let output = serde_json::json!({
            "adapter": adapter_config,
            "engine": engine_config,
        });

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print!("{}", serde_yaml::to_string(&output)?);
        }

        Ok(())
    }
}
