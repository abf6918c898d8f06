// src/cli/mod.rs — CLI definition (clap derive)

pub mod ask;
pub mod history;
pub mod render;
pub mod serve;

use clap::{Parser, Subcommand};
use std::sync::Arc;

use crate::core::{Pipeline, PipelineOptions};
use crate::infra::config::Config;
use crate::infra::errors::SynapseError;
use crate::memory::SharedStore;
use crate::provider::GeminiClient;

#[derive(Parser)]
#[command(
    name = "synapse",
    about = "Cross-checked answers to STEM questions",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web form and JSON API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ask a single question and print the result
    Ask {
        /// Question text
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Show recently logged questions
    History {
        /// Number of records to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: u32,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Default log level when neither SYNAPSE_LOG nor RUST_LOG is set.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "info",
            _ => "warn",
        }
    }
}

/// Wire the Gemini client and the lazily opened question log into a pipeline.
pub fn build_pipeline(config: &Config) -> Result<(Pipeline, SharedStore), SynapseError> {
    let client = GeminiClient::from_config(&config.provider)?;
    tracing::debug!(model = client.model(), "Completion client ready");

    let store = SharedStore::new(config.storage.resolved_db_path());
    let pipeline = Pipeline::new(
        Arc::new(client),
        Arc::new(store.clone()),
        PipelineOptions::from(&config.pipeline),
    )?;
    Ok((pipeline, store))
}
