// src/main.rs — Synapse entry point

use clap::Parser;

use synapse::cli::{Cli, Commands};
use synapse::infra::config::Config;
use synapse::infra::logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Respects SYNAPSE_LOG / RUST_LOG
    logger::init_logging(cli.command.default_log_level());

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Serve { host, port } => {
            synapse::cli::serve::run_serve(host, port, &config).await
        }
        Commands::Ask { question, json } => {
            synapse::cli::ask::run_ask(&question, json, &config).await
        }
        Commands::History { limit, json } => {
            synapse::cli::history::run_history(limit, json, &config).await
        }
    }
}
