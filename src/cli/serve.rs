// src/cli/serve.rs — HTTP server command

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::infra::config::Config;

pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut server = config.server.clone();
    if let Some(h) = host {
        server.host = h;
    }
    if let Some(p) = port {
        server.port = p;
    }

    let (pipeline, _store) = super::build_pipeline(config)?;
    tracing::info!(
        model = %config.provider.model,
        parallel_answers = config.pipeline.parallel_answers,
        "Pipeline ready"
    );

    let state = ApiState {
        pipeline: Arc::new(pipeline),
    };
    api::start_server(&server, state).await
}
