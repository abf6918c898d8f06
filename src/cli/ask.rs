// src/cli/ask.rs — One-shot question from the command line

use crate::cli::render;
use crate::core::Question;
use crate::infra::config::Config;

pub async fn run_ask(words: &[String], json: bool, config: &Config) -> anyhow::Result<()> {
    let question = Question::parse(words.join(" "))?;
    let (pipeline, _store) = super::build_pipeline(config)?;

    let result = pipeline.submit(&question).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::render_result(&result));
    }
    Ok(())
}
