// src/core/mod.rs — Question pipeline

pub mod pipeline;
pub mod prompts;
pub mod types;
pub mod verdict;

pub use pipeline::{Pipeline, PipelineOptions};
pub use types::{ArbitrationOutcome, ChosenAnswer, LogRecord, ModelAnswer, PipelineResult, Question};
