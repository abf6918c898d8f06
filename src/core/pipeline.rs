// src/core/pipeline.rs — Validate → answer twice → reconcile

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::prompts::Prompts;
use super::types::{
    ArbitrationOutcome, LogRecord, ModelAnswer, PipelineResult, Question, FIRST_MODEL_LABEL,
    SECOND_MODEL_LABEL,
};
use super::verdict::{self, GateDecision};
use crate::infra::config::PipelineConfig;
use crate::infra::errors::SynapseError;
use crate::memory::LogSink;
use crate::provider::CompletionService;

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub parallel_answers: bool,
}

impl From<&PipelineConfig> for PipelineOptions {
    fn from(c: &PipelineConfig) -> Self {
        Self {
            parallel_answers: c.parallel_answers,
        }
    }
}

/// One question in, one `PipelineResult` out. Holds no per-question state,
/// so a single instance serves concurrent submissions.
pub struct Pipeline {
    completion: Arc<dyn CompletionService>,
    sink: Arc<dyn LogSink>,
    prompts: Prompts,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        sink: Arc<dyn LogSink>,
        options: PipelineOptions,
    ) -> Result<Self, SynapseError> {
        Ok(Self {
            completion,
            sink,
            prompts: Prompts::new()?,
            options,
        })
    }

    /// Run the full workflow. A completion failure at any stage aborts the
    /// run; log write failures never do.
    pub async fn submit(&self, question: &Question) -> Result<PipelineResult, SynapseError> {
        // Stage 1: validation gate
        let check_prompt = self.prompts.validation(question.text())?;
        let check = self.complete("validation", &check_prompt).await?;
        debug!(chars = check.len(), "Validation response received");

        if verdict::gate_decision(&check) == GateDecision::NeedsEdit {
            info!("Question rejected at validation gate");
            self.record(LogRecord::rejected(question, &check)).await;
            return Ok(PipelineResult::NeedsEdit { feedback: check });
        }

        // Stage 2: two independent answers
        let answers = self.dual_answer(question).await?;

        // Stage 3: reconcile
        if verdict::answers_agree(&answers[0].text, &answers[1].text) {
            info!("Answers agree, skipping arbitration");
            self.record(LogRecord::answered(question, &answers, None)).await;
            return Ok(PipelineResult::Answered {
                final_answer: answers[0].text.clone(),
                answers,
                arbitration: None,
            });
        }

        let arb_prompt = self.prompts.arbitration(
            question.text(),
            &answers[0].text,
            &answers[1].text,
        )?;
        let reason = self.complete("arbitration", &arb_prompt).await?;
        let chosen = verdict::parse_arbitration(&reason);
        info!(chosen = chosen.index(), "Answers differ, arbiter decided");

        let arbitration = ArbitrationOutcome { chosen, reason };
        let final_answer = chosen.select(&answers).text.clone();
        self.record(LogRecord::answered(question, &answers, Some(&arbitration)))
            .await;

        Ok(PipelineResult::Answered {
            final_answer,
            answers,
            arbitration: Some(arbitration),
        })
    }

    async fn dual_answer(&self, question: &Question) -> Result<[ModelAnswer; 2], SynapseError> {
        let prompt = self.prompts.answer(question.text())?;

        let (first, second) = if self.options.parallel_answers {
            futures::future::try_join(
                self.complete("answer", &prompt),
                self.complete("answer", &prompt),
            )
            .await?
        } else {
            let first = self.complete("answer", &prompt).await?;
            let second = self.complete("answer", &prompt).await?;
            (first, second)
        };
        debug!(
            first_chars = first.len(),
            second_chars = second.len(),
            "Answers received"
        );

        Ok([
            ModelAnswer::new(first, FIRST_MODEL_LABEL),
            ModelAnswer::new(second, SECOND_MODEL_LABEL),
        ])
    }

    async fn complete(&self, stage: &'static str, prompt: &str) -> Result<String, SynapseError> {
        self.completion.complete(prompt).await.map_err(|e| {
            warn!(provider = self.completion.id(), stage, "Completion failed: {e}");
            SynapseError::from(e)
        })
    }

    async fn record(&self, record: LogRecord) {
        if let Err(e) = self.sink.append(&record).await {
            warn!(record_id = %record.id, "Question log write dropped: {e}");
        }
    }
}
