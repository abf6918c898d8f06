// src/core/types.rs — Pipeline data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::errors::SynapseError;

/// Labels attached to the two generated answers, in invocation order.
pub const FIRST_MODEL_LABEL: &str = "gemini-1";
pub const SECOND_MODEL_LABEL: &str = "gemini-2";

/// A submitted question. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
}

impl Question {
    /// Accept any non-empty text, kept verbatim. Whitespace-only text is
    /// left for the validation gate to judge.
    pub fn parse(text: impl Into<String>) -> Result<Self, SynapseError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SynapseError::EmptyQuestion);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One model invocation's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAnswer {
    pub text: String,
    #[serde(rename = "model")]
    pub model_label: String,
}

impl ModelAnswer {
    pub fn new(text: impl Into<String>, model_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_label: model_label.into(),
        }
    }
}

/// Which of the two answers the arbiter picked. Serialized as 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ChosenAnswer {
    First,
    Second,
}

impl ChosenAnswer {
    pub fn index(self) -> u8 {
        match self {
            ChosenAnswer::First => 1,
            ChosenAnswer::Second => 2,
        }
    }

    /// Pick the chosen entry out of an ordered pair.
    pub fn select<T>(self, pair: &[T; 2]) -> &T {
        match self {
            ChosenAnswer::First => &pair[0],
            ChosenAnswer::Second => &pair[1],
        }
    }
}

impl From<ChosenAnswer> for u8 {
    fn from(c: ChosenAnswer) -> u8 {
        c.index()
    }
}

impl TryFrom<u8> for ChosenAnswer {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(ChosenAnswer::First),
            2 => Ok(ChosenAnswer::Second),
            other => Err(format!("chosen answer must be 1 or 2, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrationOutcome {
    pub chosen: ChosenAnswer,
    /// Full arbiter response, kept as the rationale.
    pub reason: String,
}

/// Outcome of one pipeline run. Exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum PipelineResult {
    #[serde(rename = "edit")]
    NeedsEdit { feedback: String },

    #[serde(rename = "answer")]
    Answered {
        #[serde(rename = "answer")]
        final_answer: String,
        answers: [ModelAnswer; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arbitration: Option<ArbitrationOutcome>,
    },
}

impl PipelineResult {
    pub fn is_answered(&self) -> bool {
        matches!(self, PipelineResult::Answered { .. })
    }
}

/// Append-only record of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiguity_feedback: Option<String>,
    #[serde(default)]
    pub answers: Vec<ModelAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arbitration: Option<ArbitrationOutcome>,
    pub created_at: DateTime<Utc>,
}

impl LogRecord {
    fn new(question: &Question) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.text().to_string(),
            ambiguity_feedback: None,
            answers: Vec::new(),
            arbitration: None,
            created_at: Utc::now(),
        }
    }

    /// Record for a question rejected at the validation gate.
    pub fn rejected(question: &Question, feedback: &str) -> Self {
        Self {
            ambiguity_feedback: Some(feedback.to_string()),
            ..Self::new(question)
        }
    }

    /// Record for an answered question, with arbitration when one ran.
    pub fn answered(
        question: &Question,
        answers: &[ModelAnswer; 2],
        arbitration: Option<&ArbitrationOutcome>,
    ) -> Self {
        Self {
            answers: answers.to_vec(),
            arbitration: arbitration.cloned(),
            ..Self::new(question)
        }
    }
}
