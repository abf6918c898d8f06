// src/infra/errors.rs — Error types for Synapse

use thiserror::Error;

/// Failure of the external completion call. Fatal to the pipeline run.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Provider '{provider}' request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("Provider '{provider}' returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Provider '{provider}' sent an unreadable payload: {message}")]
    Payload { provider: String, message: String },
}

/// Failure to durably store a log record. Never fatal to an answer.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Log store unavailable: {0}")]
    Unavailable(String),

    #[error("Log write failed: {0}")]
    Write(String),
}

#[derive(Error, Debug)]
pub enum SynapseError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    // User errors
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No API key found. Set the {env_var} environment variable.")]
    NoApiKey { env_var: String },

    // Infra
    #[error("Prompt template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SynapseError {
    /// Whether the error came from the completion service (reported to
    /// callers as a generic processing failure).
    pub fn is_completion_failure(&self) -> bool {
        matches!(self, SynapseError::Completion(_))
    }
}
