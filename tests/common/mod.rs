// tests/common/mod.rs — Shared mocks for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use synapse::core::LogRecord;
use synapse::infra::errors::{CompletionError, PersistenceError};
use synapse::memory::LogSink;
use synapse::provider::CompletionService;

/// Completion service that answers from a script, in call order, and keeps
/// every prompt it was sent.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Append a failing reply after the scripted ones.
    pub fn then_fail(self, status: u16) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(CompletionError::Status {
                provider: "scripted".into(),
                status,
                body: "provider unavailable".into(),
            }));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(CompletionError::Transport {
                provider: "scripted".into(),
                message: "no scripted reply left".into(),
            })
        })
    }
}

/// Sink that keeps records in memory, or fails every write.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn append(&self, record: &LogRecord) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Write("disk full".into()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub const BOXED_FOUR: &str = "Given:\n• 2 and 2\n\nSolution:\nStep 1: Add\n$$2 + 2 = 4$$\n\nFinal Answer:\n$$\\boxed{4}$$";
