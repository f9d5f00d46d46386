// Interview orchestration engine.
// Implements: phase classification, prompt composition, reply validation with bounded
// repair, and end-of-session feedback. Stateless: every call takes the full session.
// All LLM calls go through llm_client::CompletionClient.

pub mod composer;
pub mod feedback;
pub mod handlers;
pub mod orchestrator;
pub mod phase;
pub mod prompts;
pub mod speech;
pub mod validator;

use thiserror::Error;

use crate::errors::AppError;
use crate::llm_client::LlmError;

/// Product-tuning thresholds. Defaults can be overridden from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Minimum alphanumeric characters for a reply to count as a real remark.
    pub min_reply_chars: usize,
    /// Fewer candidate answers than this short-circuits the feedback report.
    pub min_user_turns_for_report: usize,
    /// Corrective re-asks per reply. The last attempt is accepted as-is.
    pub max_repair_attempts: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_reply_chars: 12,
            min_user_turns_for_report: 4,
            max_repair_attempts: 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid session config: {0}")]
    InvalidInput(String),

    #[error("Cannot produce a report for an empty transcript")]
    EmptyTranscript,

    #[error("Model returned a malformed feedback report: {0}")]
    MalformedReport(String),

    #[error("Completion failed: {0}")]
    Completion(#[from] LlmError),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(msg) => AppError::Validation(msg),
            EngineError::EmptyTranscript => AppError::Validation(err.to_string()),
            EngineError::MalformedReport(msg) => AppError::MalformedReport(msg),
            EngineError::Completion(e) => AppError::Llm(e.to_string()),
        }
    }
}
