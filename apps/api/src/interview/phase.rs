//! Phase Classifier: maps how far an interview has progressed to one of four
//! ordered phases. Pure and total; `Wrapup` is absorbing.

use serde::{Deserialize, Serialize};

use crate::models::interview::{Role, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Introduction,
    Technical,
    Behavioral,
    Wrapup,
}

impl Phase {
    /// Phase for the assistant turn with the given 1-based ordinal.
    ///
    /// 1–2 introduction, 3–5 technical, 6–8 behavioral, 9+ wrapup.
    /// Ordinal 0 never comes out of a history but is still introduction.
    pub fn for_ordinal(ordinal: usize) -> Self {
        match ordinal {
            0..=2 => Phase::Introduction,
            3..=5 => Phase::Technical,
            6..=8 => Phase::Behavioral,
            _ => Phase::Wrapup,
        }
    }

    /// Phase of the next assistant turn, given everything said so far.
    pub fn for_history(history: &[Turn]) -> Self {
        Self::for_ordinal(next_assistant_ordinal(history))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Introduction => "INTRODUCTION",
            Phase::Technical => "TECHNICAL",
            Phase::Behavioral => "BEHAVIORAL",
            Phase::Wrapup => "WRAP_UP",
        }
    }

    /// Phases in which the interviewer talks about the candidate's background
    /// and must be screened for unsupported claims.
    pub fn discusses_background(&self) -> bool {
        matches!(self, Phase::Technical | Phase::Behavioral)
    }
}

/// 1-based ordinal of the assistant turn about to be produced.
pub fn next_assistant_ordinal(history: &[Turn]) -> usize {
    history.iter().filter(|t| t.role == Role::Assistant).count() + 1
}
