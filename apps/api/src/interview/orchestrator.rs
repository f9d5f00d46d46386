//! Interview Orchestrator: produces the next interviewer reply.
//!
//! Flow: phase → compose → model call → validate →
//!       accept | repair (bounded re-ask, last attempt accepted unless degenerate)
//!       | reject (scripted fallback).
//!
//! Validator problems never surface as errors; the caller always gets text.
//! Transport/auth failures from the completion client are propagated unchanged.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::interview::composer::{compose_prompt, Correction};
use crate::interview::phase::Phase;
use crate::interview::prompts::{
    FALLBACK_BEHAVIORAL, FALLBACK_INTRODUCTION, FALLBACK_TECHNICAL, FALLBACK_WRAPUP,
};
use crate::interview::validator::{
    validate_reply, ValidationContext, ValidationVerdict, VerdictStatus, Violation,
};
use crate::interview::{EngineError, EngineSettings};
use crate::llm_client::{CompletionClient, CompletionRequest};
use crate::models::interview::{SessionConfig, Turn};

/// Replies are spoken aloud, so keep them short.
const REPLY_MAX_TOKENS: u32 = 250;
const REPLY_TEMPERATURE: f32 = 0.6;

/// How the returned text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOutcome {
    Accepted,
    Repaired,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewReply {
    pub text: String,
    pub phase: Phase,
    pub outcome: ReplyOutcome,
}

/// Scripted continuation used when a model reply is rejected.
pub fn fallback_reply(phase: Phase) -> &'static str {
    match phase {
        Phase::Introduction => FALLBACK_INTRODUCTION,
        Phase::Technical => FALLBACK_TECHNICAL,
        Phase::Behavioral => FALLBACK_BEHAVIORAL,
        Phase::Wrapup => FALLBACK_WRAPUP,
    }
}

/// Produces the next interviewer reply for `history`.
///
/// The caller appends the candidate's newest turn before calling and appends the
/// returned text as an assistant turn afterwards.
pub async fn produce_reply(
    llm: &dyn CompletionClient,
    settings: &EngineSettings,
    config: &SessionConfig,
    history: &[Turn],
) -> Result<InterviewReply, EngineError> {
    config.check().map_err(EngineError::InvalidInput)?;

    let phase = Phase::for_history(history);
    let ctx = ValidationContext {
        phase,
        config,
        history,
        min_reply_chars: settings.min_reply_chars,
    };
    info!("Producing {} reply ({} turns so far)", phase.label(), history.len());

    let mut draft = request_reply(llm, config, history, phase, None).await?;
    let mut verdict = validate_reply(&draft, &ctx);
    log_verdict(&verdict, 0);

    let mut attempt = 0;
    loop {
        match verdict.status {
            VerdictStatus::Accept => {
                let outcome = if attempt == 0 {
                    ReplyOutcome::Accepted
                } else {
                    ReplyOutcome::Repaired
                };
                return Ok(finish(draft, phase, outcome));
            }
            VerdictStatus::Reject => {
                warn!(
                    "Reply rejected ({}), using {:?} fallback",
                    codes(&verdict),
                    phase
                );
                return Ok(finish(
                    fallback_reply(phase).to_string(),
                    phase,
                    ReplyOutcome::Fallback,
                ));
            }
            VerdictStatus::Repair if settings.max_repair_attempts == 0 => {
                warn!("Repair disabled, using {:?} fallback", phase);
                return Ok(finish(
                    fallback_reply(phase).to_string(),
                    phase,
                    ReplyOutcome::Fallback,
                ));
            }
            VerdictStatus::Repair => {
                attempt += 1;
                let correction = Correction {
                    violations: &verdict.reasons,
                    rejected_reply: &draft,
                };
                let repaired =
                    request_reply(llm, config, history, phase, Some(correction)).await?;
                let repaired_verdict = validate_reply(&repaired, &ctx);
                log_verdict(&repaired_verdict, attempt);

                if attempt >= settings.max_repair_attempts {
                    // Final attempt is accepted unless there is nothing to show.
                    if repaired_verdict.reasons.contains(&Violation::Degenerate) {
                        warn!("Final repair attempt is degenerate, using {:?} fallback", phase);
                        return Ok(finish(
                            fallback_reply(phase).to_string(),
                            phase,
                            ReplyOutcome::Fallback,
                        ));
                    }
                    if !repaired_verdict.is_accept() {
                        warn!(
                            "Final repair attempt still flagged ({}); accepting it",
                            codes(&repaired_verdict)
                        );
                    }
                    return Ok(finish(repaired, phase, ReplyOutcome::Repaired));
                }
                draft = repaired;
                verdict = repaired_verdict;
            }
        }
    }
}

async fn request_reply(
    llm: &dyn CompletionClient,
    config: &SessionConfig,
    history: &[Turn],
    phase: Phase,
    correction: Option<Correction<'_>>,
) -> Result<String, EngineError> {
    let prompt = compose_prompt(config, history, phase, correction);
    let text = llm
        .complete(CompletionRequest {
            system: &prompt.system,
            turns: &prompt.turns,
            max_tokens: REPLY_MAX_TOKENS,
            temperature: REPLY_TEMPERATURE,
        })
        .await?;
    Ok(text)
}

fn finish(text: String, phase: Phase, outcome: ReplyOutcome) -> InterviewReply {
    InterviewReply {
        text: text.trim().to_string(),
        phase,
        outcome,
    }
}

fn codes(verdict: &ValidationVerdict) -> String {
    verdict
        .reasons
        .iter()
        .map(|v| v.code())
        .collect::<Vec<_>>()
        .join(", ")
}

fn log_verdict(verdict: &ValidationVerdict, attempt: u32) {
    if verdict.is_accept() {
        info!("Reply accepted on attempt {}", attempt + 1);
    } else {
        warn!(
            "Reply attempt {} flagged {:?}: {}",
            attempt + 1,
            verdict.status,
            codes(verdict)
        );
    }
}
