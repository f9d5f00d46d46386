//! Feedback Synthesizer: one evaluation call per finished session.
//!
//! Sessions with too few candidate answers short-circuit to a neutral report
//! without calling the model. Otherwise the transcript, job description and
//! resume are embedded in a single prompt and the JSON reply is parsed strictly:
//! a reply that does not match the expected shape is an error, never a default.

use serde::Deserialize;
use tracing::{info, warn};

use crate::interview::prompts::{
    FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM, SHORT_INTERVIEW_FEEDBACK,
    SHORT_INTERVIEW_IMPROVEMENTS,
};
use crate::interview::{EngineError, EngineSettings};
use crate::llm_client::prompts::{fill_template, GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{strip_json_fences, CompletionClient, CompletionRequest};
use crate::models::interview::{FeedbackReport, Role, SessionConfig, Turn};

const FEEDBACK_MAX_TOKENS: u32 = 1000;
const FEEDBACK_TEMPERATURE: f32 = 0.2;
/// Neutral score for sessions too short to assess.
pub const SHORT_INTERVIEW_RATING: u8 = 5;

/// Shape the model is asked to return. Unknown fields are tolerated, missing ones are not.
#[derive(Debug, Deserialize)]
struct RawFeedback {
    rating: i64,
    feedback: String,
    improvements: Vec<String>,
}

/// Produces the end-of-session report for `history`.
pub async fn produce_report(
    llm: &dyn CompletionClient,
    settings: &EngineSettings,
    config: &SessionConfig,
    history: &[Turn],
) -> Result<FeedbackReport, EngineError> {
    config.check().map_err(EngineError::InvalidInput)?;
    if history.is_empty() {
        return Err(EngineError::EmptyTranscript);
    }

    let answer_count = history.iter().filter(|t| t.role == Role::User).count();
    if answer_count < settings.min_user_turns_for_report {
        info!(
            "Short interview ({} of {} answers), skipping evaluation call",
            answer_count, settings.min_user_turns_for_report
        );
        return Ok(short_interview_report(answer_count));
    }

    let system = format!("{FEEDBACK_SYSTEM}\n\n{GROUNDING_INSTRUCTION}\n\n{JSON_ONLY_SYSTEM}");
    let turns = vec![Turn::user(build_feedback_prompt(config, history))];

    let raw = llm
        .complete(CompletionRequest {
            system: &system,
            turns: &turns,
            max_tokens: FEEDBACK_MAX_TOKENS,
            temperature: FEEDBACK_TEMPERATURE,
        })
        .await?;

    let report = parse_report(&raw)?;
    info!(
        "Feedback report: rating={}/10, {} improvements",
        report.rating,
        report.improvements.len()
    );
    Ok(report)
}

fn short_interview_report(answer_count: usize) -> FeedbackReport {
    FeedbackReport {
        rating: SHORT_INTERVIEW_RATING,
        feedback: fill_template(
            SHORT_INTERVIEW_FEEDBACK,
            &[("answer_count", answer_count.to_string().as_str())],
        ),
        improvements: SHORT_INTERVIEW_IMPROVEMENTS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn build_feedback_prompt(config: &SessionConfig, history: &[Turn]) -> String {
    let or_none = |text: &str| {
        let text = text.trim();
        if text.is_empty() {
            "(not provided)".to_string()
        } else {
            text.to_string()
        }
    };

    let difficulty = config.difficulty.label().to_lowercase();
    let job_description = or_none(&config.job_description);
    let resume_text = or_none(&config.resume_text);
    let transcript = render_transcript(config, history);

    fill_template(
        FEEDBACK_PROMPT_TEMPLATE,
        &[
            ("difficulty", difficulty.as_str()),
            ("job_description", job_description.as_str()),
            ("resume_text", resume_text.as_str()),
            ("transcript", transcript.as_str()),
        ],
    )
}

/// "Interviewer: …" / "<candidate name>: …" lines in chronological order.
fn render_transcript(config: &SessionConfig, history: &[Turn]) -> String {
    let candidate = config.candidate_name.trim();
    history
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                Role::Assistant => "Interviewer",
                Role::User => candidate,
            };
            format!("{speaker}: {}", turn.content.trim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_report(raw: &str) -> Result<FeedbackReport, EngineError> {
    let parsed: RawFeedback = serde_json::from_str(strip_json_fences(raw)).map_err(|e| {
        warn!(
            "Unparseable feedback reply: {:?}",
            raw.chars().take(80).collect::<String>()
        );
        EngineError::MalformedReport(e.to_string())
    })?;

    let rating = u8::try_from(parsed.rating)
        .ok()
        .filter(|r| (1..=10).contains(r))
        .ok_or_else(|| {
            EngineError::MalformedReport(format!("rating {} is outside 1-10", parsed.rating))
        })?;

    if parsed.feedback.trim().is_empty() {
        return Err(EngineError::MalformedReport(
            "feedback text is empty".to_string(),
        ));
    }

    Ok(FeedbackReport {
        rating,
        feedback: parsed.feedback.trim().to_string(),
        improvements: parsed
            .improvements
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}
