use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::feedback::produce_report;
use crate::interview::orchestrator::{produce_reply, ReplyOutcome};
use crate::interview::phase::Phase;
use crate::interview::speech::sanitize_for_speech;
use crate::models::interview::{FeedbackReport, SessionConfig, Turn};
use crate::state::AppState;

/// Body shared by the chat and feedback endpoints: the session config plus the
/// full turn history. The service keeps nothing between calls.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Client-chosen id, only used to correlate log lines.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(flatten)]
    pub config: SessionConfig,
    #[serde(default)]
    pub messages: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub phase: Phase,
    pub outcome: ReplyOutcome,
    pub speech_text: String,
}

fn session_span(kind: &'static str, session_id: Option<Uuid>) -> tracing::Span {
    match session_id {
        Some(id) => tracing::info_span!("interview", kind, session_id = %id),
        None => tracing::info_span!("interview", kind),
    }
}

/// POST /api/v1/interview/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let span = session_span("chat", req.session_id);
    let reply = produce_reply(
        state.llm.as_ref(),
        &state.config.engine,
        &req.config,
        &req.messages,
    )
    .instrument(span)
    .await?;

    let speech_text = sanitize_for_speech(&reply.text);
    Ok(Json(ChatResponse {
        response: reply.text,
        phase: reply.phase,
        outcome: reply.outcome,
        speech_text,
    }))
}

/// POST /api/v1/interview/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<FeedbackReport>, AppError> {
    let span = session_span("feedback", req.session_id);
    let report = produce_report(
        state.llm.as_ref(),
        &state.config.engine,
        &req.config,
        &req.messages,
    )
    .instrument(span)
    .await?;
    Ok(Json(report))
}
