pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::interview::handlers as interview;
use crate::resume::handlers::{self as resume, MAX_UPLOAD_BYTES};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/v1/interview/chat", post(interview::handle_chat))
        .route("/api/v1/interview/feedback", post(interview::handle_feedback))
        // Resume API
        .route(
            "/api/v1/resume/extract",
            post(resume::handle_extract).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::interview::EngineSettings;
    use crate::llm_client::testing::ScriptedClient;
    use crate::llm_client::LlmError;

    fn app(llm: Arc<ScriptedClient>) -> Router {
        build_router(AppState {
            llm,
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                allowed_origin: None,
                engine: EngineSettings::default(),
            },
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn session(messages: Value) -> Value {
        json!({
            "session_id": "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b",
            "candidate_name": "Jane Smith",
            "resume_text": "Backend engineer with 3 years of Rust and Kafka.",
            "job_description": "Senior backend engineer",
            "difficulty": "medium",
            "messages": messages
        })
    }

    fn answered_rounds(n: usize) -> Value {
        let turns: Vec<Value> = (0..n)
            .flat_map(|i| {
                [
                    json!({"role": "assistant", "content": format!("Question {i}?")}),
                    json!({"role": "user", "content": format!("Answer {i}.")}),
                ]
            })
            .collect();
        Value::Array(turns)
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::new(ScriptedClient::new(Vec::<String>::new())))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "interview-api");
    }

    #[tokio::test]
    async fn test_chat_returns_accepted_reply_with_phase() {
        let llm = Arc::new(ScriptedClient::new([
            "Great, could you describe a challenging bug you fixed?",
        ]));
        let messages = json!([
            {"role": "assistant", "content": "Welcome! Please introduce yourself."},
            {"role": "user", "content": "Hi, I'm Jane, a backend engineer."}
        ]);
        let (status, body) = post_json(
            app(llm.clone()),
            "/api/v1/interview/chat",
            session(messages),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Great, could you describe a challenging bug you fixed?"
        );
        assert_eq!(body["phase"], "introduction");
        assert_eq!(body["outcome"], "accepted");
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_speech_text_is_sanitized() {
        let llm = Arc::new(ScriptedClient::new([
            "How would you version a public API for mobile clients?",
        ]));
        let (status, body) = post_json(
            app(llm),
            "/api/v1/interview/chat",
            session(answered_rounds(3)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "technical");
        assert!(body["response"].as_str().unwrap().contains("public API"));
        assert!(body["speech_text"]
            .as_str()
            .unwrap()
            .contains("public A. P. I."));
    }

    #[tokio::test]
    async fn test_chat_placeholder_reply_falls_back() {
        let llm = Arc::new(ScriptedClient::new(["[Awaiting response...]"]));
        let (status, body) =
            post_json(app(llm), "/api/v1/interview/chat", session(json!([]))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "fallback");
        assert_eq!(body["phase"], "introduction");
        assert!(!body["response"].as_str().unwrap().contains('['));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_candidate_name() {
        let llm = Arc::new(ScriptedClient::new(["unused"]));
        let mut body = session(json!([]));
        body["candidate_name"] = json!("   ");
        let (status, body) = post_json(app(llm.clone()), "/api/v1/interview/chat", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_transport_failure_is_bad_gateway() {
        let llm = Arc::new(ScriptedClient::failing(LlmError::RateLimited { retries: 3 }));
        let (status, body) =
            post_json(app(llm), "/api/v1/interview/chat", session(json!([]))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_feedback_short_interview_skips_model() {
        let llm = Arc::new(ScriptedClient::new(["unused"]));
        let (status, body) = post_json(
            app(llm.clone()),
            "/api/v1/interview/feedback",
            session(answered_rounds(1)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 5);
        assert!(body["feedback"].as_str().unwrap().contains("too short"));
        assert!(!body["improvements"].as_array().unwrap().is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_feedback_full_interview() {
        let llm = Arc::new(ScriptedClient::new([json!({
            "rating": 8,
            "feedback": "Clear answers about Kafka consumer groups.",
            "improvements": ["Quantify results"]
        })
        .to_string()]));
        let (status, body) = post_json(
            app(llm),
            "/api/v1/interview/feedback",
            session(answered_rounds(5)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 8);
        assert_eq!(body["improvements"], json!(["Quantify results"]));
    }

    #[tokio::test]
    async fn test_feedback_empty_transcript_is_bad_request() {
        let llm = Arc::new(ScriptedClient::new(["unused"]));
        let (status, body) =
            post_json(app(llm), "/api/v1/interview/feedback", session(json!([]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_feedback_malformed_report_is_bad_gateway() {
        let llm = Arc::new(ScriptedClient::new(["Overall a strong candidate, 8/10."]));
        let (status, body) = post_json(
            app(llm),
            "/api/v1/interview/feedback",
            session(answered_rounds(5)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_REPORT");
    }

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn error_code(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].clone()
    }

    #[tokio::test]
    async fn test_resume_extract_rejects_non_pdf() {
        let response = app(Arc::new(ScriptedClient::new(Vec::<String>::new())))
            .oneshot(multipart_request("file", "resume.txt", b"Jane Smith"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_extract_requires_file_field() {
        let response = app(Arc::new(ScriptedClient::new(Vec::<String>::new())))
            .oneshot(multipart_request("attachment", "resume.pdf", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }
}
