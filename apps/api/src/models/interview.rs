use serde::{Deserialize, Serialize};

/// Who produced a turn. Serialized exactly as the chat client sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single conversation turn. The ordered history is owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Candidate-selected question depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

fn default_duration_minutes() -> u32 {
    30
}

/// Per-interview settings. Immutable for the session and re-sent on every call.
///
/// `resume_text` and `job_description` may be empty: the prompt sections that
/// depend on them are omitted rather than treated as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub candidate_name: String,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
}

impl SessionConfig {
    /// Returns the first missing or malformed field, if any.
    pub fn check(&self) -> Result<(), String> {
        if self.candidate_name.trim().is_empty() {
            return Err("candidate_name cannot be empty".to_string());
        }
        if self.duration_minutes == 0 {
            return Err("duration_minutes must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn has_resume(&self) -> bool {
        !self.resume_text.trim().is_empty()
    }

    pub fn has_job_description(&self) -> bool {
        !self.job_description.trim().is_empty()
    }
}

/// End-of-session evaluation returned to the caller. Never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// 1..=10
    pub rating: u8,
    pub feedback: String,
    pub improvements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_deserializes_from_client_shape() {
        let turn: Turn =
            serde_json::from_str(r#"{"role": "assistant", "content": "Hello!"}"#).unwrap();
        assert_eq!(turn, Turn::assistant("Hello!"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Turn, _> =
            serde_json::from_str(r#"{"role": "system", "content": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_config_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"candidate_name": "Jane Smith"}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.duration_minutes, 30);
        assert!(!config.has_resume());
        assert!(!config.has_job_description());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_session_config_requires_candidate_name() {
        let result: Result<SessionConfig, _> = serde_json::from_str(r#"{"resume_text": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_candidate_name_fails_check() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"candidate_name": "   "}"#).unwrap();
        assert!(config.check().unwrap_err().contains("candidate_name"));
    }

    #[test]
    fn test_zero_duration_fails_check() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"candidate_name": "Sam", "duration_minutes": 0}"#).unwrap();
        assert!(config.check().unwrap_err().contains("duration_minutes"));
    }

    #[test]
    fn test_difficulty_serde_is_lowercase() {
        let d: Difficulty = serde_json::from_str(r#""hard""#).unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), r#""easy""#);
    }
}
