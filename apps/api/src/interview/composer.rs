//! Prompt Composer: builds the exact system instruction and turn sequence sent
//! to the model for one interviewer reply.
//!
//! Composition is deterministic: the same config, history, phase and correction
//! always produce byte-identical output. Missing resume or job description text
//! drops the matching section instead of failing.

use crate::interview::phase::Phase;
use crate::interview::prompts::{
    ANTI_FABRICATION_DIRECTIVE, CORRECTION_TEMPLATE, DIFFICULTY_EASY, DIFFICULTY_HARD,
    DIFFICULTY_MEDIUM, JOB_DESCRIPTION_SECTION, NO_BACKGROUND_NOTE, PERSONA_TEMPLATE,
    PHASE_BEHAVIORAL, PHASE_INTRODUCTION, PHASE_TECHNICAL, PHASE_WRAPUP, RESUME_SECTION,
    SESSION_OPENER_TEMPLATE,
};
use crate::interview::validator::Violation;
use crate::llm_client::prompts::{fill_template, GROUNDING_INSTRUCTION};
use crate::models::interview::{Difficulty, Role, SessionConfig, Turn};

/// Everything the completion capability needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub system: String,
    pub turns: Vec<Turn>,
}

/// A failed draft to be corrected on the repair attempt.
#[derive(Debug, Clone, Copy)]
pub struct Correction<'a> {
    pub violations: &'a [Violation],
    pub rejected_reply: &'a str,
}

pub fn phase_guidance(phase: Phase) -> &'static str {
    match phase {
        Phase::Introduction => PHASE_INTRODUCTION,
        Phase::Technical => PHASE_TECHNICAL,
        Phase::Behavioral => PHASE_BEHAVIORAL,
        Phase::Wrapup => PHASE_WRAPUP,
    }
}

pub fn difficulty_guidance(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => DIFFICULTY_EASY,
        Difficulty::Medium => DIFFICULTY_MEDIUM,
        Difficulty::Hard => DIFFICULTY_HARD,
    }
}

/// Builds the system instruction and turn sequence for the next interviewer reply.
pub fn compose_prompt(
    config: &SessionConfig,
    history: &[Turn],
    phase: Phase,
    correction: Option<Correction<'_>>,
) -> ComposedPrompt {
    ComposedPrompt {
        system: build_system_instruction(config, phase, correction),
        turns: build_turns(config, history),
    }
}

fn build_system_instruction(
    config: &SessionConfig,
    phase: Phase,
    correction: Option<Correction<'_>>,
) -> String {
    let candidate_name = config.candidate_name.trim();
    let duration_minutes = config.duration_minutes.to_string();
    let mut sections = vec![fill_template(
        PERSONA_TEMPLATE,
        &[
            ("candidate_name", candidate_name),
            ("duration_minutes", duration_minutes.as_str()),
        ],
    )];

    if config.has_job_description() {
        sections.push(fill_template(
            JOB_DESCRIPTION_SECTION,
            &[("job_description", config.job_description.trim())],
        ));
    }
    if config.has_resume() {
        sections.push(fill_template(
            RESUME_SECTION,
            &[("resume_text", config.resume_text.trim())],
        ));
    }
    if !config.has_job_description() && !config.has_resume() {
        sections.push(NO_BACKGROUND_NOTE.to_string());
    }

    sections.push(phase_guidance(phase).to_string());
    sections.push(difficulty_guidance(config.difficulty).to_string());
    sections.push(GROUNDING_INSTRUCTION.to_string());
    sections.push(ANTI_FABRICATION_DIRECTIVE.to_string());

    if let Some(correction) = correction {
        sections.push(build_correction(correction));
    }

    sections.join("\n\n")
}

fn build_correction(correction: Correction<'_>) -> String {
    let violations = correction
        .violations
        .iter()
        .map(|v| format!("- {}: {}", v.code(), v.description()))
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        CORRECTION_TEMPLATE,
        &[
            ("violations", violations.as_str()),
            ("rejected_reply", correction.rejected_reply.trim()),
        ],
    )
}

/// Chronological turns, with a synthetic candidate opener when the history
/// does not already begin with the candidate speaking.
fn build_turns(config: &SessionConfig, history: &[Turn]) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(history.len() + 1);
    if history.first().map(|t| t.role) != Some(Role::User) {
        turns.push(session_opener(config));
    }
    turns.extend_from_slice(history);
    turns
}

pub fn session_opener(config: &SessionConfig) -> Turn {
    Turn::user(fill_template(
        SESSION_OPENER_TEMPLATE,
        &[("candidate_name", config.candidate_name.trim())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            candidate_name: "Alex Johnson".to_string(),
            resume_text: "Python, Django, PostgreSQL".to_string(),
            job_description: "Backend Developer building REST services".to_string(),
            difficulty: Difficulty::Medium,
            duration_minutes: 30,
        }
    }

    #[test]
    fn test_includes_candidate_name_resume_and_job_description() {
        let prompt = compose_prompt(&config(), &[], Phase::Introduction, None);
        assert!(prompt.system.contains("Alex Johnson"));
        assert!(prompt.system.contains("Python, Django, PostgreSQL"));
        assert!(prompt.system.contains("Backend Developer building REST services"));
        assert!(!prompt.system.contains(NO_BACKGROUND_NOTE));
    }

    #[test]
    fn test_missing_resume_omits_section() {
        let mut config = config();
        config.resume_text = "  ".to_string();
        let prompt = compose_prompt(&config, &[], Phase::Technical, None);
        assert!(!prompt.system.contains("=== CANDIDATE RESUME ==="));
        assert!(prompt.system.contains("=== JOB DESCRIPTION ==="));
    }

    #[test]
    fn test_missing_both_sources_adds_background_note() {
        let mut config = config();
        config.resume_text.clear();
        config.job_description.clear();
        let prompt = compose_prompt(&config, &[], Phase::Technical, None);
        assert!(prompt.system.contains(NO_BACKGROUND_NOTE));
        assert!(!prompt.system.contains("=== JOB DESCRIPTION ==="));
    }

    #[test]
    fn test_phase_guidance_matches_phase() {
        for phase in [
            Phase::Introduction,
            Phase::Technical,
            Phase::Behavioral,
            Phase::Wrapup,
        ] {
            let prompt = compose_prompt(&config(), &[], phase, None);
            assert!(prompt.system.contains(phase_guidance(phase)));
        }
        let wrapup = compose_prompt(&config(), &[], Phase::Wrapup, None);
        assert!(wrapup.system.contains("CONCLUSION"));
        assert!(wrapup.system.contains("Thank"));
        assert!(!wrapup.system.contains(PHASE_TECHNICAL));
    }

    #[test]
    fn test_difficulty_guidance() {
        let mut config = config();
        config.difficulty = Difficulty::Hard;
        let hard = compose_prompt(&config, &[], Phase::Technical, None);
        assert!(hard.system.contains("HARD MODE"));
        assert!(hard.system.contains("system design"));

        config.difficulty = Difficulty::Easy;
        let easy = compose_prompt(&config, &[], Phase::Introduction, None);
        assert!(easy.system.contains("EASY MODE"));
        assert!(easy.system.contains("encouraging"));
    }

    #[test]
    fn test_anti_fabrication_directive_always_present() {
        let prompt = compose_prompt(&config(), &[], Phase::Behavioral, None);
        assert!(prompt.system.contains(ANTI_FABRICATION_DIRECTIVE));
        assert!(prompt.system.contains(GROUNDING_INSTRUCTION));
    }

    #[test]
    fn test_empty_history_gets_synthetic_opener() {
        let prompt = compose_prompt(&config(), &[], Phase::Introduction, None);
        assert_eq!(prompt.turns.len(), 1);
        assert_eq!(prompt.turns[0].role, Role::User);
        assert!(prompt.turns[0].content.contains("Alex Johnson"));
    }

    #[test]
    fn test_assistant_first_history_is_preceded_by_opener() {
        let history = vec![
            Turn::assistant("Welcome! Please introduce yourself."),
            Turn::user("I have 3 years of experience in backend systems"),
        ];
        let prompt = compose_prompt(&config(), &history, Phase::Introduction, None);
        assert_eq!(prompt.turns.len(), 3);
        assert_eq!(prompt.turns[0], session_opener(&config()));
        assert_eq!(&prompt.turns[1..], history.as_slice());
    }

    #[test]
    fn test_user_first_history_is_passed_unmodified() {
        let history = vec![
            Turn::user("Hello"),
            Turn::assistant("Hi! Tell me about yourself."),
            Turn::user("I build APIs."),
        ];
        let prompt = compose_prompt(&config(), &history, Phase::Introduction, None);
        assert_eq!(prompt.turns, history);
    }

    #[test]
    fn test_composition_is_deterministic() {
        let history = vec![Turn::user("Hello"), Turn::assistant("Hi there.")];
        let a = compose_prompt(&config(), &history, Phase::Technical, None);
        let b = compose_prompt(&config(), &history, Phase::Technical, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_braces_in_candidate_name_are_kept_verbatim() {
        let mut config = config();
        config.candidate_name = "Sam {duration_minutes} Lee".to_string();
        config.resume_text = "Templates: {job_description} and {{name}}".to_string();
        let prompt = compose_prompt(&config, &[], Phase::Introduction, None);
        assert!(prompt.system.contains("Sam {duration_minutes} Lee"));
        assert!(prompt.system.contains("Templates: {job_description} and {{name}}"));
        assert!(prompt.system.contains("30"));
    }

    #[test]
    fn test_correction_names_violations_and_quotes_draft() {
        let violations = [Violation::Placeholder];
        let prompt = compose_prompt(
            &config(),
            &[],
            Phase::Technical,
            Some(Correction {
                violations: &violations,
                rejected_reply: "Tell me about your time at [Company Name].",
            }),
        );
        assert!(prompt.system.contains("CORRECTION REQUIRED"));
        assert!(prompt.system.contains("placeholder"));
        assert!(prompt.system.contains("Tell me about your time at [Company Name]."));
        assert!(prompt.system.ends_with("following all earlier instructions."));
    }
}
