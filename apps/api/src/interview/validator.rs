//! Response Validator: decides whether a model-produced reply may be shown to
//! the candidate.
//!
//! Checks run in a fixed order and each contributes at most one violation:
//! 1. degenerate (empty or too short once placeholder markers are removed)
//! 2. placeholder (template markers, filler phrases, ellipsis stand-ins, verbatim repeat)
//! 3. unsupported claim (technical/behavioral only; background assertion with no
//!    token overlap against resume, job description, or the candidate's own answers)
//! 4. inconsistent (contradicts a role/title or years-of-experience fact stated in
//!    the previous interviewer turn)
//!
//! Verdict: no violations → accept; a lone non-degenerate violation → repair;
//! degenerate, or two or more violations → reject.
//!
//! Pure over its inputs: validating the same reply twice gives the same verdict.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::interview::phase::Phase;
use crate::models::interview::{Role, SessionConfig, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    Degenerate,
    Placeholder,
    UnsupportedClaim,
    Inconsistent,
}

impl Violation {
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Degenerate => "degenerate",
            Violation::Placeholder => "placeholder",
            Violation::UnsupportedClaim => "unsupported_claim",
            Violation::Inconsistent => "inconsistent",
        }
    }

    /// Human-readable rule text, quoted back to the model on repair.
    pub fn description(&self) -> &'static str {
        match self {
            Violation::Degenerate => "the reply was empty or too short to be a real question or remark",
            Violation::Placeholder => {
                "the reply contained a placeholder, template marker, or filler text, or repeated your previous reply word for word"
            }
            Violation::UnsupportedClaim => {
                "the reply asserted something about the candidate's background that does not appear in the resume, the job description, or the candidate's answers"
            }
            Violation::Inconsistent => {
                "the reply contradicted a fact about the candidate stated in your previous reply"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Accept,
    Repair,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub status: VerdictStatus,
    /// In check order.
    pub reasons: Vec<Violation>,
}

impl ValidationVerdict {
    fn from_reasons(reasons: Vec<Violation>) -> Self {
        let status = match reasons.as_slice() {
            [] => VerdictStatus::Accept,
            [Violation::Degenerate] => VerdictStatus::Reject,
            [_] => VerdictStatus::Repair,
            _ => VerdictStatus::Reject,
        };
        Self { status, reasons }
    }

    pub fn is_accept(&self) -> bool {
        self.status == VerdictStatus::Accept
    }
}

/// Everything the validator needs besides the reply itself.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub phase: Phase,
    pub config: &'a SessionConfig,
    /// Conversation so far, not including the reply being validated.
    pub history: &'a [Turn],
    pub min_reply_chars: usize,
}

impl<'a> ValidationContext<'a> {
    fn previous_assistant(&self) -> Option<&'a str> {
        self.history
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }
}

pub fn validate_reply(reply: &str, ctx: &ValidationContext<'_>) -> ValidationVerdict {
    let previous = ctx.previous_assistant();
    let mut reasons = Vec::new();

    if is_degenerate(reply, ctx.min_reply_chars) {
        reasons.push(Violation::Degenerate);
    }
    if has_placeholder(reply, previous) {
        reasons.push(Violation::Placeholder);
    }
    if ctx.phase.discusses_background() && has_unsupported_claim(reply, ctx) {
        reasons.push(Violation::UnsupportedClaim);
    }
    if let Some(previous) = previous {
        if contradicts(previous, reply) {
            reasons.push(Violation::Inconsistent);
        }
    }

    ValidationVerdict::from_reasons(reasons)
}

// ────────────────────────────────────────────────────────────────────────────
// 1. Degeneracy
// ────────────────────────────────────────────────────────────────────────────

fn is_degenerate(reply: &str, min_chars: usize) -> bool {
    let stripped = template_marker_re().replace_all(reply, " ");
    let stripped = strip_bracket_labels(&stripped);
    let substantive = stripped.chars().filter(|c| c.is_alphanumeric()).count();
    substantive == 0 || substantive < min_chars
}

// ────────────────────────────────────────────────────────────────────────────
// 2. Placeholders and filler
// ────────────────────────────────────────────────────────────────────────────

const FILLER_PHRASES: &[&str] = &[
    "awaiting input",
    "awaiting response",
    "awaiting your input",
    "awaiting candidate",
    "insert question",
    "question goes here",
    "your question here",
    "lorem ipsum",
    "todo:",
    "tbd",
];

/// Words that mark bracketed text as a fill-in slot regardless of case.
const SLOT_WORDS: &[&str] = &["awaiting", "insert", "name"];

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\[\]\n]{0,80})\]").expect("valid regex"))
}

/// `[]`, `[Company Name]`, `[Awaiting response...]` are template slots;
/// `[1, 2, 3]`, `v[i]` and `[i]` are code.
fn is_bracket_label(text: &str, start: usize, inner: &str) -> bool {
    let indexes = text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    if indexes {
        return false;
    }

    let inner = inner.trim();
    if inner.is_empty() {
        return true;
    }
    if inner.chars().any(|c| c.is_ascii_digit() || c == ',') {
        return false;
    }
    let lower = inner.to_lowercase();
    if SLOT_WORDS.iter().any(|w| lower.contains(w)) {
        return true;
    }
    inner.chars().count() > 1 && inner.chars().next().is_some_and(char::is_uppercase)
}

fn has_bracket_label(text: &str) -> bool {
    bracket_re().captures_iter(text).any(|caps| match (caps.get(0), caps.get(1)) {
        (Some(whole), Some(inner)) => is_bracket_label(text, whole.start(), inner.as_str()),
        _ => false,
    })
}

fn strip_bracket_labels(text: &str) -> String {
    bracket_re()
        .replace_all(text, |caps: &Captures<'_>| match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(inner))
                if is_bracket_label(text, whole.start(), inner.as_str()) =>
            {
                " ".to_string()
            }
            (Some(whole), _) => whole.as_str().to_string(),
            _ => String::new(),
        })
        .into_owned()
}

fn template_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{[^{}\n]*\}\}|<[A-Z][A-Z0-9 _-]{1,40}>").expect("valid regex")
    })
}

fn ellipsis_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:\.{3,}|…)+\s*$").expect("valid regex"))
}

fn has_placeholder(reply: &str, previous: Option<&str>) -> bool {
    if has_bracket_label(reply) || template_marker_re().is_match(reply) {
        return true;
    }
    if ellipsis_line_re().is_match(reply) {
        return true;
    }

    let lower = reply.to_lowercase();
    if FILLER_PHRASES
        .iter()
        .any(|phrase| contains_phrase(&lower, phrase))
    {
        return true;
    }

    match previous {
        Some(previous) => {
            let current = normalize(reply);
            !current.is_empty() && current == normalize(previous)
        }
        None => false,
    }
}

/// Phrase match on word boundaries, so "tbd" does not fire inside "outbd…".
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());
        is_boundary(before) && (is_boundary(after) || !phrase.ends_with(char::is_alphanumeric))
    })
}

/// Lowercased alphanumeric words joined by single spaces.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// 3. Unsupported claims
// ────────────────────────────────────────────────────────────────────────────

/// Words that turn "you worked…" / "your project…" into a question or request
/// rather than an assertion.
const NON_ASSERTING_PRECEDERS: &[&str] = &[
    "have", "has", "had", "did", "do", "does", "were", "are", "could", "can", "would", "will",
    "should", "if", "whether", "when", "how", "why", "where", "what", "which", "about",
    "describe", "explain", "discuss", "share", "walk", "tell",
];

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "with", "on", "at", "in", "for", "to", "of", "from",
    "by", "as", "into", "onto", "using", "via", "your", "you", "our", "their", "that", "this",
    "these", "those", "it", "its", "was", "were", "is", "are", "be", "been", "there", "here",
    "which", "where", "when", "while", "how", "what", "why", "lot", "lots", "some", "many",
    "very", "really", "also", "so", "such", "team", "teams", "project", "projects", "work",
    "role", "company", "experience", "time", "job", "during", "previous", "past", "recent",
    "current", "great", "good", "interesting", "challenging", "something", "things", "stuff",
    "people", "me", "my", "we", "us", "did", "do", "does", "had", "have", "has", "mentioned",
    "said", "there", "then", "than", "more", "most", "other", "several", "various", "well",
    "quite", "pretty", "different", "new", "own", "all", "each", "any", "both", "before",
    "after", "over", "about",
];

fn claim_verb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\byou(?:'ve|\s+have|\s+had)?\s+(?:previously\s+|already\s+|once\s+)?(?:worked|built|led|used|designed|developed|implemented|managed|created|deployed|maintained|architected|shipped|migrated|scaled|wrote|owned|optimized|launched)\b((?:\s+[\w+#/-]+(?:\.[\w+#/-]+)*){1,6})",
        )
        .expect("valid regex")
    })
}

fn claim_possessive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\byour\s+(?:previous\s+|past\s+|recent\s+|current\s+)?(?:project|projects|work|experience|role|time|team|internship|company|startup|job|position|tenure)\b((?:\s+[\w+#/-]+(?:\.[\w+#/-]+)*){1,6})",
        )
        .expect("valid regex")
    })
}

fn has_unsupported_claim(reply: &str, ctx: &ValidationContext<'_>) -> bool {
    let corpus = grounding_corpus(ctx);

    [claim_verb_re(), claim_possessive_re()]
        .into_iter()
        .flat_map(|re| re.captures_iter(reply))
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if is_non_asserting(&reply[..whole.start()]) {
                return None;
            }
            caps.get(1).map(|object| content_tokens(object.as_str()))
        })
        .filter(|tokens| !tokens.is_empty())
        .any(|tokens| !tokens.iter().any(|t| is_grounded(t, &corpus)))
}

/// Resume, job description, and everything the candidate has said.
fn grounding_corpus(ctx: &ValidationContext<'_>) -> HashSet<String> {
    let mut corpus: HashSet<String> = tokenize(&ctx.config.resume_text).collect();
    corpus.extend(tokenize(&ctx.config.job_description));
    for turn in ctx.history.iter().filter(|t| t.role == Role::User) {
        corpus.extend(tokenize(&turn.content));
    }
    corpus
}

fn is_non_asserting(prefix: &str) -> bool {
    prefix
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .rfind(|w| !w.is_empty())
        .map(|w| NON_ASSERTING_PRECEDERS.contains(&w.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .filter(|t| t.chars().count() >= 2 && !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Exact token hit, or a shared 5-character stem for longer words
/// ("microservices" ~ "microservice", "optimizing" ~ "optimization").
fn is_grounded(token: &str, corpus: &HashSet<String>) -> bool {
    if corpus.contains(token) {
        return true;
    }
    match stem(token) {
        Some(prefix) => corpus.iter().any(|c| stem(c) == Some(prefix)),
        None => false,
    }
}

fn stem(token: &str) -> Option<&str> {
    token
        .char_indices()
        .nth(5)
        .map(|(idx, _)| &token[..idx])
}

// ────────────────────────────────────────────────────────────────────────────
// 4. Consistency with the previous interviewer turn
// ────────────────────────────────────────────────────────────────────────────

fn role_fact_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:you(?:'re|\s+are|\s+were|'ve\s+been|\s+have\s+been)\s+(?:currently\s+|previously\s+)?|your\s+(?:role|title|position)\s+(?:as|of|is|was)\s+)(?:an?\s+|the\s+)?((?:[\w-]+\s+){0,3}?(?:engineer|developer|manager|lead|architect|scientist|analyst|designer|intern|consultant|administrator|director|researcher|programmer))\b",
        )
        .expect("valid regex")
    })
}

fn years_fact_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\byou(?:'ve|\s+have|\s+had)\s+(?:over\s+|about\s+|around\s+|nearly\s+|almost\s+)?(\d+)\+?\s+years?\b",
        )
        .expect("valid regex")
    })
}

fn extract_facts(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| normalize(m.as_str()))
        .collect()
}

/// Two role statements agree when one contains the other
/// ("backend engineer" vs "senior backend engineer").
fn compatible(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn contradicts(previous: &str, reply: &str) -> bool {
    let role_clash = {
        let before = extract_facts(role_fact_re(), previous);
        let now = extract_facts(role_fact_re(), reply);
        !before.is_empty()
            && !now.is_empty()
            && !now.iter().any(|n| before.iter().any(|b| compatible(n, b)))
    };
    let years_clash = {
        let before = extract_facts(years_fact_re(), previous);
        let now = extract_facts(years_fact_re(), reply);
        !before.is_empty() && !now.is_empty() && !now.iter().any(|n| before.contains(n))
    };
    role_clash || years_clash
}
