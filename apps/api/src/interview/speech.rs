//! Pronunciation rewrites for text that is forwarded to speech synthesis.
//!
//! Acronyms are spelled out and a few loan words respelled phonetically. Only
//! whole words are touched, case-insensitively, so `APIs` or `SQLite` pass
//! through. The displayed reply is never altered.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// (whole-word pattern, spoken form). `CI/CD` must run before anything that could split it.
const PRONUNCIATIONS: &[(&str, &str)] = &[
    (r"CI/CD", "C. I. C. D."),
    (r"AWS", "A. W. S."),
    (r"GCP", "G. C. P."),
    (r"API", "A. P. I."),
    (r"SQL", "Sequel"),
    (r"JSON", "Jay-sawn"),
    (r"JWT", "J. W. T."),
    (r"UI", "U. I."),
    (r"UX", "U. X."),
    (r"r[eé]sum[eé]", "reh-zoo-may"),
];

fn rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        PRONUNCIATIONS
            .iter()
            .map(|(pattern, spoken)| {
                let re = Regex::new(&format!(r"(?i)\b{pattern}\b")).expect("valid regex");
                (re, *spoken)
            })
            .collect()
    })
}

pub fn sanitize_for_speech(text: &str) -> String {
    rules()
        .iter()
        .fold(text.to_string(), |acc, (re, spoken)| {
            re.replace_all(&acc, NoExpand(spoken)).into_owned()
        })
}
