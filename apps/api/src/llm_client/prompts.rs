// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common grounding rule appended to every prompt that talks about a candidate.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every statement you make about the candidate must be traceable to the \
    supplied resume, the supplied job description, or something the candidate actually \
    said in this conversation. Do NOT infer, interpolate, or invent details. \
    If the source text does not support a claim, do not make it.";

/// Fills `{key}` placeholders in one pass over `template`.
///
/// Substituted values are never rescanned, so user text that happens to contain
/// `{resume_text}` or similar reaches the model verbatim. Unknown braces (JSON
/// examples in a prompt) are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values
            .iter()
            .find(|(key, _)| tail[1..].starts_with(key) && tail[1 + key.len()..].starts_with('}'))
        {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
