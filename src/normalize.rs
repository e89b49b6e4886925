//! Turning raw model text into a [`ProblemRecord`].

use crate::types::ProblemRecord;
use crate::GenerationError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
const EXCERPT_CHARS: usize = 120;

/// Return the contents of the first ```json fenced block, or the trimmed input.
pub fn extract_json_block(raw: &str) -> &str {
    if let Some(start) = raw.find(JSON_FENCE) {
        let body = &raw[start + JSON_FENCE.len()..];
        if let Some(end) = body.find(FENCE) {
            return body[..end].trim();
        }
    }
    raw.trim()
}

/// Parse raw model text into a validated problem. No repair is attempted.
pub fn parse_problem(raw: &str) -> Result<ProblemRecord, GenerationError> {
    let json = extract_json_block(raw);
    let record: ProblemRecord = serde_json::from_str(json)
        .map_err(|e| GenerationError::parse(format!("{e} (near: {})", excerpt(json))))?;
    record.validate()?;
    Ok(record)
}

fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(EXCERPT_CHARS).collect();
    if text.chars().count() > EXCERPT_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBLEM: &str = r#"{
        "id": "farm-001",
        "grade": "3",
        "unit": "fractions",
        "difficulty": "medium",
        "stem": "Farmer Rosa planted 1/4 of a field with corn and 2/4 with beans. What part is planted?",
        "choices": [
            {"label": "A", "text": "3/8", "isCorrect": false, "rationale": "Adds denominators too"},
            {"label": "B", "text": "3/4", "isCorrect": true, "rationale": "Same denominator, add numerators"}
        ],
        "answer": "B",
        "solution": {"steps": ["1/4 + 2/4 = 3/4"]}
    }"#;

    #[test]
    fn test_extract_fenced_block() {
        let raw = format!("Here you go:\n```json\n{PROBLEM}\n```\nEnjoy!");
        assert_eq!(extract_json_block(&raw), PROBLEM.trim());
    }

    #[test]
    fn test_extract_without_fence_returns_trimmed_raw() {
        let raw = format!("  \n{PROBLEM}\n ");
        assert_eq!(extract_json_block(&raw), PROBLEM.trim());
    }

    #[test]
    fn test_plain_fence_is_not_a_json_fence() {
        let raw = format!("```\n{PROBLEM}\n```");
        assert_eq!(extract_json_block(&raw), raw.trim());
    }

    #[test]
    fn test_unterminated_fence_falls_back_to_raw() {
        let raw = format!("```json\n{PROBLEM}");
        assert_eq!(extract_json_block(&raw), raw.trim());
    }

    #[test]
    fn test_fenced_and_unfenced_parse_identically() {
        let fenced = parse_problem(&format!("```json\n{PROBLEM}\n```")).unwrap();
        let plain = parse_problem(PROBLEM).unwrap();
        assert_eq!(fenced, plain);
        assert_eq!(plain.answer, "B");
    }

    #[test]
    fn test_invalid_json_is_parse_failure() {
        let err = parse_problem("{\"id\": \"x\", \"grade\": ").unwrap_err();
        assert!(matches!(err, GenerationError::ParseFailure { .. }));

        let err = parse_problem("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, GenerationError::ParseFailure { .. }));
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let long = "x".repeat(500);
        let err = parse_problem(&long).unwrap_err();
        assert!(err.to_string().len() < 300);
    }
}
