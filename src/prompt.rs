//! Prompt construction for problem generation.
//!
//! The prompt is a pure function of the request so the same request always
//! produces byte-identical text.

use crate::types::GenerationRequest;

/// System message for providers that accept one.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert elementary mathematics curriculum designer. \
You write engaging farm-themed word problems and always reply with a single JSON object.";

const QUALITY_REQUIREMENTS: [&str; 7] = [
    "Require step-by-step reasoning; the answer must not be reachable by a single recall fact.",
    "Frame the problem in a concrete real-world farm context a child can picture.",
    "Build every incorrect choice around a specific, common student misconception.",
    "Encourage open-ended thinking: ask the student to explain or justify, not just compute.",
    "Allow at least two valid solution paths and describe the alternatives.",
    "Use vocabulary and numbers appropriate for the stated grade.",
    "Have exactly one unambiguous correct answer among the choices.",
];

const OUTPUT_SCHEMA: &str = r#"{
  "id": "string, unique problem identifier",
  "grade": "string",
  "unit": "string",
  "difficulty": "easy | medium | hard | expert",
  "context": { "scenario": "string", "relevance": "string" },
  "mathematics": {
    "concepts": ["string"],
    "skills": ["string"],
    "misconceptions": ["string"]
  },
  "stem": "string, the problem statement",
  "choices": [
    { "label": "A", "text": "string", "isCorrect": false, "rationale": "string" }
  ],
  "answer": "label of the single correct choice",
  "solution": {
    "steps": ["string"],
    "alternativeMethods": ["string"]
  },
  "pedagogy": {
    "objectives": ["string"],
    "hints": ["string"],
    "teacherNotes": "string"
  },
  "visualAids": [ { "kind": "string", "description": "string" } ]
}"#;

/// Build the user prompt for a generation request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Create one high-quality multiple-choice math word problem for grade {}, unit \"{}\", at {} difficulty.\n\n",
        request.grade, request.unit, request.difficulty
    );

    prompt.push_str("Quality requirements:\n");
    for (index, requirement) in QUALITY_REQUIREMENTS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", index + 1, requirement));
    }

    prompt.push_str("\nRespond with JSON matching exactly this schema:\n");
    prompt.push_str(OUTPUT_SCHEMA);
    prompt.push_str(
        "\n\nReturn ONLY the JSON object as your entire response. \
Do not add any explanation, commentary, or text before or after it.",
    );
    prompt
}
