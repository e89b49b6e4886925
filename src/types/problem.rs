//! The structured problem a model is asked to produce.
//!
//! Field names follow the camelCase JSON schema embedded in the prompt.

use serde::{Deserialize, Deserializer, Serialize};

use super::request::Difficulty;
use crate::GenerationError;

/// One generated word problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub grade: String,
    pub unit: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub context: Option<RealWorldContext>,
    #[serde(default)]
    pub mathematics: MathFocus,
    pub stem: String,
    pub choices: Vec<Choice>,
    pub answer: String,
    pub solution: Solution,
    #[serde(default)]
    pub pedagogy: Pedagogy,
    #[serde(default)]
    pub visual_aids: Vec<VisualAid>,
}

/// The farm scenario the problem is framed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealWorldContext {
    pub scenario: String,
    #[serde(default)]
    pub relevance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathFocus {
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Misconceptions the distractors are built around.
    #[serde(default)]
    pub misconceptions: Vec<String>,
}

/// An answer option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub label: String,
    pub text: String,
    #[serde(alias = "correct")]
    pub is_correct: bool,
    #[serde(default)]
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SolutionRepr")]
pub struct Solution {
    pub steps: Vec<String>,
    pub alternative_methods: Vec<String>,
}

// Models sometimes return the solution as a single paragraph.
#[derive(Deserialize)]
#[serde(untagged)]
enum SolutionRepr {
    Text(String),
    Detailed {
        steps: Vec<String>,
        #[serde(default, rename = "alternativeMethods")]
        alternative_methods: Vec<String>,
    },
}

impl From<SolutionRepr> for Solution {
    fn from(repr: SolutionRepr) -> Self {
        match repr {
            SolutionRepr::Text(text) => Solution {
                steps: vec![text],
                alternative_methods: Vec::new(),
            },
            SolutionRepr::Detailed {
                steps,
                alternative_methods,
            } => Solution {
                steps,
                alternative_methods,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedagogy {
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub teacher_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualAid {
    pub kind: String,
    pub description: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Grade {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Grade::deserialize(deserializer)? {
        Grade::Text(text) => text,
        Grade::Number(number) => number.to_string(),
    })
}

impl ProblemRecord {
    /// The choice flagged correct, if exactly one is.
    pub fn correct_choice(&self) -> Option<&Choice> {
        let mut correct = self.choices.iter().filter(|c| c.is_correct);
        match (correct.next(), correct.next()) {
            (Some(choice), None) => Some(choice),
            _ => None,
        }
    }

    /// Exactly one choice is correct and `answer` names it.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let flagged = self.choices.iter().filter(|c| c.is_correct).count();
        if flagged != 1 {
            return Err(GenerationError::parse(format!(
                "expected exactly one correct choice, found {flagged}"
            )));
        }

        let correct = self
            .correct_choice()
            .ok_or_else(|| GenerationError::parse("no correct choice"))?;
        let answer = self.answer.trim();
        let matches = answer.eq_ignore_ascii_case(correct.label.trim())
            || answer.eq_ignore_ascii_case(correct.text.trim());
        if !matches {
            return Err(GenerationError::parse(format!(
                "answer '{}' does not match the correct choice '{}'",
                self.answer, correct.label
            )));
        }
        Ok(())
    }
}
