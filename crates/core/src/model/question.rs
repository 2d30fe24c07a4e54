use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{AnswerId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question set is empty")]
    Empty,

    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),

    #[error("question {0} has no answer choices")]
    NoChoices(QuestionId),

    #[error("question id 0 is reserved")]
    ReservedId,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub id: AnswerId,
    pub content: String,
}

/// A quiz question as delivered by the question provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub content: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerChoice>,
}

impl Question {
    #[must_use]
    pub fn has_choice(&self, answer_id: AnswerId) -> bool {
        self.answers.iter().any(|choice| choice.id == answer_id)
    }
}

/// Check that a freshly loaded question set can drive a session.
///
/// # Errors
///
/// Returns `QuestionError::Empty` for an empty set, `QuestionError::ReservedId` when a
/// question uses the unset id, `QuestionError::DuplicateQuestion` for repeated ids and
/// `QuestionError::NoChoices` when a question offers nothing to select.
pub fn validate_question_set(questions: &[Question]) -> Result<(), QuestionError> {
    if questions.is_empty() {
        return Err(QuestionError::Empty);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for question in questions {
        if question.id.is_unset() {
            return Err(QuestionError::ReservedId);
        }
        if !seen.insert(question.id) {
            return Err(QuestionError::DuplicateQuestion(question.id));
        }
        if question.answers.is_empty() {
            return Err(QuestionError::NoChoices(question.id));
        }
    }
    Ok(())
}

//
// ─── ADMIN ─────────────────────────────────────────────────────────────────────
//

/// A row of the admin question table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub thumbnail_link: Option<String>,
}

/// An answer as the admin sees it, correctness included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub id: AnswerId,
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A single question with every answer attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub thumbnail_link: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

impl QuestionDetail {
    /// Ids of the answers marked correct.
    #[must_use]
    pub fn correct_answer_ids(&self) -> Vec<AnswerId> {
        self.answers
            .iter()
            .filter(|answer| answer.is_correct)
            .map(|answer| answer.id)
            .collect()
    }
}

/// Payload for editing a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64, choices: &[u64]) -> Question {
        Question {
            id: QuestionId::new(id),
            content: format!("Q{id}"),
            thumbnail: None,
            answers: choices
                .iter()
                .map(|c| AnswerChoice {
                    id: AnswerId::new(*c),
                    content: format!("A{c}"),
                })
                .collect(),
        }
    }

    #[test]
    fn accepts_well_formed_set() {
        let set = vec![question(1, &[1, 2]), question(2, &[3])];
        assert_eq!(validate_question_set(&set), Ok(()));
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert_eq!(validate_question_set(&[]), Err(QuestionError::Empty));

        let dup = vec![question(1, &[1]), question(1, &[2])];
        assert_eq!(
            validate_question_set(&dup),
            Err(QuestionError::DuplicateQuestion(QuestionId::new(1)))
        );
    }

    #[test]
    fn rejects_question_without_choices() {
        let set = vec![question(5, &[])];
        assert_eq!(
            validate_question_set(&set),
            Err(QuestionError::NoChoices(QuestionId::new(5)))
        );
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{"id": 3, "content": "What is 2+2?"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, QuestionId::new(3));
        assert!(q.thumbnail.is_none());
        assert!(q.answers.is_empty());
    }

    #[test]
    fn has_choice_checks_answer_ids() {
        let q = question(1, &[10, 11]);
        assert!(q.has_choice(AnswerId::new(11)));
        assert!(!q.has_choice(AnswerId::new(12)));
    }

    #[test]
    fn question_detail_lists_correct_answers() {
        let json = r#"{
            "id": 4,
            "title": "Largest planet?",
            "thumbnail_link": "jupiter.png",
            "answers": [
                {"id": 40, "content": "Jupiter", "isCorrect": true},
                {"id": 41, "content": "Mars", "isCorrect": false}
            ]
        }"#;
        let detail: QuestionDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.thumbnail_link.as_deref(), Some("jupiter.png"));
        assert_eq!(detail.correct_answer_ids(), vec![AnswerId::new(40)]);
    }
}
