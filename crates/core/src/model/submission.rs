use serde::{Deserialize, Serialize};

use crate::model::ids::{AnswerId, QuestionId};

/// The answers recorded for one question when the player moved past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub id: QuestionId,
    pub answers_submitted_id: Vec<AnswerId>,
}

impl SubmittedAnswer {
    #[must_use]
    pub fn new(id: QuestionId, answers_submitted_id: Vec<AnswerId>) -> Self {
        Self {
            id,
            answers_submitted_id,
        }
    }
}

/// Per-question correctness as reported by the grader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedQuestion {
    pub id: QuestionId,
    pub is_correct: bool,
}

/// Outcome of grading a full submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    #[serde(default)]
    pub list_question_checked: Vec<GradedQuestion>,
    pub total_score: u32,
}

impl GradingResult {
    /// Number of questions the grader marked correct.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.list_question_checked
            .iter()
            .filter(|q| q.is_correct)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_answer_uses_wire_field_names() {
        let answer = SubmittedAnswer::new(QuestionId::new(1), vec![AnswerId::new(4)]);
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "answersSubmittedId": [4]}));
    }

    #[test]
    fn grading_result_counts_correct_questions() {
        let json = r#"{
            "listQuestionChecked": [
                {"id": 1, "isCorrect": true},
                {"id": 2, "isCorrect": false},
                {"id": 3, "isCorrect": true}
            ],
            "totalScore": 20
        }"#;
        let result: GradingResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_score, 20);
        assert_eq!(result.correct_count(), 2);
    }
}
