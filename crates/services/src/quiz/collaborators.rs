use async_trait::async_trait;

use quiz_core::model::{GradingResult, Question, SubmittedAnswer};

use crate::config::AccessToken;
use crate::error::ApiError;

/// Supplies the question set for a new session.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch up to `count` questions (server default when `None`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the questions cannot be fetched.
    async fn fetch_questions(
        &self,
        credential: &AccessToken,
        count: Option<u32>,
    ) -> Result<Vec<Question>, ApiError>;
}

/// Grades a completed set of answers.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if grading fails.
    async fn submit_answers(
        &self,
        credential: &AccessToken,
        answers: &[SubmittedAnswer],
    ) -> Result<GradingResult, ApiError>;
}
