use async_trait::async_trait;

use quiz_core::model::{
    GradingResult, Question, QuestionDetail, QuestionDraft, QuestionId, QuestionSummary,
    SubmittedAnswer,
};

use super::client::ApiClient;
use super::envelope::Ack;
use crate::config::AccessToken;
use crate::error::ApiError;
use crate::quiz::{QuestionProvider, SubmissionService};

impl ApiClient {
    /// Fetch a question set for a new play-through.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or when the server rejects the request.
    pub async fn questions_for_play(
        &self,
        token: &AccessToken,
        total: Option<u32>,
    ) -> Result<Vec<Question>, ApiError> {
        let mut request = self.http().get(self.endpoint("questions/play")?);
        if let Some(total) = total {
            request = request.query(&[("total", total)]);
        }
        self.send_for_data(self.authorized(request, token)).await
    }

    /// Submit every recorded answer for grading.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or when the server rejects the submission.
    pub async fn submit_quiz(
        &self,
        token: &AccessToken,
        answers: &[SubmittedAnswer],
    ) -> Result<GradingResult, ApiError> {
        let request = self
            .http()
            .post(self.endpoint("questions/submit")?)
            .json(answers);
        self.send_for_data(self.authorized(request, token)).await
    }

    //
    // ─── ADMIN ─────────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or when the listing is refused.
    pub async fn list_questions(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<QuestionSummary>, ApiError> {
        let request = self.http().get(self.endpoint("questions")?);
        self.send_for_data(self.authorized(request, token)).await
    }

    /// Fetch one question with its answers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the question does not exist.
    pub async fn question(
        &self,
        token: &AccessToken,
        id: QuestionId,
    ) -> Result<QuestionDetail, ApiError> {
        let request = self.http().get(self.endpoint(&format!("questions/{id}"))?);
        self.send_for_data(self.authorized(request, token)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the first validation message when the server
    /// refuses the update.
    pub async fn update_question(
        &self,
        token: &AccessToken,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Ack, ApiError> {
        let request = self
            .http()
            .patch(self.endpoint(&format!("questions/{id}"))?)
            .json(draft);
        self.send_for_ack(self.authorized(request, token)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or when the question cannot be removed.
    pub async fn remove_question(
        &self,
        token: &AccessToken,
        id: QuestionId,
    ) -> Result<Ack, ApiError> {
        let request = self
            .http()
            .delete(self.endpoint(&format!("questions/{id}"))?);
        self.send_for_ack(self.authorized(request, token)).await
    }
}

#[async_trait]
impl QuestionProvider for ApiClient {
    async fn fetch_questions(
        &self,
        credential: &AccessToken,
        count: Option<u32>,
    ) -> Result<Vec<Question>, ApiError> {
        self.questions_for_play(credential, count).await
    }
}

#[async_trait]
impl SubmissionService for ApiClient {
    async fn submit_answers(
        &self,
        credential: &AccessToken,
        answers: &[SubmittedAnswer],
    ) -> Result<GradingResult, ApiError> {
        self.submit_quiz(credential, answers).await
    }
}
