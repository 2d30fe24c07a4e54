use serde::Serialize;

use quiz_core::model::{AnswerId, QuestionId};

use super::client::ApiClient;
use super::envelope::Ack;
use crate::config::AccessToken;
use crate::error::ApiError;

/// Payload for creating or editing an answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDraft {
    pub question_id: QuestionId,
    pub content: String,
    pub is_correct: bool,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the first validation message when the server
    /// refuses the answer.
    pub async fn create_answer(
        &self,
        token: &AccessToken,
        draft: &AnswerDraft,
    ) -> Result<Ack, ApiError> {
        let request = self.http().post(self.endpoint("answers")?).json(draft);
        self.send_for_ack(self.authorized(request, token)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the first validation message when the server
    /// refuses the update.
    pub async fn update_answer(
        &self,
        token: &AccessToken,
        id: AnswerId,
        draft: &AnswerDraft,
    ) -> Result<Ack, ApiError> {
        let request = self
            .http()
            .patch(self.endpoint(&format!("answers/{id}"))?)
            .json(draft);
        self.send_for_ack(self.authorized(request, token)).await
    }
}
