use quiz_core::model::{UserDraft, UserId, UserPage, UserQuery};

use super::client::ApiClient;
use super::envelope::Ack;
use crate::config::AccessToken;
use crate::error::ApiError;

impl ApiClient {
    /// List one page of users matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or rejected queries.
    pub async fn list_users(
        &self,
        token: &AccessToken,
        query: &UserQuery,
    ) -> Result<UserPage, ApiError> {
        let request = self.http().get(self.endpoint("users")?).query(query);
        self.send_for_body(self.authorized(request, token)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or rejected drafts.
    pub async fn create_user(
        &self,
        token: &AccessToken,
        draft: &UserDraft,
    ) -> Result<Ack, ApiError> {
        let request = self.http().post(self.endpoint("users")?).json(draft);
        self.send_for_ack(self.authorized(request, token)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or rejected drafts.
    pub async fn update_user(
        &self,
        token: &AccessToken,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Ack, ApiError> {
        let request = self
            .http()
            .patch(self.endpoint(&format!("users/{id}"))?)
            .json(draft);
        self.send_for_ack(self.authorized(request, token)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for transport failures or when the user cannot be removed.
    pub async fn remove_user(&self, token: &AccessToken, id: UserId) -> Result<Ack, ApiError> {
        let request = self.http().delete(self.endpoint(&format!("users/{id}"))?);
        self.send_for_ack(self.authorized(request, token)).await
    }
}
