use serde::Serialize;

use super::client::ApiClient;
use super::envelope::Ack;
use crate::config::AccessToken;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    /// Ask the server to email a password reset link.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` carrying the server message when the email is unknown.
    pub async fn forgot_password(&self, email: &str) -> Result<Ack, ApiError> {
        let request = self
            .http()
            .post(self.endpoint("auth/forgot-password")?)
            .json(&ForgotPasswordRequest { email: email.trim() });
        self.send_for_ack(request).await
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` carrying the server message when the old password
    /// is wrong or the new one fails validation.
    pub async fn change_password(
        &self,
        token: &AccessToken,
        old_password: &str,
        new_password: &str,
    ) -> Result<Ack, ApiError> {
        let request = self
            .http()
            .post(self.endpoint("auth/change-password")?)
            .json(&ChangePasswordRequest {
                old_password,
                new_password,
            });
        self.send_for_ack(self.authorized(request, token)).await
    }
}
