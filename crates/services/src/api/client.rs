use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use url::Url;

use super::envelope::{self, Ack};
use crate::config::{AccessToken, ApiConfig};
use crate::error::ApiError;

/// HTTP client for the quiz REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the configured base url.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Endpoint` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn authorized(
        &self,
        request: RequestBuilder,
        token: &AccessToken,
    ) -> RequestBuilder {
        request.bearer_auth(token.as_str())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn send_for_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        envelope::decode_data(status, &body)
    }

    pub(crate) async fn send_for_body<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        envelope::decode_flat(status, &body)
    }

    pub(crate) async fn send_for_ack(&self, request: RequestBuilder) -> Result<Ack, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let (ack, _) = envelope::decode::<IgnoredAny>(status, &body)?;
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_under_the_base_path() {
        let config = ApiConfig::new("http://localhost:3000/api/v1").unwrap();
        let client = ApiClient::new(&config);
        assert_eq!(
            client.endpoint("questions/play").unwrap().as_str(),
            "http://localhost:3000/api/v1/questions/play"
        );
        assert_eq!(
            client.endpoint("/answers/4").unwrap().as_str(),
            "http://localhost:3000/api/v1/answers/4"
        );
    }
}
