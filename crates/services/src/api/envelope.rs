use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::ApiError;

/// Human-readable message attached to API responses.
///
/// Validation failures arrive as a list; everything else as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiMessage {
    /// The message worth showing to a user: the string itself, or the first list entry.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            ApiMessage::One(message) => Some(message.as_str()),
            ApiMessage::Many(messages) => messages.first().map(String::as_str),
        }
    }
}

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status_code: u16,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    status_code: Option<u16>,
    message: Option<ApiMessage>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn effective_status(&self, http: StatusCode) -> u16 {
        self.status_code.unwrap_or_else(|| http.as_u16())
    }

    fn message_text(&self) -> Option<String> {
        self.message
            .as_ref()
            .and_then(ApiMessage::first)
            .map(str::to_string)
    }
}

/// Decode a response body, treating an embedded `statusCode >= 400` as a rejection
/// even when the HTTP status was successful.
pub(crate) fn decode<T: DeserializeOwned>(
    http: StatusCode,
    body: &[u8],
) -> Result<(Ack, Option<T>), ApiError> {
    let envelope: Envelope<T> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if !http.is_success() => return Err(ApiError::HttpStatus(http)),
        Err(err) => return Err(ApiError::Decode(err)),
    };

    let status = envelope.effective_status(http);
    if status >= 400 || !http.is_success() {
        let message = envelope.message_text().unwrap_or_else(|| {
            http.canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(ApiError::Rejected { status, message });
    }

    let ack = Ack {
        status_code: status,
        message: envelope.message_text(),
    };
    Ok((ack, envelope.data))
}

/// Like [`decode`], but the response must carry data.
pub(crate) fn decode_data<T: DeserializeOwned>(
    http: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    let (_, data) = decode(http, body)?;
    data.ok_or(ApiError::EmptyResponse)
}

/// Decode a response whose payload sits beside `statusCode` instead of under `data`.
pub(crate) fn decode_flat<T: DeserializeOwned>(
    http: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    decode::<IgnoredAny>(http, body)?;
    Ok(serde_json::from_slice(body)?)
}
