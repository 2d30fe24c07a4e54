use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1/";

const BASE_URL_VAR: &str = "QUIZ_API_BASE_URL";
const ACCESS_TOKEN_VAR: &str = "QUIZ_ACCESS_TOKEN";
const QUESTION_COUNT_VAR: &str = "QUIZ_QUESTION_COUNT";

/// Bearer credential presented to the quiz API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Connection settings for the quiz REST API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub access_token: Option<AccessToken>,
    pub question_count: Option<u32>,
}

impl ApiConfig {
    /// Build a config for `base_url` with no credential.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` or `ConfigError::UnsupportedScheme` when the
    /// url cannot address an HTTP API.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            access_token: None,
            question_count: None,
        })
    }

    /// Read `QUIZ_API_BASE_URL`, `QUIZ_ACCESS_TOKEN` and `QUIZ_QUESTION_COUNT`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        config.access_token = lookup(ACCESS_TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .map(AccessToken::new);

        config.question_count = match lookup(QUESTION_COUNT_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_count(QUESTION_COUNT_VAR, &raw)?),
            _ => None,
        };

        Ok(config)
    }

    #[must_use]
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    #[must_use]
    pub fn with_question_count(mut self, count: Option<u32>) -> Self {
        self.question_count = count;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when no access token is configured.
    pub fn require_token(&self) -> Result<&AccessToken, ConfigError> {
        self.access_token
            .as_ref()
            .ok_or(ConfigError::Missing(ACCESS_TOKEN_VAR))
    }
}

/// Runtime settings for a quiz player.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    pub credential: AccessToken,
    pub question_count: Option<u32>,
    pub tick_interval: Duration,
}

impl PlayerConfig {
    #[must_use]
    pub fn new(credential: AccessToken) -> Self {
        Self {
            credential,
            question_count: None,
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Derive player settings from API settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when no access token is configured.
    pub fn from_api(api: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(api.require_token()?.clone()).with_question_count(api.question_count))
    }

    #[must_use]
    pub fn with_question_count(mut self, count: Option<u32>) -> Self {
        self.question_count = count;
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

/// Parse a positive count from a flag or environment value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidNumber` for non-numeric or zero values.
pub fn parse_count(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            raw: raw.to_string(),
        }),
    }
}

// Relative joins drop the last path segment unless the base ends with '/'.
fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        raw: trimmed.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(config.access_token.is_none());
        assert!(config.question_count.is_none());
        assert!(matches!(config.require_token(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn reads_all_variables() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("QUIZ_API_BASE_URL", "https://quiz.example.com/api"),
            ("QUIZ_ACCESS_TOKEN", "secret"),
            ("QUIZ_QUESTION_COUNT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://quiz.example.com/api/");
        assert_eq!(config.require_token().unwrap().as_str(), "secret");
        assert_eq!(config.question_count, Some(5));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ApiConfig::from_lookup(lookup(&[("QUIZ_QUESTION_COUNT", "zero")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err = ApiConfig::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(_)));

        let err = ApiConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = ApiConfig::from_lookup(lookup(&[("QUIZ_ACCESS_TOKEN", "  ")])).unwrap();
        assert!(config.access_token.is_none());
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let token = AccessToken::new("super-secret");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
    }

    #[test]
    fn player_config_requires_token() {
        let api = ApiConfig::new(DEFAULT_BASE_URL).unwrap();
        assert!(PlayerConfig::from_api(&api).is_err());

        let api = api
            .with_access_token(AccessToken::new("t"))
            .with_question_count(Some(3));
        let player = PlayerConfig::from_api(&api).unwrap();
        assert_eq!(player.question_count, Some(3));
        assert_eq!(player.tick_interval, Duration::from_secs(1));
    }
}
