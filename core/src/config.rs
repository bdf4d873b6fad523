//! Client configuration.

use std::env;

use crate::error::{ApiError, Result};
use crate::types::Translation;

pub const DEFAULT_BASE_URL: &str = "https://api.biblia.com/v1/bible";

pub const ENV_API_KEY: &str = "BIBLIA_API_KEY";
pub const ENV_TRANSLATION: &str = "BIBLIA_TRANSLATION";
pub const ENV_BASE_URL: &str = "BIBLIA_BASE_URL";

/// Settings a client is constructed from.
///
/// The API key is never validated locally; a bad key surfaces as whatever the
/// remote service answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub translation: Translation,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            translation: Translation::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `BIBLIA_API_KEY` (required), `BIBLIA_TRANSLATION` and
    /// `BIBLIA_BASE_URL` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY).ok_or(ApiError::MissingConfig(ENV_API_KEY))?;
        let mut config = Self::new(api_key);
        if let Some(code) = lookup(ENV_TRANSLATION).filter(|v| !v.trim().is_empty()) {
            config.translation = code.parse()?;
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn new_uses_asv_and_public_base_url() {
        let config = ClientConfig::new("k");
        assert_eq!(config.translation, Translation::Asv);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_api_key_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig(ENV_API_KEY)));
    }

    #[test]
    fn empty_api_key_is_accepted() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "")])).unwrap();
        assert_eq!(config.api_key, "");
    }

    #[test]
    fn optional_values_override_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "abc"),
            (ENV_TRANSLATION, "KJV"),
            (ENV_BASE_URL, "http://127.0.0.1:3000/v1/bible"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.translation, Translation::Kjv);
        assert_eq!(config.base_url, "http://127.0.0.1:3000/v1/bible");
    }

    #[test]
    fn unknown_translation_fails() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "abc"), (ENV_TRANSLATION, "xyz")]))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownTranslation(_)));
    }
}
