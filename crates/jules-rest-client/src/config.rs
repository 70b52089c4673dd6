// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client configuration
//!
//! Values resolve with the precedence explicit argument, then environment,
//! then built-in default. There is no process-wide configuration; callers
//! build a [`ClientConfig`] and hand it to [`crate::RestClient::new`].

use std::time::Duration;

use url::{Host, Url};

use crate::error::{RestClientError, RestClientResult};

pub const DEFAULT_BASE_URL: &str = "https://jules.googleapis.com/v1alpha";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const API_KEY_ENV: &str = "JULES_API_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Defaults plus the API key from `JULES_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup(API_KEY_ENV),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Check the API key and the base URL security policy.
    pub fn validate(&self) -> RestClientResult<()> {
        if !self.is_valid() {
            return Err(RestClientError::Configuration(format!(
                "API key is required. Set {API_KEY_ENV} or pass api_key explicitly."
            )));
        }

        let url = Url::parse(&self.base_url).map_err(|err| {
            RestClientError::Configuration(format!("Invalid base URL {}: {err}", self.base_url))
        })?;

        match url.scheme() {
            "https" => Ok(()),
            "http" if is_loopback(url.host()) => Ok(()),
            _ => Err(RestClientError::Configuration(format!(
                "Base URL must use HTTPS: {}",
                self.base_url
            ))),
        }
    }
}

fn is_loopback(host: Option<Host<&str>>) -> bool {
    match host {
        Some(Host::Domain(domain)) => domain == "localhost",
        Some(Host::Ipv4(addr)) => addr == std::net::Ipv4Addr::LOCALHOST,
        Some(Host::Ipv6(addr)) => addr == std::net::Ipv6Addr::LOCALHOST,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(env(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, "https://jules.googleapis.com/v1alpha");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.is_valid());
    }

    #[test]
    fn test_explicit_argument_beats_environment() {
        let config = ClientConfig::from_lookup(env(&[("JULES_API_KEY", "from-env")]));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));

        let config = config.with_api_key("explicit");
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_empty_key_is_invalid() {
        let config = ClientConfig::default().with_api_key("");
        assert!(!config.is_valid());
        assert!(matches!(config.validate(), Err(RestClientError::Configuration(_))));
    }

    #[test]
    fn test_https_policy() {
        let accepted = [
            "https://jules.googleapis.com/v1alpha",
            "http://localhost:8080",
            "http://127.0.0.1:3000/v1",
            "http://[::1]:9000",
        ];
        for base_url in accepted {
            let config = ClientConfig::default().with_api_key("k").with_base_url(base_url);
            assert!(config.validate().is_ok(), "{base_url} should be accepted");
        }

        let rejected = [
            "http://jules.googleapis.com/v1alpha",
            "http://localhost.evil.com",
            "http://127.0.0.2",
            "ftp://localhost",
            "not a url",
            "http:path",
        ];
        for base_url in rejected {
            let config = ClientConfig::default().with_api_key("k").with_base_url(base_url);
            assert!(
                matches!(config.validate(), Err(RestClientError::Configuration(_))),
                "{base_url} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::default().with_api_key("super-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("[REDACTED]"));
    }
}
