// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Blocking HTTP transport for the Jules API

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{RestClientError, RestClientResult};
use crate::resources::{Activities, Sessions, Sources};

pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Query parameters; `None` values are dropped before encoding
pub type QueryParams<'a> = [(&'a str, Option<String>)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    fn method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

/// REST client for the Jules API.
///
/// Every call blocks until the exchange completes. A client may be shared
/// between threads; each call builds its own request.
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    config: ClientConfig,
}

impl RestClient {
    /// Create a client, failing with a configuration error before any I/O.
    pub fn new(config: ClientConfig) -> RestClientResult<Self> {
        config.validate()?;

        let http_client = HttpClient::builder()
            .user_agent(concat!("jules-rest-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            // 3xx surfaces as an error and the key header never leaves the base host
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn sources(&self) -> Sources<'_> {
        Sources::new(self)
    }

    pub fn sessions(&self) -> Sessions<'_> {
        Sessions::new(self)
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities::new(self)
    }

    pub fn get(&self, path: &str, params: &QueryParams<'_>) -> RestClientResult<Value> {
        self.request(Verb::Get, path, params, None::<&()>)
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RestClientResult<Value> {
        self.request(Verb::Post, path, &[], Some(body))
    }

    pub fn delete(&self, path: &str) -> RestClientResult<Value> {
        self.request(Verb::Delete, path, &[], None::<&()>)
    }

    pub(crate) fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams<'_>,
    ) -> RestClientResult<T> {
        Ok(serde_json::from_value(self.get(path, params)?)?)
    }

    pub(crate) fn post_as<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RestClientResult<T> {
        Ok(serde_json::from_value(self.post(path, body)?)?)
    }

    /// Full request URL for `path` relative to the base URL.
    pub fn build_url(&self, path: &str, params: &QueryParams<'_>) -> RestClientResult<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let mut url = Url::parse(&format!("{base}{path}"))?;
        let present: Vec<_> = params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        verb: Verb,
        path: &str,
        params: &QueryParams<'_>,
        body: Option<&B>,
    ) -> RestClientResult<Value> {
        let url = self.build_url(path, params)?;
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        debug!(method = ?verb, url = %url, "Sending Jules API request");

        let mut request = self
            .http_client
            .request(verb.method(), url.clone())
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().map_err(|err| {
            warn!(method = ?verb, url = %url, error = %err, "Jules API request failed");
            RestClientError::from(err)
        })?;
        self.handle_response(verb, &url, response)
    }

    fn handle_response(&self, verb: Verb, url: &Url, response: Response) -> RestClientResult<Value> {
        let status = response.status();
        debug!(method = ?verb, url = %url, status = status.as_u16(), "Received Jules API response");
        let text = response.text()?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Object(serde_json::Map::new()));
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let error = RestClientError::from_status(status.as_u16(), Some(text));
        warn!(
            method = ?verb,
            url = %url,
            status = status.as_u16(),
            message = %error.message(),
            "Jules API returned an error"
        );
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> RestClient {
        RestClient::new(ClientConfig::default().with_api_key("k").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_before_any_request() {
        let err = RestClient::new(ClientConfig::default()).unwrap_err();
        assert!(matches!(err, RestClientError::Configuration(_)));

        let err = RestClient::new(
            ClientConfig::default().with_api_key("k").with_base_url("http://example.com"),
        )
        .unwrap_err();
        assert!(matches!(err, RestClientError::Configuration(_)));
    }

    #[test]
    fn test_build_url_joins_base_and_path() {
        let client = client("https://jules.googleapis.com/v1alpha/");
        assert_eq!(
            client.build_url("sessions", &[]).unwrap().as_str(),
            "https://jules.googleapis.com/v1alpha/sessions"
        );
        assert_eq!(
            client.build_url("/sessions/1:approvePlan", &[]).unwrap().as_str(),
            "https://jules.googleapis.com/v1alpha/sessions/1:approvePlan"
        );
    }

    #[test]
    fn test_build_url_drops_missing_params() {
        let client = client("https://jules.googleapis.com/v1alpha");
        let url = client
            .build_url(
                "/sources",
                &[("pageToken", None), ("pageSize", Some("10".to_string()))],
            )
            .unwrap();
        assert_eq!(url.as_str(), "https://jules.googleapis.com/v1alpha/sources?pageSize=10");

        let url = client.build_url("/sources", &[("pageToken", None)]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_build_url_encodes_param_values() {
        let client = client("https://jules.googleapis.com/v1alpha");
        let url = client
            .build_url("/sources", &[("pageToken", Some("a b&c".to_string()))])
            .unwrap();
        assert_eq!(url.query(), Some("pageToken=a+b%26c"));
    }
}
