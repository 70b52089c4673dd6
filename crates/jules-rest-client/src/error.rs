// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the Jules REST client

use serde_json::Value;
use thiserror::Error;

pub type RestClientResult<T> = std::result::Result<T, RestClientError>;

/// A non-2xx response from the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    /// Human-readable message taken from the body, or a per-status default
    pub message: String,
    /// Raw response body, `None` when the server sent nothing
    pub response: Option<String>,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Error)]
pub enum RestClientError {
    /// Missing or invalid client configuration; raised before any request
    #[error("{0}")]
    Configuration(String),

    /// Client-side precondition failure; never sent to the network
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    BadRequest(ApiFailure),

    #[error("{0}")]
    Authentication(ApiFailure),

    #[error("{0}")]
    Forbidden(ApiFailure),

    #[error("{0}")]
    NotFound(ApiFailure),

    #[error("{0}")]
    RateLimit(ApiFailure),

    #[error("{0}")]
    Server(ApiFailure),

    /// Any other non-2xx status
    #[error("{0}")]
    Unexpected(ApiFailure),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl RestClientError {
    /// Map a non-2xx status and its raw body to the matching error variant.
    pub fn from_status(status: u16, body: Option<String>) -> Self {
        let body = body.filter(|text| !text.trim().is_empty());
        let message = body
            .as_deref()
            .and_then(extract_message)
            .unwrap_or_else(|| default_message(status));
        let failure = ApiFailure {
            status,
            message,
            response: body,
        };

        match status {
            400 => RestClientError::BadRequest(failure),
            401 => RestClientError::Authentication(failure),
            403 => RestClientError::Forbidden(failure),
            404 => RestClientError::NotFound(failure),
            429 => RestClientError::RateLimit(failure),
            500..=599 => RestClientError::Server(failure),
            _ => RestClientError::Unexpected(failure),
        }
    }

    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            RestClientError::BadRequest(failure)
            | RestClientError::Authentication(failure)
            | RestClientError::Forbidden(failure)
            | RestClientError::NotFound(failure)
            | RestClientError::RateLimit(failure)
            | RestClientError::Server(failure)
            | RestClientError::Unexpected(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self.api_failure() {
            Some(failure) => failure.message.clone(),
            None => self.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RestClientError::Http(err) => err.status().map(|status| status.as_u16()),
            other => other.api_failure().map(|failure| failure.status),
        }
    }

    pub fn response(&self) -> Option<&str> {
        self.api_failure()?.response.as_deref()
    }
}

fn default_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Invalid API key".to_string(),
        403 => "Access forbidden".to_string(),
        404 => "Resource not found".to_string(),
        429 => "Rate limit exceeded".to_string(),
        500..=599 => "Server error".to_string(),
        other => format!("Unexpected response: {other}"),
    }
}

/// `error.message`, then `error` when it is a string, then `message`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error") {
        Some(Value::Object(error)) => error.get("message")?.as_str().map(str::to_string),
        Some(Value::String(error)) => Some(error.clone()),
        _ => value.get("message")?.as_str().map(str::to_string),
    }
}
