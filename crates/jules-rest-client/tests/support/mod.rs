// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared helpers for the HTTP tests

#![allow(dead_code)]

use jules_rest_client::{ClientConfig, RestClient};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const BASE_PATH: &str = "/v1alpha";

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_key(API_KEY)
        .with_base_url(format!("{}{BASE_PATH}/", server.uri()))
}

/// Path as seen by the mock server for an API path
pub fn api_path(path: &str) -> String {
    format!("{BASE_PATH}{path}")
}

/// Run blocking client code off the async test runtime.
///
/// The client is created and dropped on the blocking thread.
pub async fn with_client<T, F>(server: &MockServer, f: F) -> T
where
    F: FnOnce(RestClient) -> T + Send + 'static,
    T: Send + 'static,
{
    let config = config_for(server);
    tokio::task::spawn_blocking(move || {
        let client = RestClient::new(config).expect("test client");
        f(client)
    })
    .await
    .expect("blocking task panicked")
}
