// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use jules_api_contract::{CreateSessionRequest, SendMessageRequest, Session, SessionListResponse};
use serde_json::json;

use crate::client::RestClient;
use crate::error::RestClientResult;
use crate::pagination::{ListOptions, Page, PageIter};
use crate::paths::session_path;

/// Coding sessions.
///
/// Every method taking `name_or_id` accepts `abc123`, `sessions/abc123` or
/// `/sessions/abc123`.
#[derive(Debug, Clone, Copy)]
pub struct Sessions<'a> {
    client: &'a RestClient,
}

impl<'a> Sessions<'a> {
    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub fn list(&self, options: &ListOptions) -> RestClientResult<Page<Session>> {
        let response: SessionListResponse = self.client.get_as("/sessions", &options.query())?;
        Ok(Page {
            items: response.sessions,
            next_page_token: response.next_page_token,
        })
    }

    pub fn each(&self, page_size: Option<u32>) -> PageIter<'a, Session> {
        let sessions = *self;
        PageIter::new(page_size, move |options| sessions.list(&options))
    }

    pub fn all(&self) -> RestClientResult<Vec<Session>> {
        self.each(None).collect()
    }

    pub fn find(&self, name_or_id: &str) -> RestClientResult<Session> {
        self.client.get_as(&session_path(name_or_id), &[])
    }

    pub fn create(&self, request: &CreateSessionRequest) -> RestClientResult<Session> {
        self.client.post_as("/sessions", request)
    }

    pub fn approve_plan(&self, name_or_id: &str) -> RestClientResult<Session> {
        let path = format!("{}:approvePlan", session_path(name_or_id));
        self.client.post_as(&path, &json!({}))
    }

    pub fn send_message(&self, name_or_id: &str, prompt: &str) -> RestClientResult<Session> {
        let path = format!("{}:sendMessage", session_path(name_or_id));
        let body = SendMessageRequest {
            prompt: prompt.to_string(),
        };
        self.client.post_as(&path, &body)
    }

    pub fn destroy(&self, name_or_id: &str) -> RestClientResult<()> {
        self.client.delete(&session_path(name_or_id))?;
        Ok(())
    }
}
