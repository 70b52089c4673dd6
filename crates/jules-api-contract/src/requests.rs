// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request payloads and list response envelopes (wire format, camelCase)

use serde::{Deserialize, Serialize};

use crate::{Activity, AutomationMode, Session, Source, SourceContext, null_as_default};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContextPayload {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo_context: Option<GitHubRepoContextPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepoContextPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_branch: Option<String>,
}

impl From<&SourceContext> for SourceContextPayload {
    fn from(context: &SourceContext) -> Self {
        SourceContextPayload {
            source: context.source.clone(),
            github_repo_context: context.github_repo_context.as_ref().map(|ctx| {
                GitHubRepoContextPayload {
                    starting_branch: ctx.starting_branch.clone(),
                }
            }),
        }
    }
}

/// Body of `POST /sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub prompt: String,
    pub source_context: SourceContextPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_plan_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_mode: Option<AutomationMode>,
}

impl CreateSessionRequest {
    pub fn new(prompt: impl Into<String>, source_context: SourceContextPayload) -> Self {
        Self {
            prompt: prompt.into(),
            source_context,
            title: None,
            require_plan_approval: None,
            automation_mode: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_require_plan_approval(mut self, required: bool) -> Self {
        self.require_plan_approval = Some(required);
        self
    }

    pub fn with_automation_mode(mut self, mode: AutomationMode) -> Self {
        self.automation_mode = Some(mode);
        self
    }
}

/// Body of `POST /sessions/{id}:sendMessage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<Session>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,
    pub next_page_token: Option<String>,
}
