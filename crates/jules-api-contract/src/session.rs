// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Coding sessions and their outputs

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{PlainData, SourceContext, null_as_default, parse_timestamp};

/// Session lifecycle states
///
/// Values the client does not know about are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionState {
    Unspecified,
    Queued,
    Planning,
    AwaitingPlanApproval,
    AwaitingUserFeedback,
    InProgress,
    Paused,
    Failed,
    Completed,
    Other(String),
}

impl SessionState {
    pub fn as_str(&self) -> &str {
        match self {
            SessionState::Unspecified => "STATE_UNSPECIFIED",
            SessionState::Queued => "QUEUED",
            SessionState::Planning => "PLANNING",
            SessionState::AwaitingPlanApproval => "AWAITING_PLAN_APPROVAL",
            SessionState::AwaitingUserFeedback => "AWAITING_USER_FEEDBACK",
            SessionState::InProgress => "IN_PROGRESS",
            SessionState::Paused => "PAUSED",
            SessionState::Failed => "FAILED",
            SessionState::Completed => "COMPLETED",
            SessionState::Other(value) => value,
        }
    }

    /// States in which the agent is still working or waiting on the user
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionState::Queued
                | SessionState::Planning
                | SessionState::AwaitingPlanApproval
                | SessionState::AwaitingUserFeedback
                | SessionState::InProgress
        )
    }
}

impl From<String> for SessionState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "STATE_UNSPECIFIED" => SessionState::Unspecified,
            "QUEUED" => SessionState::Queued,
            "PLANNING" => SessionState::Planning,
            "AWAITING_PLAN_APPROVAL" => SessionState::AwaitingPlanApproval,
            "AWAITING_USER_FEEDBACK" => SessionState::AwaitingUserFeedback,
            "IN_PROGRESS" => SessionState::InProgress,
            "PAUSED" => SessionState::Paused,
            "FAILED" => SessionState::Failed,
            "COMPLETED" => SessionState::Completed,
            _ => SessionState::Other(value),
        }
    }
}

impl From<SessionState> for String {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the agent does automatically once the work is finished
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AutomationMode {
    Unspecified,
    AutoCreatePr,
    Other(String),
}

impl AutomationMode {
    pub fn as_str(&self) -> &str {
        match self {
            AutomationMode::Unspecified => "AUTOMATION_MODE_UNSPECIFIED",
            AutomationMode::AutoCreatePr => "AUTO_CREATE_PR",
            AutomationMode::Other(value) => value,
        }
    }
}

impl From<String> for AutomationMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AUTOMATION_MODE_UNSPECIFIED" => AutomationMode::Unspecified,
            "AUTO_CREATE_PR" => AutomationMode::AutoCreatePr,
            _ => AutomationMode::Other(value),
        }
    }
}

impl From<AutomationMode> for String {
    fn from(mode: AutomationMode) -> Self {
        match mode {
            AutomationMode::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for AutomationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One coding task: prompt, plan, work, then completion or failure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Session {
    /// Full resource name, e.g. `sessions/123`
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    pub title: Option<String>,
    pub source_context: Option<SourceContext>,
    /// `None` when the server omits the state
    pub state: Option<SessionState>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Vec<SessionOutput>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
    pub require_plan_approval: Option<bool>,
    pub automation_mode: Option<AutomationMode>,
}

impl Session {
    fn state_is(&self, state: SessionState) -> bool {
        self.state.as_ref() == Some(&state)
    }

    pub fn is_queued(&self) -> bool {
        self.state_is(SessionState::Queued)
    }

    pub fn is_planning(&self) -> bool {
        self.state_is(SessionState::Planning)
    }

    pub fn is_awaiting_plan_approval(&self) -> bool {
        self.state_is(SessionState::AwaitingPlanApproval)
    }

    pub fn is_awaiting_user_feedback(&self) -> bool {
        self.state_is(SessionState::AwaitingUserFeedback)
    }

    pub fn is_in_progress(&self) -> bool {
        self.state_is(SessionState::InProgress)
    }

    pub fn is_paused(&self) -> bool {
        self.state_is(SessionState::Paused)
    }

    pub fn is_failed(&self) -> bool {
        self.state_is(SessionState::Failed)
    }

    pub fn is_completed(&self) -> bool {
        self.state_is(SessionState::Completed)
    }

    pub fn is_active(&self) -> bool {
        self.state.as_ref().is_some_and(SessionState::is_active)
    }

    pub fn pull_requests(&self) -> impl Iterator<Item = &PullRequest> {
        self.outputs.iter().filter_map(SessionOutput::pull_request)
    }

    pub fn create_time_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.create_time.as_deref())
    }

    pub fn update_time_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.update_time.as_deref())
    }
}

/// A session output.
///
/// Outputs carrying a `pullRequest` are parsed; anything else is kept as the
/// server sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutput {
    PullRequest(PullRequest),
    Other(Value),
}

impl SessionOutput {
    pub fn pull_request(&self) -> Option<&PullRequest> {
        match self {
            SessionOutput::PullRequest(pr) => Some(pr),
            SessionOutput::Other(_) => None,
        }
    }
}

impl From<Value> for SessionOutput {
    fn from(value: Value) -> Self {
        match value.get("pullRequest").filter(|pr| !pr.is_null()) {
            Some(pr) => match PullRequest::deserialize(pr) {
                Ok(pr) => SessionOutput::PullRequest(pr),
                Err(_) => SessionOutput::Other(value),
            },
            None => SessionOutput::Other(value),
        }
    }
}

impl<'de> Deserialize<'de> for SessionOutput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(SessionOutput::from)
    }
}

impl Serialize for SessionOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SessionOutput::PullRequest(pr) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("pull_request", pr)?;
                map.end()
            }
            SessionOutput::Other(value) => value.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PullRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PlainData for Session {}
impl PlainData for SessionOutput {}
impl PlainData for PullRequest {}
