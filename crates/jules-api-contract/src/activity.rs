// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Activities: the events making up a session's timeline

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{Artifact, Plan, PlainData, decode_payload, null_as_default};

/// Who produced an activity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Originator {
    User,
    Agent,
    System,
    Other(String),
}

impl Originator {
    pub fn as_str(&self) -> &str {
        match self {
            Originator::User => "user",
            Originator::Agent => "agent",
            Originator::System => "system",
            Originator::Other(value) => value,
        }
    }
}

impl From<String> for Originator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Originator::User,
            "agent" => Originator::Agent,
            "system" => Originator::System,
            _ => Originator::Other(value),
        }
    }
}

impl From<Originator> for String {
    fn from(originator: Originator) -> Self {
        match originator {
            Originator::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Originator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    AgentMessaged,
    UserMessaged,
    PlanGenerated,
    PlanApproved,
    ProgressUpdated,
    SessionCompleted,
    SessionFailed,
    Unknown,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::AgentMessaged => "agent_messaged",
            ActivityType::UserMessaged => "user_messaged",
            ActivityType::PlanGenerated => "plan_generated",
            ActivityType::PlanApproved => "plan_approved",
            ActivityType::ProgressUpdated => "progress_updated",
            ActivityType::SessionCompleted => "session_completed",
            ActivityType::SessionFailed => "session_failed",
            ActivityType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct AgentMessaged {
    pub agent_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct UserMessaged {
    pub user_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanGenerated {
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PlanApproved {
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressUpdated {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionCompleted {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFailed {
    pub reason: Option<String>,
}

/// The payload of an activity; exactly one per activity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivityPayload {
    AgentMessaged(AgentMessaged),
    UserMessaged(UserMessaged),
    PlanGenerated(PlanGenerated),
    PlanApproved(PlanApproved),
    ProgressUpdated(ProgressUpdated),
    SessionCompleted(SessionCompleted),
    SessionFailed(SessionFailed),
    #[default]
    Unknown,
}

impl ActivityPayload {
    pub fn activity_type(&self) -> ActivityType {
        match self {
            ActivityPayload::AgentMessaged(_) => ActivityType::AgentMessaged,
            ActivityPayload::UserMessaged(_) => ActivityType::UserMessaged,
            ActivityPayload::PlanGenerated(_) => ActivityType::PlanGenerated,
            ActivityPayload::PlanApproved(_) => ActivityType::PlanApproved,
            ActivityPayload::ProgressUpdated(_) => ActivityType::ProgressUpdated,
            ActivityPayload::SessionCompleted(_) => ActivityType::SessionCompleted,
            ActivityPayload::SessionFailed(_) => ActivityType::SessionFailed,
            ActivityPayload::Unknown => ActivityType::Unknown,
        }
    }
}

/// One event in a session's timeline.
///
/// The wire object sets one of `agentMessaged`, `userMessaged`,
/// `planGenerated`, `planApproved`, `progressUpdated`, `sessionCompleted` or
/// `sessionFailed`. The payload is resolved once while parsing by probing the
/// fields in that order; the first non-null one wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "ActivityWire")]
pub struct Activity {
    /// Full resource name, e.g. `sessions/123/activities/abc`
    pub name: String,
    pub id: String,
    pub description: Option<String>,
    pub create_time: Option<String>,
    pub originator: Option<Originator>,
    pub artifacts: Vec<Artifact>,
    pub payload: ActivityPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityWire {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    description: Option<String>,
    create_time: Option<String>,
    originator: Option<Originator>,
    #[serde(default, deserialize_with = "null_as_default")]
    artifacts: Vec<Artifact>,
    agent_messaged: Option<Value>,
    user_messaged: Option<Value>,
    plan_generated: Option<Value>,
    plan_approved: Option<Value>,
    progress_updated: Option<Value>,
    session_completed: Option<Value>,
    session_failed: Option<Value>,
}

impl ActivityWire {
    fn take_payload(&mut self) -> ActivityPayload {
        if let Some(value) = self.agent_messaged.take() {
            ActivityPayload::AgentMessaged(decode_payload(value))
        } else if let Some(value) = self.user_messaged.take() {
            ActivityPayload::UserMessaged(decode_payload(value))
        } else if let Some(value) = self.plan_generated.take() {
            ActivityPayload::PlanGenerated(decode_payload(value))
        } else if let Some(value) = self.plan_approved.take() {
            ActivityPayload::PlanApproved(decode_payload(value))
        } else if let Some(value) = self.progress_updated.take() {
            ActivityPayload::ProgressUpdated(decode_payload(value))
        } else if let Some(value) = self.session_completed.take() {
            ActivityPayload::SessionCompleted(decode_payload(value))
        } else if let Some(value) = self.session_failed.take() {
            ActivityPayload::SessionFailed(decode_payload(value))
        } else {
            ActivityPayload::Unknown
        }
    }
}

impl From<ActivityWire> for Activity {
    fn from(mut wire: ActivityWire) -> Self {
        let payload = wire.take_payload();
        Activity {
            name: wire.name,
            id: wire.id,
            description: wire.description,
            create_time: wire.create_time,
            originator: wire.originator,
            artifacts: wire.artifacts,
            payload,
        }
    }
}

impl Activity {
    pub fn activity_type(&self) -> ActivityType {
        self.payload.activity_type()
    }

    pub fn is_agent_message(&self) -> bool {
        matches!(self.payload, ActivityPayload::AgentMessaged(_))
    }

    pub fn is_user_message(&self) -> bool {
        matches!(self.payload, ActivityPayload::UserMessaged(_))
    }

    pub fn is_plan_generated(&self) -> bool {
        matches!(self.payload, ActivityPayload::PlanGenerated(_))
    }

    pub fn is_plan_approved(&self) -> bool {
        matches!(self.payload, ActivityPayload::PlanApproved(_))
    }

    pub fn is_progress_update(&self) -> bool {
        matches!(self.payload, ActivityPayload::ProgressUpdated(_))
    }

    pub fn is_session_completed(&self) -> bool {
        matches!(self.payload, ActivityPayload::SessionCompleted(_))
    }

    pub fn is_session_failed(&self) -> bool {
        matches!(self.payload, ActivityPayload::SessionFailed(_))
    }

    pub fn from_agent(&self) -> bool {
        self.originator == Some(Originator::Agent)
    }

    pub fn from_user(&self) -> bool {
        self.originator == Some(Originator::User)
    }

    pub fn from_system(&self) -> bool {
        self.originator == Some(Originator::System)
    }

    /// Text of an agent or user message
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            ActivityPayload::AgentMessaged(msg) => msg.agent_message.as_deref(),
            ActivityPayload::UserMessaged(msg) => msg.user_message.as_deref(),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<&Plan> {
        match &self.payload {
            ActivityPayload::PlanGenerated(generated) => generated.plan.as_ref(),
            _ => None,
        }
    }

    pub fn approved_plan_id(&self) -> Option<&str> {
        match &self.payload {
            ActivityPayload::PlanApproved(approved) => approved.plan_id.as_deref(),
            _ => None,
        }
    }

    pub fn progress_title(&self) -> Option<&str> {
        match &self.payload {
            ActivityPayload::ProgressUpdated(progress) => progress.title.as_deref(),
            _ => None,
        }
    }

    pub fn progress_description(&self) -> Option<&str> {
        match &self.payload {
            ActivityPayload::ProgressUpdated(progress) => progress.description.as_deref(),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.payload {
            ActivityPayload::SessionFailed(failed) => failed.reason.as_deref(),
            _ => None,
        }
    }
}

impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.activity_type();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("create_time", &self.create_time)?;
        map.serialize_entry("originator", &self.originator)?;
        map.serialize_entry("type", kind.as_str())?;
        match &self.payload {
            ActivityPayload::AgentMessaged(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::UserMessaged(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::PlanGenerated(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::PlanApproved(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::ProgressUpdated(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::SessionCompleted(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::SessionFailed(p) => map.serialize_entry(kind.as_str(), p)?,
            ActivityPayload::Unknown => {}
        }
        map.serialize_entry("artifacts", &self.artifacts)?;
        map.end()
    }
}

impl PlainData for Activity {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArtifactType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> Activity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_each_payload_field_maps_to_its_type() {
        let cases = [
            ("agentMessaged", json!({ "agentMessage": "hi" }), ActivityType::AgentMessaged),
            ("userMessaged", json!({ "userMessage": "hello" }), ActivityType::UserMessaged),
            ("planGenerated", json!({ "plan": { "id": "p" } }), ActivityType::PlanGenerated),
            ("planApproved", json!({ "planId": "p" }), ActivityType::PlanApproved),
            ("progressUpdated", json!({ "title": "Working" }), ActivityType::ProgressUpdated),
            ("sessionCompleted", json!({}), ActivityType::SessionCompleted),
            ("sessionFailed", json!({ "reason": "boom" }), ActivityType::SessionFailed),
        ];

        for (field, payload, expected) in cases {
            let activity = parse(json!({ "name": "sessions/1/activities/a", field: payload }));
            assert_eq!(activity.activity_type(), expected, "field {field}");
        }
    }

    #[test]
    fn test_no_payload_is_unknown() {
        let activity = parse(json!({ "name": "sessions/1/activities/a", "id": "a" }));
        assert_eq!(activity.activity_type(), ActivityType::Unknown);
        assert_eq!(activity.message(), None);
        assert_eq!(activity.plan(), None);
        assert_eq!(activity.payload, ActivityPayload::default());
        assert_eq!(Activity::default().activity_type(), ActivityType::Unknown);
    }

    #[test]
    fn test_earlier_field_wins() {
        let activity = parse(json!({
            "sessionFailed": { "reason": "boom" },
            "progressUpdated": { "title": "Working" },
            "userMessaged": { "userMessage": "hello" }
        }));
        assert_eq!(activity.activity_type(), ActivityType::UserMessaged);
        assert_eq!(activity.message(), Some("hello"));
        assert_eq!(activity.failure_reason(), None);

        let activity = parse(json!({
            "agentMessaged": null,
            "sessionCompleted": {},
            "sessionFailed": { "reason": "boom" }
        }));
        assert_eq!(activity.activity_type(), ActivityType::SessionCompleted);
    }

    #[test]
    fn test_accessors() {
        let agent = parse(json!({ "agentMessaged": { "agentMessage": "Done" }, "originator": "agent" }));
        assert_eq!(agent.message(), Some("Done"));
        assert!(agent.is_agent_message());
        assert!(agent.from_agent());
        assert!(!agent.from_user());

        let approved = parse(json!({ "planApproved": { "planId": "plan-7" }, "originator": "user" }));
        assert_eq!(approved.approved_plan_id(), Some("plan-7"));
        assert!(approved.from_user());

        let progress = parse(json!({
            "progressUpdated": { "title": "Running tests", "description": "cargo test" },
            "originator": "system"
        }));
        assert_eq!(progress.progress_title(), Some("Running tests"));
        assert_eq!(progress.progress_description(), Some("cargo test"));
        assert!(progress.from_system());

        let failed = parse(json!({ "sessionFailed": { "reason": "Out of quota" } }));
        assert_eq!(failed.failure_reason(), Some("Out of quota"));
        assert!(failed.is_session_failed());
    }

    #[test]
    fn test_plan_generated_with_and_without_plan() {
        let activity = parse(json!({
            "planGenerated": {
                "plan": {
                    "id": "plan-1",
                    "steps": [{ "id": "s1", "title": "Step one", "index": 0 }]
                }
            }
        }));
        let plan = activity.plan().unwrap();
        assert_eq!(plan.id, "plan-1");
        assert_eq!(plan.steps[0].title, "Step one");

        let empty = parse(json!({ "planGenerated": {} }));
        assert_eq!(empty.activity_type(), ActivityType::PlanGenerated);
        assert_eq!(empty.plan(), None);
    }

    #[test]
    fn test_unknown_originator_is_preserved() {
        let activity = parse(json!({ "originator": "robot" }));
        assert_eq!(activity.originator, Some(Originator::Other("robot".to_string())));
        assert!(!activity.from_agent());
    }

    #[test]
    fn test_artifacts_are_parsed() {
        let activity = parse(json!({
            "progressUpdated": { "title": "Ran command" },
            "artifacts": [
                { "bashOutput": { "command": "ls", "output": "a\nb", "exitCode": 0 } },
                { "changeSet": { "source": "sources/github/o/r" } }
            ]
        }));
        let kinds: Vec<_> = activity.artifacts.iter().map(Artifact::artifact_type).collect();
        assert_eq!(kinds, [ArtifactType::BashOutput, ArtifactType::ChangeSet]);
    }

    #[test]
    fn test_activity_projection() {
        let activity = parse(json!({
            "name": "sessions/1/activities/a",
            "id": "a",
            "createTime": "2025-01-01T00:00:00Z",
            "originator": "agent",
            "agentMessaged": { "agentMessage": "Hi" }
        }));

        assert_eq!(
            activity.to_plain(),
            json!({
                "name": "sessions/1/activities/a",
                "id": "a",
                "description": null,
                "create_time": "2025-01-01T00:00:00Z",
                "originator": "agent",
                "type": "agent_messaged",
                "agent_messaged": { "agent_message": "Hi" },
                "artifacts": []
            })
        );
    }
}
