// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Artifacts attached to activities: diffs, media and command output

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{PlainData, decode_payload};

/// Output attached to an activity.
///
/// On the wire an artifact sets exactly one of `changeSet`, `media` or
/// `bashOutput`. The variant is chosen once while parsing, probing the fields
/// in that order; the first non-null field wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ArtifactWire")]
pub enum Artifact {
    ChangeSet(ChangeSet),
    Media(Media),
    BashOutput(BashOutput),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactType {
    ChangeSet,
    Media,
    BashOutput,
    Unknown,
}

impl ArtifactType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactType::ChangeSet => "change_set",
            ArtifactType::Media => "media",
            ArtifactType::BashOutput => "bash_output",
            ArtifactType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of code changes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ChangeSet {
    pub source: Option<String>,
    pub git_patch: Option<GitPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GitPatch {
    pub unidiff_patch: Option<String>,
    pub base_commit_id: Option<String>,
    pub suggested_commit_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Media {
    /// Base64 encoded content
    pub data: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct BashOutput {
    pub command: Option<String>,
    pub output: Option<String>,
    pub exit_code: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactWire {
    change_set: Option<Value>,
    media: Option<Value>,
    bash_output: Option<Value>,
}

impl From<ArtifactWire> for Artifact {
    fn from(wire: ArtifactWire) -> Self {
        if let Some(change_set) = wire.change_set {
            Artifact::ChangeSet(decode_payload(change_set))
        } else if let Some(media) = wire.media {
            Artifact::Media(decode_payload(media))
        } else if let Some(bash_output) = wire.bash_output {
            Artifact::BashOutput(decode_payload(bash_output))
        } else {
            Artifact::Unknown
        }
    }
}

impl Artifact {
    pub fn artifact_type(&self) -> ArtifactType {
        match self {
            Artifact::ChangeSet(_) => ArtifactType::ChangeSet,
            Artifact::Media(_) => ArtifactType::Media,
            Artifact::BashOutput(_) => ArtifactType::BashOutput,
            Artifact::Unknown => ArtifactType::Unknown,
        }
    }

    pub fn change_set(&self) -> Option<&ChangeSet> {
        match self {
            Artifact::ChangeSet(change_set) => Some(change_set),
            _ => None,
        }
    }

    pub fn media(&self) -> Option<&Media> {
        match self {
            Artifact::Media(media) => Some(media),
            _ => None,
        }
    }

    pub fn bash_output(&self) -> Option<&BashOutput> {
        match self {
            Artifact::BashOutput(output) => Some(output),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.change_set()?.source.as_deref()
    }

    fn git_patch(&self) -> Option<&GitPatch> {
        self.change_set()?.git_patch.as_ref()
    }

    pub fn unidiff_patch(&self) -> Option<&str> {
        self.git_patch()?.unidiff_patch.as_deref()
    }

    pub fn base_commit_id(&self) -> Option<&str> {
        self.git_patch()?.base_commit_id.as_deref()
    }

    pub fn suggested_commit_message(&self) -> Option<&str> {
        self.git_patch()?.suggested_commit_message.as_deref()
    }

    pub fn media_data(&self) -> Option<&str> {
        self.media()?.data.as_deref()
    }

    pub fn media_mime_type(&self) -> Option<&str> {
        self.media()?.mime_type.as_deref()
    }

    pub fn bash_command(&self) -> Option<&str> {
        self.bash_output()?.command.as_deref()
    }

    pub fn bash_output_text(&self) -> Option<&str> {
        self.bash_output()?.output.as_deref()
    }

    pub fn bash_exit_code(&self) -> Option<i64> {
        self.bash_output()?.exit_code
    }
}

impl Serialize for Artifact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.artifact_type();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", kind.as_str())?;
        match self {
            Artifact::ChangeSet(change_set) => map.serialize_entry(kind.as_str(), change_set)?,
            Artifact::Media(media) => map.serialize_entry(kind.as_str(), media)?,
            Artifact::BashOutput(output) => map.serialize_entry(kind.as_str(), output)?,
            Artifact::Unknown => {}
        }
        map.end()
    }
}

impl PlainData for Artifact {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> Artifact {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_change_set_artifact() {
        let artifact = parse(json!({
            "changeSet": {
                "source": "sources/github/o/r",
                "gitPatch": {
                    "unidiffPatch": "--- a/x\n+++ b/x\n",
                    "baseCommitId": "abc123",
                    "suggestedCommitMessage": "Fix x"
                }
            }
        }));

        assert_eq!(artifact.artifact_type(), ArtifactType::ChangeSet);
        assert_eq!(artifact.source(), Some("sources/github/o/r"));
        assert_eq!(artifact.unidiff_patch(), Some("--- a/x\n+++ b/x\n"));
        assert_eq!(artifact.base_commit_id(), Some("abc123"));
        assert_eq!(artifact.suggested_commit_message(), Some("Fix x"));
        assert_eq!(artifact.media_data(), None);
    }

    #[test]
    fn test_media_artifact() {
        let artifact = parse(json!({ "media": { "data": "aGVsbG8=", "mimeType": "image/png" } }));
        assert_eq!(artifact.artifact_type(), ArtifactType::Media);
        assert_eq!(artifact.media_data(), Some("aGVsbG8="));
        assert_eq!(artifact.media_mime_type(), Some("image/png"));
        assert_eq!(artifact.unidiff_patch(), None);
    }

    #[test]
    fn test_bash_output_artifact() {
        let artifact = parse(json!({
            "bashOutput": { "command": "cargo test", "output": "ok", "exitCode": 101 }
        }));
        assert_eq!(artifact.artifact_type(), ArtifactType::BashOutput);
        assert_eq!(artifact.bash_command(), Some("cargo test"));
        assert_eq!(artifact.bash_output_text(), Some("ok"));
        assert_eq!(artifact.bash_exit_code(), Some(101));
    }

    #[test]
    fn test_unknown_artifact() {
        let artifact = parse(json!({ "somethingElse": {} }));
        assert_eq!(artifact, Artifact::Unknown);
        assert_eq!(artifact.to_plain(), json!({ "type": "unknown" }));
    }

    #[test]
    fn test_first_field_wins_when_several_are_set() {
        let artifact = parse(json!({
            "media": { "mimeType": "text/plain" },
            "changeSet": { "source": "sources/a" },
            "bashOutput": { "command": "ls" }
        }));
        assert_eq!(artifact.artifact_type(), ArtifactType::ChangeSet);

        let artifact = parse(json!({
            "changeSet": null,
            "bashOutput": { "command": "ls" },
            "media": { "mimeType": "text/plain" }
        }));
        assert_eq!(artifact.artifact_type(), ArtifactType::Media);
    }

    #[test]
    fn test_empty_payload_still_selects_variant() {
        let artifact = parse(json!({ "bashOutput": {} }));
        assert_eq!(artifact, Artifact::BashOutput(BashOutput::default()));
    }

    #[test]
    fn test_artifact_projection() {
        let artifact = parse(json!({ "bashOutput": { "command": "ls", "exitCode": 0 } }));
        assert_eq!(
            artifact.to_plain(),
            json!({
                "type": "bash_output",
                "bash_output": { "command": "ls", "output": null, "exit_code": 0 }
            })
        );
    }
}
