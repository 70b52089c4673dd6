// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Sources (connected repositories) and the source context of a session

use serde::{Deserialize, Serialize};

use crate::{PlainData, null_as_default};

/// A connected repository the API can operate on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Source {
    /// Full resource name, e.g. `sources/github/owner/repo`
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub github_repo: Option<GitHubRepo>,
}

/// GitHub repository backing a source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GitHubRepo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repo: String,
    pub is_private: Option<bool>,
    pub default_branch: Option<GitHubBranch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub branches: Vec<GitHubBranch>,
}

impl GitHubRepo {
    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GitHubBranch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// The repository and branch a session works against
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct SourceContext {
    /// Source resource name
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    pub github_repo_context: Option<GitHubRepoContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GitHubRepoContext {
    pub starting_branch: Option<String>,
}

impl SourceContext {
    pub fn starting_branch(&self) -> Option<&str> {
        self.github_repo_context.as_ref()?.starting_branch.as_deref()
    }

    /// Build the wire payload used when creating a session.
    pub fn build(
        source: impl Into<String>,
        starting_branch: impl Into<String>,
    ) -> crate::SourceContextPayload {
        crate::SourceContextPayload {
            source: source.into(),
            github_repo_context: Some(crate::GitHubRepoContextPayload {
                starting_branch: Some(starting_branch.into()),
            }),
        }
    }
}

impl PlainData for Source {}
impl PlainData for GitHubRepo {}
impl PlainData for GitHubBranch {}
impl PlainData for SourceContext {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_source_with_github_repo() {
        let source: Source = serde_json::from_value(json!({
            "name": "sources/github/octo/widgets",
            "id": "github/octo/widgets",
            "githubRepo": {
                "owner": "octo",
                "repo": "widgets",
                "isPrivate": true,
                "defaultBranch": { "displayName": "main" },
                "branches": [{ "displayName": "main" }, { "displayName": "develop" }]
            }
        }))
        .unwrap();

        let repo = source.github_repo.as_ref().unwrap();
        assert_eq!(source.name, "sources/github/octo/widgets");
        assert_eq!(repo.full_name(), "octo/widgets");
        assert_eq!(repo.is_private, Some(true));
        assert_eq!(repo.default_branch.as_ref().unwrap().display_name, "main");
        assert_eq!(repo.branches.len(), 2);
        assert_eq!(repo.branches[1].display_name, "develop");
    }

    #[test]
    fn test_source_without_github_repo() {
        let source: Source =
            serde_json::from_value(json!({ "name": "sources/x", "id": "x" })).unwrap();
        assert!(source.github_repo.is_none());
    }

    #[test]
    fn test_null_branches_become_empty() {
        let repo: GitHubRepo =
            serde_json::from_value(json!({ "owner": "o", "repo": "r", "branches": null }))
                .unwrap();
        assert!(repo.branches.is_empty());
        assert!(repo.default_branch.is_none());
    }

    #[test]
    fn test_source_projection_uses_snake_case() {
        let source: Source = serde_json::from_value(json!({
            "name": "sources/github/o/r",
            "id": "github/o/r",
            "githubRepo": { "owner": "o", "repo": "r", "isPrivate": false }
        }))
        .unwrap();

        assert_eq!(
            source.to_plain(),
            json!({
                "name": "sources/github/o/r",
                "id": "github/o/r",
                "github_repo": {
                    "owner": "o",
                    "repo": "r",
                    "is_private": false,
                    "default_branch": null,
                    "branches": []
                }
            })
        );
    }

    #[test]
    fn test_source_context_parsing() {
        let context: SourceContext = serde_json::from_value(json!({
            "source": "sources/github/o/r",
            "githubRepoContext": { "startingBranch": "develop" }
        }))
        .unwrap();
        assert_eq!(context.source, "sources/github/o/r");
        assert_eq!(context.starting_branch(), Some("develop"));

        let bare: SourceContext =
            serde_json::from_value(json!({ "source": "sources/github/o/r" })).unwrap();
        assert_eq!(bare.starting_branch(), None);
    }

    #[test]
    fn test_source_context_build_is_wire_shaped() {
        let payload = SourceContext::build("sources/github/o/r", "main");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "source": "sources/github/o/r",
                "githubRepoContext": { "startingBranch": "main" }
            })
        );
    }
}
