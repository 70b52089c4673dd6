// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Resource name normalization

/// Resource name with exactly one leading slash.
pub fn resource_path(name: &str) -> String {
    format!("/{}", name.trim_start_matches('/'))
}

/// Canonical `/sessions/{id}` path for a bare id or a full session name.
pub fn session_path(name_or_id: &str) -> String {
    if name_or_id.starts_with('/') {
        name_or_id.to_string()
    } else if name_or_id.starts_with("sessions/") {
        format!("/{name_or_id}")
    } else {
        format!("/sessions/{name_or_id}")
    }
}
