// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Jules REST API contract types
//!
//! This crate defines the resource models returned by the Jules API and the
//! request payloads sent to it. Models are parsed from the camelCase wire
//! format and are read-only once built. Their `Serialize` implementation is
//! the plain-data projection (snake_case keys) used for JSON output, see
//! [`PlainData::to_plain`].

pub mod activity;
pub mod artifact;
pub mod plan;
pub mod requests;
pub mod session;
pub mod source;

pub use activity::*;
pub use artifact::*;
pub use plan::*;
pub use requests::*;
pub use session::*;
pub use source::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Plain-data projection of a model
pub trait PlainData: Serialize {
    /// Render the model as a snake_case JSON value
    fn to_plain(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a union payload, degrading to the default shape when it is not an object.
pub(crate) fn decode_payload<T>(value: serde_json::Value) -> T
where
    T: Default + serde::de::DeserializeOwned,
{
    serde_json::from_value(value).unwrap_or_default()
}

pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<chrono::DateTime<chrono::Utc>> {
    value
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&chrono::Utc))
}
