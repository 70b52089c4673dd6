// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Plain text and JSON output helpers

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use jules_api_contract::{PlainData, SessionState};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width plain text
    #[default]
    Table,
    /// Pretty-printed plain-data projection
    Json,
}

pub fn write_json(out: &mut impl Write, value: &Value) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn write_plain<T: PlainData>(out: &mut impl Write, item: &T) -> Result<()> {
    write_json(out, &item.to_plain())
}

pub fn write_plain_list<T: PlainData>(out: &mut impl Write, items: &[T]) -> Result<()> {
    let values = items.iter().map(PlainData::to_plain).collect();
    write_json(out, &Value::Array(values))
}

/// Write one table row, trimming the padding of the last column.
pub fn write_row(out: &mut impl Write, row: String) -> Result<()> {
    writeln!(out, "{}", row.trim_end())?;
    Ok(())
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// A session without a state is reported as completed.
pub fn display_state(state: Option<&SessionState>) -> &str {
    state.map_or("COMPLETED", SessionState::as_str)
}
