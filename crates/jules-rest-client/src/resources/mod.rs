// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typed facades over the list/find/mutate endpoints

mod activities;
mod sessions;
mod sources;

pub use activities::Activities;
pub use sessions::Sessions;
pub use sources::Sources;
