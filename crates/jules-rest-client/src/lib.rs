// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST client for the Jules coding-session API
//!
//! ```no_run
//! use jules_rest_client::{ClientConfig, RestClient};
//!
//! let client = RestClient::new(ClientConfig::from_env())?;
//! for session in client.sessions().each(Some(20)) {
//!     println!("{}", session?.name);
//! }
//! # Ok::<(), jules_rest_client::RestClientError>(())
//! ```
//!
//! All calls are blocking. Non-2xx responses map to typed
//! [`RestClientError`] variants; nothing is retried.

pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod paths;
pub mod resources;

pub use client::*;
pub use config::*;
pub use error::*;
pub use pagination::*;
pub use resources::*;

pub use jules_api_contract as contract;
