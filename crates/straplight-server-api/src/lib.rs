// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types shared by the Straplight server and client.

pub mod health;
pub mod search;
pub mod settings;

pub use health::{HealthResponse, HealthStatus};
pub use search::{SearchQuery, SearchResponse};
pub use settings::{SettingsResponse, UpdateSettingsResponse};

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}
