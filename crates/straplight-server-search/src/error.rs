// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use straplight_server_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
	#[error("storage error: {0}")]
	Storage(#[from] DbError),

	#[error("stored settings are malformed: {0}")]
	MalformedSettings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
