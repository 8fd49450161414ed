// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Straplight client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// The server answered with a non-success status.
	#[error("Straplight API error: {status} - {message}")]
	Api { status: u16, message: String },

	/// Invalid or unparseable response body.
	#[error("Invalid response from Straplight: {0}")]
	InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
