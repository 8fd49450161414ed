// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use straplight_server_api::ErrorResponse;
use straplight_server_db::{DbError, RegistryError};
use straplight_server_search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("settings error: {0}")]
	Settings(#[from] SearchError),

	#[error("database error: {0}")]
	Database(#[from] DbError),

	#[error("schema error: {0}")]
	Schema(#[from] RegistryError),

	#[error("invalid import: {0}")]
	InvalidImport(String),
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error) = match &self {
			ServerError::Settings(_) => (StatusCode::INTERNAL_SERVER_ERROR, "settings_error"),
			ServerError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
			ServerError::Schema(_) => (StatusCode::INTERNAL_SERVER_ERROR, "schema_error"),
			ServerError::InvalidImport(_) => (StatusCode::BAD_REQUEST, "invalid_import"),
		};

		tracing::error!(error = %self, "request failed");

		(
			status,
			Json(ErrorResponse {
				error: error.to_string(),
				message: self.to_string(),
			}),
		)
			.into_response()
	}
}
