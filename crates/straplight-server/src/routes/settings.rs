// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use straplight_server_api::{SettingsResponse, UpdateSettingsResponse};

use crate::api::AppState;
use crate::error::ServerError;

/// `GET /settings`: stored settings plus the content types they can refer to.
pub async fn get_settings(
	State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, ServerError> {
	let settings = state.settings.get_settings().await?;
	let content_types = state.settings.get_content_types();

	Ok(Json(SettingsResponse {
		settings,
		content_types,
	}))
}

/// `PUT /settings`: the body is normalized, never rejected for its shape.
pub async fn update_settings(
	State(state): State<AppState>,
	Json(body): Json<Value>,
) -> Result<Json<UpdateSettingsResponse>, ServerError> {
	let settings = state.settings.set_settings(&body).await?;
	Ok(Json(UpdateSettingsResponse { settings }))
}
