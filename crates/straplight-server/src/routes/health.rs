// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use straplight_server_api::{HealthResponse, HealthStatus};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let (database, content_types) = tokio::join!(
		async {
			match straplight_server_db::check_connection(&state.pool).await {
				Ok(()) => HealthStatus::Healthy,
				Err(e) => {
					tracing::warn!(error = %e, "database health check failed");
					HealthStatus::Unhealthy
				}
			}
		},
		async { state.registry.application_content_types().len() },
	);

	let status = database;
	let code = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(
		code,
		Json(HealthResponse {
			status,
			database,
			content_types,
		}),
	)
}
