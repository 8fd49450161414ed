// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Quick-open search endpoint.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use straplight_server_api::{SearchQuery, SearchResponse};

use crate::api::AppState;

/// `GET /search?q=`. A blank, missing or repeated `q` answers with no
/// results.
pub async fn search(
	State(state): State<AppState>,
	Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
	let query = SearchQuery::from_pairs(&params);
	let term = query.q.trim();
	if term.is_empty() {
		return Json(SearchResponse::default());
	}

	let results = state.search.search(term).await;
	tracing::debug!(query_len = term.len(), results = results.len(), "search complete");

	Json(SearchResponse { results })
}
