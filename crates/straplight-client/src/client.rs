// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Straplight HTTP API client implementation.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use straplight_core::{SearchResult, StraplightSettings};
use straplight_server_api::{ErrorResponse, SearchResponse, SettingsResponse, UpdateSettingsResponse};
use tracing::{debug, instrument, warn};

use crate::error::{ClientError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a running Straplight server.
#[derive(Debug, Clone)]
pub struct StraplightClient {
	http_client: Client,
	base_url: String,
}

impl StraplightClient {
	/// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:1337`.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
		Ok(Self::with_http_client(http_client, base_url))
	}

	pub fn with_http_client(http_client: Client, base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self {
			http_client,
			base_url,
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// `GET /search?q=`.
	#[instrument(skip(self))]
	pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
		let response = self
			.http_client
			.get(format!("{}/search", self.base_url))
			.query(&[("q", query)])
			.send()
			.await?;

		let body: SearchResponse = parse_response(response).await?;
		debug!(results = body.results.len(), "search response received");
		Ok(body.results)
	}

	/// `GET /settings`.
	#[instrument(skip(self))]
	pub async fn get_settings(&self) -> Result<SettingsResponse> {
		let response = self
			.http_client
			.get(format!("{}/settings", self.base_url))
			.send()
			.await?;

		parse_response(response).await
	}

	/// `PUT /settings`, returning the normalized settings the server stored.
	#[instrument(skip(self, candidate))]
	pub async fn update_settings(&self, candidate: &Value) -> Result<StraplightSettings> {
		let response = self
			.http_client
			.put(format!("{}/settings", self.base_url))
			.json(candidate)
			.send()
			.await?;

		let body: UpdateSettingsResponse = parse_response(response).await?;
		Ok(body.settings)
	}

	/// Current settings, or the defaults when they cannot be fetched.
	pub async fn settings_or_default(&self) -> StraplightSettings {
		match self.get_settings().await {
			Ok(response) => response.settings,
			Err(e) => {
				warn!(error = %e, "failed to fetch settings, using defaults");
				StraplightSettings::default()
			}
		}
	}
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
	let status = response.status();
	let body = response.text().await?;

	if !status.is_success() {
		let message = serde_json::from_str::<ErrorResponse>(&body)
			.map(|e| e.message)
			.unwrap_or(body);
		return Err(ClientError::Api {
			status: status.as_u16(),
			message,
		});
	}

	serde_json::from_str(&body)
		.map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))
}
