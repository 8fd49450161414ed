// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted plugin settings.

use std::sync::Arc;

use serde_json::Value;
use straplight_core::{
	content_type_info, normalize_settings, ContentRegistry, ContentTypeInfo, StraplightSettings,
};
use straplight_server_db::KeyValueStore;
use tracing::instrument;

use crate::error::Result;

pub const STORE_NAMESPACE: &str = "plugin::straplight";
pub const SETTINGS_KEY: &str = "settings";

#[derive(Clone)]
pub struct SettingsService {
	store: Arc<dyn KeyValueStore>,
	registry: Arc<dyn ContentRegistry>,
}

impl SettingsService {
	pub fn new(store: Arc<dyn KeyValueStore>, registry: Arc<dyn ContentRegistry>) -> Self {
		Self { store, registry }
	}

	/// Current settings. Nothing is written when the key is absent; defaults
	/// are returned until the first save.
	#[instrument(skip(self))]
	pub async fn get_settings(&self) -> Result<StraplightSettings> {
		match self.store.get(STORE_NAMESPACE, SETTINGS_KEY).await? {
			Some(value) => Ok(serde_json::from_value(value)?),
			None => {
				tracing::debug!("no stored settings, using defaults");
				Ok(StraplightSettings::default())
			}
		}
	}

	/// Normalizes and persists `candidate`, replacing any stored settings.
	/// Malformed input is coerced, never rejected.
	#[instrument(skip(self, candidate))]
	pub async fn set_settings(&self, candidate: &Value) -> Result<StraplightSettings> {
		let settings = normalize_settings(candidate);
		let value = serde_json::to_value(&settings)?;
		self.store.set(STORE_NAMESPACE, SETTINGS_KEY, &value).await?;

		tracing::info!(
			debounce_ms = settings.debounce_ms,
			min_query_length = settings.min_query_length,
			content_types = settings.content_types.len(),
			"settings saved"
		);
		Ok(settings)
	}

	/// Every application content type, in registry order.
	pub fn get_content_types(&self) -> Vec<ContentTypeInfo> {
		self.registry
			.application_content_types()
			.iter()
			.map(|schema| content_type_info(schema))
			.collect()
	}
}
