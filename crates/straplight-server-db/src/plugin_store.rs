// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Namespaced key/value store for plugin state.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::SqlitePool;
use tracing::instrument;

use crate::error::Result;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
	async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>>;

	/// Replaces the stored value wholesale.
	async fn set(&self, namespace: &str, key: &str, value: &Value) -> Result<()>;
}

#[derive(Clone)]
pub struct SqlitePluginStore {
	pool: SqlitePool,
}

impl SqlitePluginStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl KeyValueStore for SqlitePluginStore {
	#[instrument(skip(self))]
	async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
		let row: Option<(String,)> =
			sqlx::query_as("SELECT value FROM plugin_store WHERE namespace = ? AND key = ?")
				.bind(namespace)
				.bind(key)
				.fetch_optional(&self.pool)
				.await?;

		row.map(|(raw,)| serde_json::from_str(&raw))
			.transpose()
			.map_err(Into::into)
	}

	#[instrument(skip(self, value))]
	async fn set(&self, namespace: &str, key: &str, value: &Value) -> Result<()> {
		let raw = serde_json::to_string(value)?;

		sqlx::query(
			r#"
			INSERT INTO plugin_store (namespace, key, value, updated_at)
			VALUES (?, ?, ?, ?)
			ON CONFLICT(namespace, key) DO UPDATE SET
				value = excluded.value,
				updated_at = excluded.updated_at
			"#,
		)
		.bind(namespace)
		.bind(key)
		.bind(raw)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(namespace, key, "plugin store value saved");
		Ok(())
	}
}
