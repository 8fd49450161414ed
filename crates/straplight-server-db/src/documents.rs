// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entry storage and querying.
//!
//! Entries are stored as a JSON object per row. Relation attributes hold the
//! related `documentId` (or an array of them) and are expanded only when a
//! query asks for them to be populated.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::{sqlite::SqlitePool, FromRow};
use straplight_core::{Document, FindQuery, PopulateField};
use tracing::instrument;

use crate::error::{DbError, Result};

#[async_trait]
pub trait DocumentStore: Send + Sync {
	/// Entries of `uid` matching the query, in insertion order.
	async fn find_many(&self, uid: &str, query: &FindQuery) -> Result<Vec<Document>>;
}

#[derive(Debug, FromRow)]
struct DocumentRow {
	id: i64,
	document_id: String,
	data: String,
}

impl TryFrom<DocumentRow> for Document {
	type Error = DbError;

	fn try_from(row: DocumentRow) -> Result<Self> {
		match serde_json::from_str(&row.data)? {
			Value::Object(attributes) => Ok(Document {
				id: row.id,
				document_id: row.document_id,
				attributes,
			}),
			_ => Err(DbError::InvalidData(format!(
				"document {} data is not an object",
				row.document_id
			))),
		}
	}
}

#[derive(Clone)]
pub struct SqliteDocumentStore {
	pool: SqlitePool,
}

impl SqliteDocumentStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Inserts or replaces an entry keyed by `(uid, document_id)`. A fresh id is
	/// generated when none is given.
	#[instrument(skip(self, attributes))]
	pub async fn upsert(
		&self,
		uid: &str,
		document_id: Option<&str>,
		attributes: &Map<String, Value>,
	) -> Result<Document> {
		let document_id = document_id
			.map(str::to_owned)
			.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
		let data = serde_json::to_string(attributes)?;

		let (id,): (i64,) = sqlx::query_as(
			r#"
			INSERT INTO documents (document_id, content_type, data, created_at)
			VALUES (?, ?, ?, ?)
			ON CONFLICT(content_type, document_id) DO UPDATE SET
				data = excluded.data
			RETURNING id
			"#,
		)
		.bind(&document_id)
		.bind(uid)
		.bind(data)
		.bind(Utc::now().to_rfc3339())
		.fetch_one(&self.pool)
		.await?;

		tracing::debug!(id, %document_id, "document stored");
		Ok(Document {
			id,
			document_id,
			attributes: attributes.clone(),
		})
	}

	/// Imports raw entries for one content type. Each entry must be an
	/// object; `documentId` is taken from it when present and `id` is
	/// ignored.
	#[instrument(skip(self, entries), fields(count = entries.len()))]
	pub async fn import(&self, uid: &str, entries: &[Value]) -> Result<usize> {
		for (index, entry) in entries.iter().enumerate() {
			let Value::Object(object) = entry else {
				return Err(DbError::InvalidData(format!(
					"{uid} entry {index} is not an object"
				)));
			};

			let mut attributes = object.clone();
			attributes.remove("id");
			let document_id = match attributes.remove("documentId") {
				Some(Value::String(id)) if !id.is_empty() => Some(id),
				_ => None,
			};

			self.upsert(uid, document_id.as_deref(), &attributes).await?;
		}

		tracing::info!(uid, count = entries.len(), "imported documents");
		Ok(entries.len())
	}

	#[instrument(skip(self))]
	pub async fn count(&self, uid: &str) -> Result<i64> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents WHERE content_type = ?")
			.bind(uid)
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}

	async fn find_by_document_id(&self, uid: &str, document_id: &str) -> Result<Option<Document>> {
		let row: Option<DocumentRow> = sqlx::query_as(
			"SELECT id, document_id, data FROM documents WHERE content_type = ? AND document_id = ?",
		)
		.bind(uid)
		.bind(document_id)
		.fetch_optional(&self.pool)
		.await?;

		row.map(Document::try_from).transpose()
	}

	/// Replaces relation references with projections of the related
	/// entries. Dangling to-one references become null; dangling to-many
	/// references are dropped.
	async fn populate(&self, document: &mut Document, populate: &PopulateField) -> Result<()> {
		let Some(reference) = document.attributes.get(&populate.field) else {
			return Ok(());
		};

		let populated = match reference {
			Value::String(related_id) => self
				.project(populate, related_id)
				.await?
				.unwrap_or(Value::Null),
			Value::Array(items) => {
				let mut projected = Vec::with_capacity(items.len());
				for item in items {
					if let Value::String(related_id) = item {
						if let Some(value) = self.project(populate, related_id).await? {
							projected.push(value);
						}
					}
				}
				Value::Array(projected)
			}
			_ => return Ok(()),
		};

		document
			.attributes
			.insert(populate.field.clone(), populated);
		Ok(())
	}

	async fn project(&self, populate: &PopulateField, related_id: &str) -> Result<Option<Value>> {
		let Some(related) = self.find_by_document_id(&populate.target, related_id).await? else {
			return Ok(None);
		};

		let mut projection = Map::new();
		projection.insert("id".to_string(), Value::from(related.id));
		projection.insert(
			"documentId".to_string(),
			Value::String(related.document_id.clone()),
		);
		for field in &populate.fields {
			if let Some(value) = related.get(field) {
				projection.insert(field.clone(), value.clone());
			}
		}
		Ok(Some(Value::Object(projection)))
	}
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
	#[instrument(skip(self, query), fields(limit = query.limit))]
	async fn find_many(&self, uid: &str, query: &FindQuery) -> Result<Vec<Document>> {
		let rows: Vec<DocumentRow> = sqlx::query_as(
			"SELECT id, document_id, data FROM documents WHERE content_type = ? ORDER BY id",
		)
		.bind(uid)
		.fetch_all(&self.pool)
		.await?;

		let limit = query.limit as usize;
		let mut documents = Vec::new();
		for row in rows {
			if documents.len() >= limit {
				break;
			}
			let document = Document::try_from(row)?;
			if query.filter.matches(&document.attributes) {
				documents.push(document);
			}
		}

		for document in &mut documents {
			for populate in &query.populate {
				self.populate(document, populate).await?;
			}
		}

		tracing::debug!(count = documents.len(), "documents found");
		Ok(documents)
	}
}
