// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fan-out search across content types.
//!
//! Each enabled application content type is queried independently and
//! concurrently. A failure in one type is logged and that type contributes
//! nothing; the search as a whole never fails. Results are concatenated in
//! registry enumeration order regardless of completion order.

use std::sync::Arc;

use futures::future::join_all;
use straplight_core::{
	display_name, display_string, label_string, main_field, relation_fields,
	resolve_relation_value, searchable_fields, AttributeType, ContentRegistry, ContentTypeSchema,
	DisplayField, Document, Filter, FindQuery, PopulateField, SearchResult, StraplightSettings,
	RESULTS_PER_TYPE,
};
use straplight_server_db::DocumentStore;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::settings::SettingsService;

#[derive(Clone)]
pub struct SearchAggregator {
	registry: Arc<dyn ContentRegistry>,
	documents: Arc<dyn DocumentStore>,
	settings: SettingsService,
}

impl SearchAggregator {
	pub fn new(
		registry: Arc<dyn ContentRegistry>,
		documents: Arc<dyn DocumentStore>,
		settings: SettingsService,
	) -> Self {
		Self {
			registry,
			documents,
			settings,
		}
	}

	/// Searches every enabled content type for `query`.
	///
	/// A blank query returns immediately without reading settings or
	/// touching the document store.
	#[instrument(skip(self))]
	pub async fn search(&self, query: &str) -> Vec<SearchResult> {
		let query = query.trim();
		if query.is_empty() {
			return Vec::new();
		}

		let settings = match self.settings.get_settings().await {
			Ok(settings) => settings,
			Err(e) => {
				warn!(error = %e, "failed to load settings, searching with defaults");
				StraplightSettings::default()
			}
		};
		let settings = &settings;

		let content_types: Vec<Arc<ContentTypeSchema>> = self
			.registry
			.application_content_types()
			.into_iter()
			.filter(|schema| settings.is_enabled(&schema.uid))
			.collect();

		let tasks = content_types.iter().map(|schema| async move {
			let display_fields = settings.display_fields(&schema.uid);
			match self.search_content_type(schema, query, display_fields).await {
				Ok(results) => results,
				Err(e) => {
					warn!(uid = %schema.uid, error = %e, "content type search failed, skipping");
					Vec::new()
				}
			}
		});

		let results: Vec<SearchResult> = join_all(tasks).await.into_iter().flatten().collect();

		debug!(
			content_types = content_types.len(),
			results = results.len(),
			"search complete"
		);
		results
	}

	async fn search_content_type(
		&self,
		schema: &ContentTypeSchema,
		query: &str,
		display_fields: &[String],
	) -> Result<Vec<SearchResult>> {
		let searchable = searchable_fields(schema);
		let Some(&first_searchable) = searchable.first() else {
			debug!(uid = %schema.uid, "no searchable fields, skipping");
			return Ok(Vec::new());
		};
		let main = main_field(schema).unwrap_or(first_searchable);

		// The label already shows the main field.
		let display_fields: Vec<&str> = display_fields
			.iter()
			.map(String::as_str)
			.filter(|field| *field != main)
			.collect();

		let find = FindQuery {
			filter: Filter::any_contains_i(searchable.iter().copied(), query),
			populate: self.populate_hints(schema, &display_fields),
			limit: RESULTS_PER_TYPE,
		};

		let entries = self.documents.find_many(&schema.uid, &find).await?;
		let content_type = display_name(schema);

		Ok(entries
			.iter()
			.map(|entry| SearchResult {
				id: entry.id,
				document_id: entry.document_id.clone(),
				label: label_string(entry.get(main))
					.unwrap_or_else(|| format!("#{}", entry.document_id)),
				content_type: content_type.to_string(),
				uid: schema.uid.clone(),
				fields: self.display_values(entry, schema, &display_fields),
			})
			.collect())
	}

	/// Populate only the displayed relation fields, and only with the
	/// related type's main field.
	fn populate_hints(&self, schema: &ContentTypeSchema, display_fields: &[&str]) -> Vec<PopulateField> {
		let relations = relation_fields(schema);

		display_fields
			.iter()
			.filter(|field| relations.contains(*field))
			.filter_map(|field| {
				let target_uid = schema.attributes.get(field)?.target.as_deref()?;
				let target = self.registry.get(target_uid)?;
				let target_main = main_field(&target)?;
				Some(PopulateField {
					field: field.to_string(),
					target: target_uid.to_string(),
					fields: vec![target_main.to_string()],
				})
			})
			.collect()
	}

	fn display_values(
		&self,
		entry: &Document,
		schema: &ContentTypeSchema,
		display_fields: &[&str],
	) -> Vec<DisplayField> {
		display_fields
			.iter()
			.filter_map(|&field| {
				let is_relation = schema
					.attributes
					.get(field)
					.is_some_and(|attr| attr.attr_type == AttributeType::Relation);

				let value = if is_relation {
					resolve_relation_value(entry, field, schema, self.registry.as_ref())
				} else {
					entry.get(field).and_then(display_string)
				};

				Some(DisplayField {
					name: field.to_string(),
					value: value?,
				})
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use serde_json::{json, Map, Value};
	use std::sync::atomic::{AtomicUsize, Ordering};
	use straplight_core::SchemaRegistry;
	use straplight_server_db::testing::create_test_pool;
	use straplight_server_db::{
		DbError, KeyValueStore, SqliteDocumentStore, SqlitePluginStore,
	};

	const ARTICLE: &str = "api::article.article";
	const AUTHOR: &str = "api::author.author";
	const BROKEN: &str = "api::broken.broken";

	/// Wraps a real store, failing queries for one uid and counting calls.
	struct FlakyStore {
		inner: SqliteDocumentStore,
		fail_uid: Option<&'static str>,
		calls: AtomicUsize,
	}

	#[async_trait]
	impl DocumentStore for FlakyStore {
		async fn find_many(
			&self,
			uid: &str,
			query: &FindQuery,
		) -> straplight_server_db::Result<Vec<Document>> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			if self.fail_uid == Some(uid) {
				return Err(DbError::Internal("query exploded".to_string()));
			}
			self.inner.find_many(uid, query).await
		}
	}

	struct BrokenSettingsStore;

	#[async_trait]
	impl KeyValueStore for BrokenSettingsStore {
		async fn get(&self, _: &str, _: &str) -> straplight_server_db::Result<Option<Value>> {
			Err(DbError::Internal("store unavailable".to_string()))
		}

		async fn set(&self, _: &str, _: &str, _: &Value) -> straplight_server_db::Result<()> {
			Err(DbError::Internal("store unavailable".to_string()))
		}
	}

	struct Fixture {
		aggregator: SearchAggregator,
		settings: SettingsService,
		store: Arc<FlakyStore>,
	}

	fn registry() -> SchemaRegistry {
		SchemaRegistry::new([
			ContentTypeSchema::new(ARTICLE)
				.with_display_name("Article")
				.with_attribute("title", AttributeType::String)
				.with_attribute("slug", AttributeType::Uid)
				.with_attribute("views", AttributeType::Other)
				.with_relation("author", AUTHOR)
				.with_relation("createdBy", "admin::user"),
			ContentTypeSchema::new(AUTHOR)
				.with_display_name("Author")
				.with_attribute("name", AttributeType::String)
				.with_attribute("bio", AttributeType::Text),
			ContentTypeSchema::new(BROKEN)
				.with_display_name("Broken")
				.with_attribute("title", AttributeType::String),
			ContentTypeSchema::new("api::metric.metric")
				.with_attribute("count", AttributeType::Other),
			ContentTypeSchema::new("plugin::users-permissions.user")
				.with_attribute("username", AttributeType::String),
		])
	}

	fn object(value: Value) -> Map<String, Value> {
		match value {
			Value::Object(map) => map,
			_ => panic!("expected object"),
		}
	}

	async fn fixture(fail_uid: Option<&'static str>) -> Fixture {
		let pool = create_test_pool().await.unwrap();
		let documents = SqliteDocumentStore::new(pool.clone());

		documents
			.upsert(AUTHOR, Some("p1"), &object(json!({"name": "Ada Lovelace", "bio": "Wrote hello notes"})))
			.await
			.unwrap();
		documents
			.upsert(
				ARTICLE,
				Some("a1"),
				&object(json!({"title": "Hello World", "slug": "hello-world", "views": 12, "author": "p1", "createdBy": "u1"})),
			)
			.await
			.unwrap();
		documents
			.upsert(ARTICLE, Some("a2"), &object(json!({"title": "", "slug": "say-hello"})))
			.await
			.unwrap();
		documents
			.upsert(ARTICLE, Some("a3"), &object(json!({"title": "Unrelated", "slug": "nope"})))
			.await
			.unwrap();
		documents
			.upsert(BROKEN, Some("b1"), &object(json!({"title": "hello from broken"})))
			.await
			.unwrap();
		documents
			.upsert(
				"plugin::users-permissions.user",
				Some("u1"),
				&object(json!({"username": "hello-admin"})),
			)
			.await
			.unwrap();

		let registry: Arc<dyn ContentRegistry> = Arc::new(registry());
		let settings = SettingsService::new(Arc::new(SqlitePluginStore::new(pool)), Arc::clone(&registry));
		let store = Arc::new(FlakyStore {
			inner: documents,
			fail_uid,
			calls: AtomicUsize::new(0),
		});
		let aggregator = SearchAggregator::new(registry, store.clone(), settings.clone());

		Fixture {
			aggregator,
			settings,
			store,
		}
	}

	#[tokio::test]
	async fn test_blank_query_short_circuits() {
		let fx = fixture(None).await;
		assert!(fx.aggregator.search("").await.is_empty());
		assert!(fx.aggregator.search("   ").await.is_empty());
		assert_eq!(fx.store.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_article_enabled_author_disabled() {
		let fx = fixture(None).await;
		fx.settings
			.set_settings(&json!({
				"contentTypes": {
					AUTHOR: {"enabled": false},
					BROKEN: {"enabled": false}
				}
			}))
			.await
			.unwrap();

		let results = fx.aggregator.search("hello world").await;
		assert_eq!(
			results,
			vec![SearchResult {
				id: 2,
				document_id: "a1".to_string(),
				label: "Hello World".to_string(),
				content_type: "Article".to_string(),
				uid: ARTICLE.to_string(),
				fields: vec![],
			}]
		);
	}

	#[tokio::test]
	async fn test_results_concatenate_in_registry_order() {
		let fx = fixture(None).await;
		let results = fx.aggregator.search("HELLO").await;
		let hits: Vec<(&str, &str)> = results
			.iter()
			.map(|r| (r.uid.as_str(), r.document_id.as_str()))
			.collect();
		assert_eq!(
			hits,
			vec![(ARTICLE, "a1"), (ARTICLE, "a2"), (AUTHOR, "p1"), (BROKEN, "b1")]
		);
	}

	#[tokio::test]
	async fn test_empty_main_field_uses_document_id_label() {
		let fx = fixture(None).await;
		let results = fx.aggregator.search("say-hello").await;
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].label, "#a2");
	}

	#[tokio::test]
	async fn test_failing_type_is_isolated() {
		let fx = fixture(Some(BROKEN)).await;
		let results = fx.aggregator.search("hello").await;
		assert!(results.iter().all(|r| r.uid != BROKEN));
		assert!(results.iter().any(|r| r.uid == ARTICLE));
		assert!(results.iter().any(|r| r.uid == AUTHOR));
	}

	#[tokio::test]
	async fn test_types_without_searchable_fields_are_not_queried() {
		let fx = fixture(None).await;
		fx.aggregator.search("hello").await;
		// article, author, broken; metric has no string fields and the
		// plugin type is outside the application namespace.
		assert_eq!(fx.store.calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn test_display_fields_resolve_relations_and_scalars() {
		let fx = fixture(None).await;
		fx.settings
			.set_settings(&json!({
				"contentTypes": {
					ARTICLE: {"displayFields": ["author", "views"]},
					AUTHOR: {"displayFields": ["name", "bio"]}
				}
			}))
			.await
			.unwrap();

		let results = fx.aggregator.search("hello").await;

		let article = results.iter().find(|r| r.document_id == "a1").unwrap();
		assert_eq!(
			article.fields,
			vec![
				DisplayField {
					name: "author".to_string(),
					value: "Ada Lovelace".to_string()
				},
				DisplayField {
					name: "views".to_string(),
					value: "12".to_string()
				},
			]
		);

		// No author and no views on a2: both dropped.
		let untitled = results.iter().find(|r| r.document_id == "a2").unwrap();
		assert!(untitled.fields.is_empty());

		// The main field is never repeated as a display field.
		let author = results.iter().find(|r| r.document_id == "p1").unwrap();
		assert_eq!(author.label, "Ada Lovelace");
		assert_eq!(
			author.fields,
			vec![DisplayField {
				name: "bio".to_string(),
				value: "Wrote hello notes".to_string()
			}]
		);
	}

	#[tokio::test]
	async fn test_relation_outside_application_namespace_is_dropped() {
		let fx = fixture(None).await;
		fx.settings
			.set_settings(&json!({
				"contentTypes": {ARTICLE: {"displayFields": ["createdBy"]}}
			}))
			.await
			.unwrap();

		let results = fx.aggregator.search("hello world").await;
		let article = results.iter().find(|r| r.document_id == "a1").unwrap();
		assert!(article.fields.is_empty());
	}

	#[tokio::test]
	async fn test_settings_failure_falls_back_to_defaults() {
		let pool = create_test_pool().await.unwrap();
		let documents = SqliteDocumentStore::new(pool);
		documents
			.upsert(ARTICLE, Some("a1"), &object(json!({"title": "Hello"})))
			.await
			.unwrap();

		let registry: Arc<dyn ContentRegistry> = Arc::new(registry());
		let settings = SettingsService::new(Arc::new(BrokenSettingsStore), Arc::clone(&registry));
		let aggregator = SearchAggregator::new(registry, Arc::new(documents), settings);

		let results = aggregator.search("hello").await;
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].label, "Hello");
	}

	#[tokio::test]
	async fn test_per_type_cap() {
		let fx = fixture(None).await;
		let documents = &fx.store.inner;
		for i in 0..8 {
			let document_id = format!("bulk{i}");
			documents
				.upsert(AUTHOR, Some(document_id.as_str()), &object(json!({"name": format!("Bulk {i}")})))
				.await
				.unwrap();
		}

		let results = fx.aggregator.search("bulk").await;
		assert_eq!(results.len(), RESULTS_PER_TYPE as usize);
	}
}
