// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read-only content-type registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::is_api_uid;
use crate::schema::ContentTypeSchema;

/// Ordered, read-only view of the host's content-type schemas.
///
/// Enumeration order must be stable for the lifetime of the registry; search
/// results are concatenated in this order.
pub trait ContentRegistry: Send + Sync {
	fn content_types(&self) -> Vec<Arc<ContentTypeSchema>>;

	fn get(&self, uid: &str) -> Option<Arc<ContentTypeSchema>>;

	/// Content types in the application namespace.
	fn application_content_types(&self) -> Vec<Arc<ContentTypeSchema>> {
		self.content_types()
			.into_iter()
			.filter(|schema| is_api_uid(&schema.uid))
			.collect()
	}
}

/// In-memory registry preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
	schemas: Vec<Arc<ContentTypeSchema>>,
	by_uid: HashMap<String, usize>,
}

impl SchemaRegistry {
	/// Builds a registry. A repeated uid replaces the earlier schema at its
	/// original position.
	pub fn new(schemas: impl IntoIterator<Item = ContentTypeSchema>) -> Self {
		let mut registry = Self::default();
		for schema in schemas {
			registry.register(schema);
		}
		registry
	}

	pub fn register(&mut self, schema: ContentTypeSchema) {
		let schema = Arc::new(schema);
		match self.by_uid.get(&schema.uid) {
			Some(&index) => self.schemas[index] = schema,
			None => {
				self.by_uid.insert(schema.uid.clone(), self.schemas.len());
				self.schemas.push(schema);
			}
		}
	}

	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}
}

impl ContentRegistry for SchemaRegistry {
	fn content_types(&self) -> Vec<Arc<ContentTypeSchema>> {
		self.schemas.clone()
	}

	fn get(&self, uid: &str) -> Option<Arc<ContentTypeSchema>> {
		self.by_uid.get(uid).map(|&index| Arc::clone(&self.schemas[index]))
	}
}
