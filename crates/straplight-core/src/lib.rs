// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Straplight quick-open search.
//!
//! This crate is pure: no I/O, no async. It provides:
//!
//! - `schema` - Content-type schema model with ordered attributes
//! - `introspect` - Searchable/main/relation field inference
//! - `settings` - Persisted settings model and normalization of untrusted input
//! - `relation` - Projection of populated relations into display labels
//! - `query` - Filter and populate model passed to document stores
//! - `registry` - Read-only content-type registry abstraction
//! - `document` - Entry records and search results

pub mod document;
pub mod introspect;
pub mod query;
pub mod registry;
pub mod relation;
pub mod schema;
pub mod settings;

pub use document::{display_string, label_string, DisplayField, Document, SearchResult};
pub use introspect::{
	content_type_info, display_name, main_field, relation_fields, searchable_fields,
	MAIN_FIELD_CANDIDATES, STRING_FIELD_TYPES,
};
pub use query::{Filter, FindQuery, PopulateField};
pub use registry::{ContentRegistry, SchemaRegistry};
pub use relation::resolve_relation_value;
pub use schema::{
	AttributeDescriptor, AttributeType, Attributes, ContentManagerOptions, ContentTypeInfo,
	ContentTypeSchema, FieldDescriptor, PluginOptions, SchemaInfo,
};
pub use settings::{normalize_settings, ContentTypeSettings, StraplightSettings};

/// Namespace prefix of user-defined (application) content types.
pub const API_NAMESPACE: &str = "api::";

/// Maximum entries fetched per content type in a single search.
pub const RESULTS_PER_TYPE: u32 = 5;

/// Maximum display fields configurable per content type.
pub const MAX_DISPLAY_FIELDS: usize = 2;

/// Returns true if the uid belongs to the application content-type namespace.
pub fn is_api_uid(uid: &str) -> bool {
	uid.starts_with(API_NAMESPACE)
}
