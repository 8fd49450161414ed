// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Projection of populated relations into display strings.

use serde_json::Value;

use crate::document::{label_string, Document};
use crate::introspect::main_field;
use crate::registry::ContentRegistry;
use crate::schema::ContentTypeSchema;

/// Resolves a relation field of `entry` to the related entry's main-field
/// value.
///
/// The relation must already be populated. To-many relations use their first
/// element only. Returns `None` for missing values, unpopulated references,
/// unknown targets, targets without a main field, and empty labels.
pub fn resolve_relation_value(
	entry: &Document,
	field: &str,
	schema: &ContentTypeSchema,
	registry: &dyn ContentRegistry,
) -> Option<String> {
	let related = match entry.get(field)? {
		Value::Array(items) => items.first()?,
		value => value,
	};
	let related = related.as_object()?;

	let target_uid = schema.attributes.get(field)?.target.as_deref()?;
	let target = registry.get(target_uid)?;
	let target_main = main_field(&target)?;

	label_string(related.get(target_main))
}
