// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Field inference over content-type schemas.

use crate::is_api_uid;
use crate::schema::{AttributeType, ContentTypeInfo, ContentTypeSchema, FieldDescriptor};

/// Attribute types a substring search runs against.
pub const STRING_FIELD_TYPES: [AttributeType; 5] = [
	AttributeType::String,
	AttributeType::Text,
	AttributeType::Email,
	AttributeType::Uid,
	AttributeType::Richtext,
];

/// Well-known label fields, highest priority first.
pub const MAIN_FIELD_CANDIDATES: [&str; 6] = ["title", "name", "slug", "email", "subject", "label"];

/// All string-like attributes in declaration order.
pub fn searchable_fields(schema: &ContentTypeSchema) -> Vec<&str> {
	schema
		.attributes
		.iter()
		.filter(|(_, attr)| attr.attr_type.is_string_like())
		.map(|(name, _)| name)
		.collect()
}

/// The field whose value labels an entry.
///
/// Resolution order:
/// 1. content-manager `mainField` hint, if it names a declared attribute
/// 2. first declared attribute from [`MAIN_FIELD_CANDIDATES`]
/// 3. first string-like attribute
pub fn main_field(schema: &ContentTypeSchema) -> Option<&str> {
	if let Some(hint) = schema.main_field_hint() {
		if let Some((name, _)) = schema.attributes.iter().find(|(name, _)| *name == hint) {
			return Some(name);
		}
	}

	for candidate in MAIN_FIELD_CANDIDATES {
		if let Some((name, _)) = schema.attributes.iter().find(|(name, _)| *name == candidate) {
			return Some(name);
		}
	}

	searchable_fields(schema).into_iter().next()
}

/// Relation attributes that point at other application content types.
pub fn relation_fields(schema: &ContentTypeSchema) -> Vec<&str> {
	schema
		.attributes
		.iter()
		.filter(|(_, attr)| {
			attr.attr_type == AttributeType::Relation
				&& attr.target.as_deref().is_some_and(is_api_uid)
		})
		.map(|(name, _)| name)
		.collect()
}

/// Human-readable name: display name, else singular name, else the uid.
pub fn display_name(schema: &ContentTypeSchema) -> &str {
	[&schema.info.display_name, &schema.info.singular_name]
		.into_iter()
		.flatten()
		.map(String::as_str)
		.find(|s| !s.is_empty())
		.unwrap_or(schema.uid.as_str())
}

pub fn content_type_info(schema: &ContentTypeSchema) -> ContentTypeInfo {
	let fields = schema
		.attributes
		.iter()
		.filter(|(_, attr)| attr.attr_type.is_string_like())
		.map(|(name, attr)| FieldDescriptor {
			name: name.to_string(),
			field_type: attr.attr_type,
		})
		.collect();

	ContentTypeInfo {
		uid: schema.uid.clone(),
		display_name: display_name(schema).to_string(),
		fields,
		main_field: main_field(schema).unwrap_or_default().to_string(),
	}
}
