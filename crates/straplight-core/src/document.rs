// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entry records and search results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An entry record as returned by a document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	pub id: i64,
	pub document_id: String,
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl Document {
	pub fn new(id: i64, document_id: impl Into<String>) -> Self {
		Self {
			id,
			document_id: document_id.into(),
			attributes: Map::new(),
		}
	}

	pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
		self.attributes.insert(field.into(), value);
		self
	}

	pub fn get(&self, field: &str) -> Option<&Value> {
		self.attributes.get(field)
	}
}

/// A secondary `name: value` pair shown under a result's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
	pub name: String,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
	pub id: i64,
	pub document_id: String,
	pub label: String,
	/// Display name of the content type.
	pub content_type: String,
	pub uid: String,
	pub fields: Vec<DisplayField>,
}

/// String form of a scalar display value. Null drops the field; strings pass
/// through unchanged; compound values render as compact JSON.
pub fn display_string(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Number(n) => Some(n.to_string()),
		Value::Array(_) | Value::Object(_) => Some(value.to_string()),
	}
}

/// String form of a label value. Unlike [`display_string`], falsy values
/// (null, `""`, `0`, `false`) count as missing so the caller can synthesize
/// a fallback label.
pub fn label_string(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::Bool(false) => None,
		Value::Number(n) if n.as_f64() == Some(0.0) => None,
		value => display_string(value).filter(|s| !s.is_empty()),
	}
}
