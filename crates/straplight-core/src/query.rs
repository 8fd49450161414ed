// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Query model handed to document stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter expression over entry attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
	Or(Vec<Filter>),
	/// Case-insensitive substring containment.
	ContainsI { field: String, value: String },
}

impl Filter {
	/// OR of case-insensitive containment of `needle` across `fields`.
	pub fn any_contains_i<'a>(fields: impl IntoIterator<Item = &'a str>, needle: &str) -> Self {
		Filter::Or(
			fields
				.into_iter()
				.map(|field| Filter::ContainsI {
					field: field.to_string(),
					value: needle.to_string(),
				})
				.collect(),
		)
	}

	/// Evaluates the filter against an entry's attributes. Only string values
	/// can match a containment predicate; an empty `Or` matches nothing.
	pub fn matches(&self, attributes: &Map<String, Value>) -> bool {
		match self {
			Filter::Or(filters) => filters.iter().any(|f| f.matches(attributes)),
			Filter::ContainsI { field, value } => match attributes.get(field) {
				Some(Value::String(s)) => s.to_lowercase().contains(&value.to_lowercase()),
				_ => false,
			},
		}
	}
}

/// Request that a relation field be populated with the given target fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateField {
	pub field: String,
	pub target: String,
	pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindQuery {
	pub filter: Filter,
	#[serde(default)]
	pub populate: Vec<PopulateField>,
	pub limit: u32,
}
