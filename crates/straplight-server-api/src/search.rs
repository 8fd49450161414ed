// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use straplight_core::SearchResult;

/// Query string of `GET /search`. A missing `q` is treated as blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
	#[serde(default)]
	pub q: String,
}

impl SearchQuery {
	/// Builds the query from raw query-string pairs. `q` is used only when it
	/// appears exactly once; a repeated `q` is treated as blank.
	pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Self
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut values = pairs
			.iter()
			.filter(|(key, _)| key.as_ref() == "q")
			.map(|(_, value)| value.as_ref());

		let q = match (values.next(), values.next()) {
			(Some(value), None) => value.to_string(),
			_ => String::new(),
		};
		Self { q }
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResult>,
}
