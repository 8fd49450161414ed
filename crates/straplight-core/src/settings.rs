// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted settings and normalization of untrusted settings input.
//!
//! Settings are never rejected. Every candidate, however malformed, is
//! coerced into a valid [`StraplightSettings`] by [`normalize_settings`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{is_api_uid, MAX_DISPLAY_FIELDS};

pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_MIN_QUERY_LENGTH: u64 = 1;

const MIN_DEBOUNCE_MS: u64 = 0;
const MIN_QUERY_LENGTH_FLOOR: u64 = 1;

/// Per-content-type search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSettings {
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	#[serde(default)]
	pub display_fields: Vec<String>,
}

impl Default for ContentTypeSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			display_fields: Vec::new(),
		}
	}
}

fn default_enabled() -> bool {
	true
}

fn default_debounce_ms() -> u64 {
	DEFAULT_DEBOUNCE_MS
}

fn default_min_query_length() -> u64 {
	DEFAULT_MIN_QUERY_LENGTH
}

/// The settings aggregate stored under the `settings` key.
///
/// Missing top-level keys deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StraplightSettings {
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	#[serde(default = "default_min_query_length")]
	pub min_query_length: u64,
	#[serde(default)]
	pub content_types: BTreeMap<String, ContentTypeSettings>,
}

impl Default for StraplightSettings {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
			min_query_length: DEFAULT_MIN_QUERY_LENGTH,
			content_types: BTreeMap::new(),
		}
	}
}

impl StraplightSettings {
	/// Content types are searchable unless explicitly disabled.
	pub fn is_enabled(&self, uid: &str) -> bool {
		self.content_types.get(uid).map_or(true, |ct| ct.enabled)
	}

	pub fn display_fields(&self, uid: &str) -> &[String] {
		self.content_types
			.get(uid)
			.map(|ct| ct.display_fields.as_slice())
			.unwrap_or_default()
	}
}

/// Validate and normalize a candidate settings value.
pub fn normalize_settings(candidate: &Value) -> StraplightSettings {
	StraplightSettings {
		debounce_ms: normalize_count(
			candidate.get("debounceMs"),
			DEFAULT_DEBOUNCE_MS,
			MIN_DEBOUNCE_MS,
		),
		min_query_length: normalize_count(
			candidate.get("minQueryLength"),
			DEFAULT_MIN_QUERY_LENGTH,
			MIN_QUERY_LENGTH_FLOOR,
		),
		content_types: candidate
			.get("contentTypes")
			.and_then(Value::as_object)
			.map(normalize_content_types)
			.unwrap_or_default(),
	}
}

/// Zero, NaN and non-finite inputs take the default; anything else is
/// rounded half-up and clamped to `floor`.
fn normalize_count(value: Option<&Value>, default: u64, floor: u64) -> u64 {
	let n = value.map_or(f64::NAN, coerce_number);
	if n == 0.0 || !n.is_finite() {
		return default;
	}
	// `as` saturates at u64::MAX.
	round_half_up(n).max(floor as f64) as u64
}

/// Ties round toward positive infinity, matching `Math.round`.
fn round_half_up(n: f64) -> f64 {
	let floor = n.floor();
	if n - floor >= 0.5 {
		floor + 1.0
	} else {
		floor
	}
}

/// Numeric coercion with the loose rules admin clients rely on: numeric
/// strings parse, blank strings and null are zero, booleans are 0/1.
fn coerce_number(value: &Value) -> f64 {
	match value {
		Value::Null => 0.0,
		Value::Bool(b) => f64::from(u8::from(*b)),
		Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
		Value::String(s) => {
			let trimmed = s.trim();
			if trimmed.is_empty() {
				0.0
			} else {
				trimmed.parse().unwrap_or(f64::NAN)
			}
		}
		Value::Array(items) => match items.as_slice() {
			[] => 0.0,
			[single @ (Value::Null | Value::Number(_) | Value::String(_))] => coerce_number(single),
			_ => f64::NAN,
		},
		Value::Object(_) => f64::NAN,
	}
}

fn normalize_content_types(input: &Map<String, Value>) -> BTreeMap<String, ContentTypeSettings> {
	input
		.iter()
		.filter(|(uid, _)| is_api_uid(uid))
		.map(|(uid, entry)| (uid.clone(), normalize_content_type(entry)))
		.collect()
}

fn normalize_content_type(entry: &Value) -> ContentTypeSettings {
	let enabled = !matches!(entry.get("enabled"), Some(Value::Bool(false)));

	let display_fields = match entry.get("displayFields") {
		Some(Value::Array(items)) => items
			.iter()
			.take(MAX_DISPLAY_FIELDS)
			.filter_map(|item| item.as_str().map(str::to_owned))
			.collect(),
		_ => Vec::new(),
	};

	ContentTypeSettings {
		enabled,
		display_fields,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn test_defaults() {
		let settings = StraplightSettings::default();
		assert_eq!(settings.debounce_ms, 200);
		assert_eq!(settings.min_query_length, 1);
		assert!(settings.content_types.is_empty());
	}

	#[test]
	fn test_deserialize_fills_missing_top_level_keys() {
		let settings: StraplightSettings =
			serde_json::from_value(json!({"minQueryLength": 3})).unwrap();
		assert_eq!(settings.debounce_ms, 200);
		assert_eq!(settings.min_query_length, 3);
		assert!(settings.content_types.is_empty());
	}

	#[test]
	fn test_floors_applied_not_rejected() {
		let settings = normalize_settings(&json!({"debounceMs": -5, "minQueryLength": 0}));
		assert_eq!(settings.debounce_ms, 0);
		assert_eq!(settings.min_query_length, 1);
	}

	#[test]
	fn test_zero_debounce_takes_default() {
		let settings = normalize_settings(&json!({"debounceMs": 0}));
		assert_eq!(settings.debounce_ms, DEFAULT_DEBOUNCE_MS);
	}

	#[test]
	fn test_numeric_coercion() {
		let settings = normalize_settings(&json!({"debounceMs": "350", "minQueryLength": 2.5}));
		assert_eq!(settings.debounce_ms, 350);
		assert_eq!(settings.min_query_length, 3);

		let settings = normalize_settings(&json!({"debounceMs": "fast", "minQueryLength": {}}));
		assert_eq!(settings.debounce_ms, DEFAULT_DEBOUNCE_MS);
		assert_eq!(settings.min_query_length, DEFAULT_MIN_QUERY_LENGTH);

		let settings = normalize_settings(&json!({"debounceMs": true, "minQueryLength": [4]}));
		assert_eq!(settings.debounce_ms, 1);
		assert_eq!(settings.min_query_length, 4);
	}

	#[test]
	fn test_rounding_matches_math_round() {
		assert_eq!(round_half_up(0.49999999999999994), 0.0);
		assert_eq!(round_half_up(0.5), 1.0);
		assert_eq!(round_half_up(2.5), 3.0);
		assert_eq!(round_half_up(-2.5), -2.0);
		assert_eq!(round_half_up(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);

		let settings = normalize_settings(&json!({"debounceMs": 0.49999999999999994}));
		assert_eq!(settings.debounce_ms, 0);
	}

	#[test]
	fn test_non_object_candidate_yields_defaults() {
		for candidate in [json!(null), json!([1, 2]), json!("settings"), json!(42)] {
			assert_eq!(normalize_settings(&candidate), StraplightSettings::default());
		}
	}

	#[test]
	fn test_content_types_normalized() {
		let settings = normalize_settings(&json!({
			"contentTypes": {
				"api::article.article": {"enabled": false, "displayFields": ["author", "slug", "body"]},
				"api::author.author": {"enabled": "no"},
				"api::tag.tag": null,
				"plugin::users-permissions.user": {"enabled": true},
				"admin::user": {}
			}
		}));

		assert_eq!(settings.content_types.len(), 3);

		let article = &settings.content_types["api::article.article"];
		assert!(!article.enabled);
		assert_eq!(article.display_fields, vec!["author", "slug"]);

		let author = &settings.content_types["api::author.author"];
		assert!(author.enabled);
		assert!(author.display_fields.is_empty());

		assert_eq!(
			settings.content_types["api::tag.tag"],
			ContentTypeSettings::default()
		);
	}

	#[test]
	fn test_display_fields_non_array_is_empty() {
		let settings = normalize_settings(&json!({
			"contentTypes": {"api::a.a": {"displayFields": "title"}}
		}));
		assert!(settings.content_types["api::a.a"].display_fields.is_empty());
	}

	#[test]
	fn test_content_types_not_object_is_empty() {
		let settings = normalize_settings(&json!({"contentTypes": ["api::a.a"]}));
		assert!(settings.content_types.is_empty());
	}

	#[test]
	fn test_is_enabled_is_opt_out() {
		let settings = normalize_settings(&json!({
			"contentTypes": {"api::off.off": {"enabled": false}}
		}));
		assert!(!settings.is_enabled("api::off.off"));
		assert!(settings.is_enabled("api::unknown.unknown"));
		assert!(settings.display_fields("api::unknown.unknown").is_empty());
	}

	#[test]
	fn test_normalization_is_idempotent() {
		let once = normalize_settings(&json!({
			"debounceMs": 12.7,
			"minQueryLength": -3,
			"contentTypes": {"api::a.a": {"displayFields": ["x", 1, "y"]}}
		}));
		let twice = normalize_settings(&serde_json::to_value(&once).unwrap());
		assert_eq!(once, twice);
		assert_eq!(once.content_types["api::a.a"].display_fields, vec!["x"]);
	}

	proptest! {
		/// Display fields longer than the cap are truncated to the first two,
		/// in order.
		#[test]
		fn display_fields_truncated_in_order(fields in proptest::collection::vec("[a-z]{1,10}", 0..8)) {
			let settings = normalize_settings(&json!({
				"contentTypes": {"api::x.x": {"displayFields": fields.clone()}}
			}));
			let kept = &settings.content_types["api::x.x"].display_fields;
			let expected: Vec<String> = fields.iter().take(MAX_DISPLAY_FIELDS).cloned().collect();
			prop_assert_eq!(kept, &expected);
		}

		/// Bounds always hold for any numeric input.
		#[test]
		fn bounds_hold(debounce in any::<f64>(), min_len in any::<f64>()) {
			let candidate = json!({"debounceMs": debounce, "minQueryLength": min_len});
			let settings = normalize_settings(&candidate);
			prop_assert!(settings.min_query_length >= 1);
			if debounce.is_finite() && debounce >= 0.5 {
				prop_assert!(settings.debounce_ms >= 1);
			}
		}

		/// Keys outside the application namespace never survive.
		#[test]
		fn non_api_keys_dropped(key in "[a-z]{1,8}::[a-z]{1,8}") {
			let settings = normalize_settings(&json!({"contentTypes": {key.clone(): {}}}));
			prop_assert_eq!(settings.content_types.contains_key(&key), key.starts_with("api::"));
		}
	}
}
