// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content-type schema model.
//!
//! Schemas are owned by the host content registry and are read-only here.
//! Attribute declaration order matters for field inference, so attributes
//! are kept as an ordered list rather than a hash map.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declared type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
	String,
	Text,
	Email,
	Uid,
	Richtext,
	Relation,
	#[serde(other)]
	Other,
}

impl AttributeType {
	pub fn as_str(&self) -> &'static str {
		match self {
			AttributeType::String => "string",
			AttributeType::Text => "text",
			AttributeType::Email => "email",
			AttributeType::Uid => "uid",
			AttributeType::Richtext => "richtext",
			AttributeType::Relation => "relation",
			AttributeType::Other => "other",
		}
	}

	/// String-like types are the ones a substring search can run against.
	pub fn is_string_like(&self) -> bool {
		crate::introspect::STRING_FIELD_TYPES.contains(self)
	}
}

impl fmt::Display for AttributeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single attribute of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
	#[serde(rename = "type")]
	pub attr_type: AttributeType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target: Option<String>,
}

impl AttributeDescriptor {
	pub fn new(attr_type: AttributeType) -> Self {
		Self {
			attr_type,
			target: None,
		}
	}

	pub fn relation(target: impl Into<String>) -> Self {
		Self {
			attr_type: AttributeType::Relation,
			target: Some(target.into()),
		}
	}
}

/// Attributes in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, AttributeDescriptor)>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts an attribute. Re-declaring a name replaces it in place.
	pub fn insert(&mut self, name: impl Into<String>, descriptor: AttributeDescriptor) {
		let name = name.into();
		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some(slot) => slot.1 = descriptor,
			None => self.0.push((name, descriptor)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
		self.0.iter().find(|(n, _)| n == name).map(|(_, d)| d)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeDescriptor)> {
		self.0.iter().map(|(n, d)| (n.as_str(), d))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<N: Into<String>> FromIterator<(N, AttributeDescriptor)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (N, AttributeDescriptor)>>(iter: I) -> Self {
		let mut attributes = Attributes::new();
		for (name, descriptor) in iter {
			attributes.insert(name, descriptor);
		}
		attributes
	}
}

impl Serialize for Attributes {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (name, descriptor) in &self.0 {
			map.serialize_entry(name, descriptor)?;
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for Attributes {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct AttributesVisitor;

		impl<'de> Visitor<'de> for AttributesVisitor {
			type Value = Attributes;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a map of attribute name to attribute descriptor")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
				let mut attributes = Attributes::new();
				while let Some((name, descriptor)) =
					access.next_entry::<String, AttributeDescriptor>()?
				{
					attributes.insert(name, descriptor);
				}
				Ok(attributes)
			}
		}

		deserializer.deserialize_map(AttributesVisitor)
	}
}

/// Display metadata of a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInfo {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub singular_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plural_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptions {
	#[serde(
		rename = "content-manager",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub content_manager: Option<ContentManagerOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentManagerOptions {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub main_field: Option<String>,
}

/// Schema of a single content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSchema {
	/// Namespaced identifier, e.g. `api::article.article`. Schema files on
	/// disk do not carry it; the loader derives it from the file location.
	#[serde(default)]
	pub uid: String,
	#[serde(default)]
	pub info: SchemaInfo,
	#[serde(default)]
	pub attributes: Attributes,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plugin_options: Option<PluginOptions>,
}

impl ContentTypeSchema {
	pub fn new(uid: impl Into<String>) -> Self {
		Self {
			uid: uid.into(),
			..Default::default()
		}
	}

	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.info.display_name = Some(display_name.into());
		self
	}

	pub fn with_attribute(mut self, name: impl Into<String>, attr_type: AttributeType) -> Self {
		self.attributes.insert(name, AttributeDescriptor::new(attr_type));
		self
	}

	pub fn with_relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
		self.attributes.insert(name, AttributeDescriptor::relation(target));
		self
	}

	pub fn with_main_field_hint(mut self, field: impl Into<String>) -> Self {
		self.plugin_options = Some(PluginOptions {
			content_manager: Some(ContentManagerOptions {
				main_field: Some(field.into()),
			}),
		});
		self
	}

	/// The content-manager main-field hint, if one is configured.
	pub fn main_field_hint(&self) -> Option<&str> {
		self.plugin_options
			.as_ref()?
			.content_manager
			.as_ref()?
			.main_field
			.as_deref()
	}
}

/// A string-like field as exposed to the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	pub name: String,
	#[serde(rename = "type")]
	pub field_type: AttributeType,
}

/// Derived summary of a content type, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeInfo {
	pub uid: String,
	pub display_name: String,
	pub fields: Vec<FieldDescriptor>,
	/// Empty when no main field can be inferred.
	pub main_field: String,
}
