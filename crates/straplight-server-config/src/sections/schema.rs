// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content-type schema location.

use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_DIR: &str = "./src";

/// Where content-type schemas are loaded from. The directory is expected to
/// contain `api/<name>/content-types/<type>/schema.json` files.
#[derive(Debug, Clone)]
pub struct SchemaConfig {
	pub dir: PathBuf,
}

impl Default for SchemaConfig {
	fn default() -> Self {
		Self {
			dir: PathBuf::from(DEFAULT_DIR),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaConfigLayer {
	#[serde(default)]
	pub dir: Option<String>,
}

impl SchemaConfigLayer {
	pub fn merge(&mut self, other: SchemaConfigLayer) {
		if other.dir.is_some() {
			self.dir = other.dir;
		}
	}

	pub fn finalize(self) -> SchemaConfig {
		SchemaConfig {
			dir: PathBuf::from(self.dir.unwrap_or_else(|| DEFAULT_DIR.to_string())),
		}
	}
}
