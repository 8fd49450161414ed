// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loads content-type schemas from a CMS project directory.
//!
//! Layout: `<root>/api/<name>/content-types/<type>/schema.json`, registered
//! as `api::<name>.<type>`. Directories are visited in sorted order so the
//! registry enumeration order is stable across restarts.

use std::fs;
use std::path::{Path, PathBuf};

use straplight_core::{ContentTypeSchema, SchemaRegistry};

use crate::error::RegistryError;

const SCHEMA_FILE: &str = "schema.json";

#[tracing::instrument]
pub fn load_schema_dir(root: &Path) -> Result<SchemaRegistry, RegistryError> {
	if !root.is_dir() {
		return Err(RegistryError::MissingDir(root.to_path_buf()));
	}

	let api_dir = root.join("api");
	if !api_dir.is_dir() {
		tracing::warn!(path = %api_dir.display(), "no api directory, registry is empty");
		return Ok(SchemaRegistry::default());
	}

	let mut registry = SchemaRegistry::default();
	for api in sorted_subdirs(&api_dir)? {
		let content_types_dir = api.join("content-types");
		if !content_types_dir.is_dir() {
			continue;
		}

		for type_dir in sorted_subdirs(&content_types_dir)? {
			let schema_path = type_dir.join(SCHEMA_FILE);
			if !schema_path.is_file() {
				tracing::debug!(path = %type_dir.display(), "no schema file, skipping");
				continue;
			}

			let uid = format!("api::{}.{}", dir_name(&api), dir_name(&type_dir));
			let mut schema = read_schema(&schema_path)?;
			schema.uid = uid;
			tracing::debug!(uid = %schema.uid, attributes = schema.attributes.len(), "schema loaded");
			registry.register(schema);
		}
	}

	tracing::info!(count = registry.len(), "content-type schemas loaded");
	Ok(registry)
}

fn read_schema(path: &Path) -> Result<ContentTypeSchema, RegistryError> {
	let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
		path: path.to_path_buf(),
		source,
	})
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
	let io_err = |source| RegistryError::Io {
		path: dir.to_path_buf(),
		source,
	};

	let mut dirs = Vec::new();
	for entry in fs::read_dir(dir).map_err(io_err)? {
		let path = entry.map_err(io_err)?.path();
		if path.is_dir() {
			dirs.push(path);
		}
	}
	dirs.sort();
	Ok(dirs)
}

fn dir_name(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default()
}
