// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bulk document import from a JSON fixture.
//!
//! The fixture maps content-type uids to arrays of entries:
//!
//! ```json
//! { "api::article.article": [{ "documentId": "a1", "title": "Hello" }] }
//! ```

use serde_json::Value;
use straplight_core::ContentRegistry;
use straplight_server_db::SqliteDocumentStore;

use crate::error::ServerError;

/// Imports every entry in `data`, returning the number of documents written.
///
/// Uids the registry does not know are imported anyway and logged, so
/// fixtures can be loaded before their schemas.
pub async fn import_documents(
	store: &SqliteDocumentStore,
	registry: &dyn ContentRegistry,
	data: &Value,
) -> Result<usize, ServerError> {
	let Value::Object(types) = data else {
		return Err(ServerError::InvalidImport(
			"expected an object keyed by content-type uid".to_string(),
		));
	};

	let mut total = 0;
	for (uid, entries) in types {
		let Value::Array(entries) = entries else {
			return Err(ServerError::InvalidImport(format!(
				"{uid} must map to an array of entries"
			)));
		};

		if registry.get(uid).is_none() {
			tracing::warn!(uid = %uid, "importing documents for unregistered content type");
		}

		total += store.import(uid, entries).await?;
	}

	Ok(total)
}
