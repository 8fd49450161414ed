// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence layer for the Straplight server.
//!
//! - `pool` - SQLite pool creation and migrations
//! - `plugin_store` - namespaced key/value store backing plugin settings
//! - `documents` - entry storage with filter and populate support
//! - `schemas` - content-type schema loading from a project directory

pub mod documents;
pub mod error;
pub mod plugin_store;
pub mod pool;
pub mod schemas;
pub mod testing;

pub use documents::{DocumentStore, SqliteDocumentStore};
pub use error::{DbError, RegistryError, Result};
pub use plugin_store::{KeyValueStore, SqlitePluginStore};
pub use pool::{check_connection, create_pool, run_migrations};
pub use schemas::load_schema_dir;
