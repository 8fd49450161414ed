// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	routing::get,
	Router,
};
use sqlx::sqlite::SqlitePool;
use straplight_core::ContentRegistry;
use straplight_server_db::{SqliteDocumentStore, SqlitePluginStore};
use straplight_server_search::{SearchAggregator, SettingsService};

use crate::routes;

#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub registry: Arc<dyn ContentRegistry>,
	pub settings: SettingsService,
	pub search: SearchAggregator,
}

/// Wires the SQLite-backed stores and the registry into the services.
pub fn create_app_state(pool: SqlitePool, registry: Arc<dyn ContentRegistry>) -> AppState {
	let settings = SettingsService::new(
		Arc::new(SqlitePluginStore::new(pool.clone())),
		Arc::clone(&registry),
	);
	let search = SearchAggregator::new(
		Arc::clone(&registry),
		Arc::new(SqliteDocumentStore::new(pool.clone())),
		settings.clone(),
	);

	AppState {
		pool,
		registry,
		settings,
		search,
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/search", get(routes::search::search))
		.route(
			"/settings",
			get(routes::settings::get_settings).put(routes::settings::update_settings),
		)
		.with_state(state)
}
