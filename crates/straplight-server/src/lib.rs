// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Straplight HTTP server.

pub mod api;
pub mod error;
pub mod import;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use import::import_documents;
pub use straplight_server_config::ServerConfig;
