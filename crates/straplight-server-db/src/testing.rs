// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helpers for tests in this and downstream crates.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::pool::run_migrations;

/// In-memory pool with all tables created.
pub async fn create_test_pool() -> Result<SqlitePool, DbError> {
	let pool = SqlitePool::connect(":memory:").await?;
	run_migrations(&pool).await?;
	Ok(pool)
}
