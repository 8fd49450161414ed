// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Straplight quick-open search server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use straplight_server::{create_app_state, create_router, import_documents};
use straplight_server_db::{create_pool, load_schema_dir, run_migrations, SqliteDocumentStore};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Straplight server - quick-open search across content types.
#[derive(Parser, Debug)]
#[command(
	name = "straplight-server",
	about = "Straplight quick-open search server",
	version
)]
struct Args {
	/// Path to a TOML config file, layered over the system config
	#[arg(long, global = true, env = "STRAPLIGHT_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the HTTP server (default)
	Serve,
	/// Import documents from a JSON file keyed by content-type uid
	Import {
		/// Path to the JSON fixture
		file: PathBuf,
	},
	/// Show version and build information
	Version,
}

/// Loads `.env` if present, then parses arguments so env-backed flags see it.
fn parse_args() -> Args {
	dotenvy::dotenv().ok();
	Args::parse()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = parse_args();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => straplight_server_config::load_config_with_file(path)?,
		None => straplight_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let pool = create_pool(&config.database.url).await?;
	run_migrations(&pool).await?;

	let registry = load_schema_dir(&config.schema.dir)?;
	tracing::info!(
		schemas_dir = %config.schema.dir.display(),
		content_types = registry.len(),
		"schema registry loaded"
	);

	if let Some(Command::Import { file }) = &args.command {
		let raw = std::fs::read_to_string(file)?;
		let data: serde_json::Value = serde_json::from_str(&raw)?;
		let store = SqliteDocumentStore::new(pool.clone());
		let count = import_documents(&store, &registry, &data).await?;
		tracing::info!(file = %file.display(), count, "import complete");
		return Ok(());
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting straplight-server"
	);

	let state = create_app_state(pool, Arc::new(registry));
	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!(addr = %addr, "listening");
	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	Ok(())
}
