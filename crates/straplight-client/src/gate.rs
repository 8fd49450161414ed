// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side quick-open search flow.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use straplight_core::{SearchResult, StraplightSettings};
use tracing::{debug, instrument};

use crate::client::StraplightClient;
use crate::error::Result;

/// Issues strictly increasing tokens; only the latest token is current.
#[derive(Debug, Default)]
pub struct SearchGate {
	latest: AtomicU64,
}

impl SearchGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues a new token, superseding every earlier one.
	pub fn issue(&self) -> u64 {
		self.latest.fetch_add(1, Ordering::SeqCst) + 1
	}

	pub fn is_current(&self, token: u64) -> bool {
		self.latest.load(Ordering::SeqCst) == token
	}
}

/// What a single keystroke's search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Results for the latest query.
	Results(Vec<SearchResult>),
	/// The trimmed query is shorter than `minQueryLength`; clear the list.
	TooShort,
	/// A newer query was issued before this one completed; ignore it.
	Stale,
}

/// One open quick-open panel: a client, a settings snapshot and a gate.
pub struct SearchSession {
	client: StraplightClient,
	settings: StraplightSettings,
	gate: SearchGate,
}

impl SearchSession {
	pub fn new(client: StraplightClient, settings: StraplightSettings) -> Self {
		Self {
			client,
			settings,
			gate: SearchGate::new(),
		}
	}

	/// Opens a session with the server's settings, or defaults when they
	/// cannot be fetched.
	pub async fn open(client: StraplightClient) -> Self {
		let settings = client.settings_or_default().await;
		Self::new(client, settings)
	}

	pub fn settings(&self) -> &StraplightSettings {
		&self.settings
	}

	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.settings.debounce_ms)
	}

	/// Runs one debounced search for `query`.
	///
	/// Every call supersedes earlier ones, including calls that end up
	/// [`SearchOutcome::TooShort`]. A superseded call returns
	/// [`SearchOutcome::Stale`] whether or not its request succeeded.
	#[instrument(skip(self))]
	pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
		let token = self.gate.issue();

		let trimmed = query.trim();
		let min_length = usize::try_from(self.settings.min_query_length).unwrap_or(usize::MAX);
		if trimmed.is_empty() || trimmed.chars().count() < min_length {
			return Ok(SearchOutcome::TooShort);
		}

		tokio::time::sleep(self.debounce()).await;
		if !self.gate.is_current(token) {
			debug!(token, "query superseded during debounce");
			return Ok(SearchOutcome::Stale);
		}

		let response = self.client.search(trimmed).await;
		if !self.gate.is_current(token) {
			debug!(token, "discarding stale response");
			return Ok(SearchOutcome::Stale);
		}

		response.map(SearchOutcome::Results)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::extract::Query;
	use axum::routing::get;
	use axum::{Json, Router};
	use serde_json::json;
	use std::collections::HashMap;
	use std::sync::atomic::AtomicUsize;
	use std::sync::Arc;

	#[test]
	fn test_gate_only_latest_is_current() {
		let gate = SearchGate::new();
		let first = gate.issue();
		assert!(gate.is_current(first));

		let second = gate.issue();
		assert!(second > first);
		assert!(!gate.is_current(first));
		assert!(gate.is_current(second));
	}

	/// Serves `/search`, echoing `q` as a label. Queries starting with `slow`
	/// are delayed.
	async fn serve(hits: Arc<AtomicUsize>) -> StraplightClient {
		let router = Router::new().route(
			"/search",
			get(move |Query(params): Query<HashMap<String, String>>| {
				let hits = Arc::clone(&hits);
				async move {
					hits.fetch_add(1, Ordering::SeqCst);
					let q = params.get("q").cloned().unwrap_or_default();
					if q.starts_with("slow") {
						tokio::time::sleep(Duration::from_millis(300)).await;
					}
					Json(json!({"results": [{
						"id": 1,
						"documentId": "d1",
						"label": q,
						"contentType": "Article",
						"uid": "api::article.article",
						"fields": []
					}]}))
				}
			}),
		);
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, router).await.unwrap();
		});
		StraplightClient::new(format!("http://{addr}")).unwrap()
	}

	fn settings(debounce_ms: u64, min_query_length: u64) -> StraplightSettings {
		StraplightSettings {
			debounce_ms,
			min_query_length,
			..StraplightSettings::default()
		}
	}

	fn labels(outcome: &SearchOutcome) -> Vec<String> {
		match outcome {
			SearchOutcome::Results(results) => results.iter().map(|r| r.label.clone()).collect(),
			other => panic!("expected results, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_short_queries_skip_network() {
		let hits = Arc::new(AtomicUsize::new(0));
		let session = SearchSession::new(serve(Arc::clone(&hits)).await, settings(0, 3));

		assert_eq!(session.search("   ").await.unwrap(), SearchOutcome::TooShort);
		assert_eq!(session.search(" ab ").await.unwrap(), SearchOutcome::TooShort);
		assert_eq!(hits.load(Ordering::SeqCst), 0);

		let outcome = session.search(" abc ").await.unwrap();
		assert_eq!(labels(&outcome), vec!["abc"]);
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_min_length_counts_characters() {
		let hits = Arc::new(AtomicUsize::new(0));
		let session = SearchSession::new(serve(Arc::clone(&hits)).await, settings(0, 2));

		let outcome = session.search("é").await.unwrap();
		assert_eq!(outcome, SearchOutcome::TooShort);
		assert_eq!(hits.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_stale_response_discarded() {
		let hits = Arc::new(AtomicUsize::new(0));
		let session = SearchSession::new(serve(Arc::clone(&hits)).await, settings(0, 1));

		let (slow, fast) = tokio::join!(session.search("slow query"), async {
			tokio::time::sleep(Duration::from_millis(50)).await;
			session.search("fast").await
		});

		assert_eq!(slow.unwrap(), SearchOutcome::Stale);
		assert_eq!(labels(&fast.unwrap()), vec!["fast"]);
		assert_eq!(hits.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn test_superseded_during_debounce_skips_network() {
		let hits = Arc::new(AtomicUsize::new(0));
		let session = SearchSession::new(serve(Arc::clone(&hits)).await, settings(100, 1));

		let (first, second) = tokio::join!(session.search("hel"), async {
			tokio::time::sleep(Duration::from_millis(10)).await;
			session.search("hello").await
		});

		assert_eq!(first.unwrap(), SearchOutcome::Stale);
		assert_eq!(labels(&second.unwrap()), vec!["hello"]);
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_open_falls_back_to_defaults() {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let client = StraplightClient::new(format!("http://{addr}")).unwrap();
		let session = SearchSession::open(client).await;
		assert_eq!(session.settings(), &StraplightSettings::default());
		assert_eq!(session.debounce(), Duration::from_millis(200));
	}
}
