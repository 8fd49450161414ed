// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Settings store and search aggregation.
//!
//! [`SearchAggregator`] fans a query out across every enabled application
//! content type, isolating failures per type, and merges the results in
//! registry order. [`SettingsService`] owns the persisted settings.

pub mod aggregator;
pub mod error;
pub mod settings;

pub use aggregator::SearchAggregator;
pub use error::{Result, SearchError};
pub use settings::{SettingsService, SETTINGS_KEY, STORE_NAMESPACE};
