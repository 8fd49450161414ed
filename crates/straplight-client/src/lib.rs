// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the Straplight HTTP API.
//!
//! [`StraplightClient`] wraps the three endpoints. [`SearchSession`] layers the
//! quick-open behaviour on top: queries shorter than the configured minimum
//! never reach the network, and a response that arrives after a newer query
//! was issued is discarded.

pub mod client;
pub mod error;
pub mod gate;

pub use client::StraplightClient;
pub use error::{ClientError, Result};
pub use gate::{SearchGate, SearchOutcome, SearchSession};
