// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use straplight_core::{ContentTypeInfo, StraplightSettings};

/// Body of `GET /settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
	pub settings: StraplightSettings,
	pub content_types: Vec<ContentTypeInfo>,
}

/// Body of `PUT /settings`: the settings as normalized and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettingsResponse {
	pub settings: StraplightSettings,
}
