// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Normalized character record

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider-assigned character identifier
pub type CharacterId = u64;

/// A character in the flat shape served to callers
///
/// Optional fields serialize as `null` rather than being skipped, so consumers
/// can tell "the provider returned nothing" apart from "the provider returned an
/// empty list".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Character identifier
    #[schema(example = 1_009_610)]
    pub id: CharacterId,
    /// Display name
    #[schema(example = "Spider-Man")]
    pub name: String,
    /// Free-form description (may be empty or absent)
    pub description: Option<String>,
    /// Full thumbnail URL, `path.extension`
    pub thumbnail_url: Option<String>,
    /// Names of comics the character appears in
    pub comics: Option<Vec<String>>,
    /// Names of series the character appears in
    pub series: Option<Vec<String>>,
    /// Names of stories the character appears in
    pub stories: Option<Vec<String>>,
    /// Names of events the character appears in
    pub events: Option<Vec<String>>,
    /// At most one `"type: url"` entry
    pub urls: Option<Vec<String>>,
}

impl CharacterRecord {
    /// Create a record with only the required fields set
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            thumbnail_url: None,
            comics: None,
            series: None,
            stories: None,
            events: None,
            urls: None,
        }
    }

    /// Case-insensitive check whether the name starts with `prefix`
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}
