// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Wire shapes of the Marvel API character endpoints
//!
//! Every provider answer wraps its payload in the same envelope:
//!
//! ```json
//! { "code": 200, "status": "Ok", "etag": "...",
//!   "data": { "offset": 0, "limit": 20, "total": 1562, "count": 20, "results": [ ... ] } }
//! ```
//!
//! All fields of a character are optional on the wire; required-field checks
//! happen during normalization so that a malformed record is reported by name.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Timestamp layout used by the provider for `modified`, e.g. `2014-04-29T14:18:17-0400`
const MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level provider response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvelope {
    /// HTTP status code echoed in the body
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: u16,
    /// Status text, e.g. `Ok`
    pub status: Option<String>,
    /// Copyright notice
    pub copyright: Option<String>,
    /// Plain-text attribution
    pub attribution_text: Option<String>,
    /// HTML attribution
    #[serde(rename = "attributionHTML")]
    pub attribution_html: Option<String>,
    /// Entity tag of the answer
    pub etag: Option<String>,
    /// Paging container with the results
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: RawDataContainer,
}

impl RawEnvelope {
    /// Offset echoed by the provider
    pub fn paging_offset(&self) -> u32 {
        self.data.offset
    }

    /// Limit echoed by the provider
    pub fn paging_limit(&self) -> u32 {
        self.data.limit
    }

    /// Total number of matching characters on the provider side
    pub fn total(&self) -> u32 {
        self.data.total
    }

    /// Number of results the provider claims to have returned
    pub fn count(&self) -> u32 {
        self.data.count
    }

    /// Results in provider order
    pub fn results(&self) -> &[RawCharacter] {
        &self.data.results
    }
}

/// Paging container
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDataContainer {
    /// Offset of the first result
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u32,
    /// Requested page size
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: u32,
    /// Total number of matches
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u32,
    /// Number of results in this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    /// The results themselves
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawCharacter>,
}

/// A character as returned by the provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCharacter {
    /// Provider id
    pub id: Option<u64>,
    /// Display name
    pub name: Option<String>,
    /// Free-text description, often empty
    pub description: Option<String>,
    /// Last modification time, see [`RawCharacter::modified_at`]
    pub modified: Option<String>,
    /// Canonical resource URI
    #[serde(rename = "resourceURI")]
    pub resource_uri: Option<String>,
    /// Portrait image
    pub thumbnail: Option<RawThumbnail>,
    /// Comics the character appears in
    pub comics: Option<RawResourceList>,
    /// Series the character appears in
    pub series: Option<RawResourceList>,
    /// Stories the character appears in
    pub stories: Option<RawResourceList>,
    /// Events the character appears in
    pub events: Option<RawResourceList>,
    /// Public links
    pub urls: Option<RawUrls>,
}

impl RawCharacter {
    /// Parse `modified`, returning `None` for absent or malformed values
    pub fn modified_at(&self) -> Option<DateTime<FixedOffset>> {
        let modified = self.modified.as_deref()?;
        DateTime::parse_from_str(modified, MODIFIED_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(modified))
            .ok()
    }
}

/// Image reference split into path and extension
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawThumbnail {
    /// Image path without extension
    pub path: Option<String>,
    /// File extension without the dot
    pub extension: Option<String>,
}

/// Collection of related resources
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResourceList {
    /// Total number of related resources
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: u32,
    /// Number of items returned in `items`
    #[serde(default, deserialize_with = "null_as_default")]
    pub returned: u32,
    /// URI of the full collection
    #[serde(rename = "collectionURI")]
    pub collection_uri: Option<String>,
    /// Summaries of the returned resources
    pub items: Option<Vec<RawResourceSummary>>,
}

/// A single related resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResourceSummary {
    /// Canonical resource URI
    #[serde(rename = "resourceURI")]
    pub resource_uri: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Resource type, only present for stories
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A typed public link
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUrl {
    /// Link type, e.g. `detail` or `wiki`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Link target
    pub url: Option<String>,
}

/// `urls` is documented as a list but some answers carry a single object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawUrls {
    /// A single link object
    Single(RawUrl),
    /// A list of link objects
    List(Vec<RawUrl>),
}

impl RawUrls {
    /// The first link, if any
    pub fn first(&self) -> Option<&RawUrl> {
        match self {
            RawUrls::Single(url) => Some(url),
            RawUrls::List(urls) => urls.first(),
        }
    }
}
