// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Character source abstractions
//!
//! This crate defines the single seam the rest of the system depends on to read
//! characters, independently of whether they come from the live provider or a
//! static dataset.
//!
//! # Core Abstractions
//!
//! - **`CharacterSource` Trait**: list, fetch-by-id and prefix search with async support
//! - **Error Handling**: [`SourceError`] separates "not found" from "source unavailable"
//! - **Health Check System**: [`HealthStatus`] reporting shared by all sources

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{CharacterId, CharacterRecord, Page};
use thiserror::Error;

pub mod health;

pub use health::*;

/// Read access to a catalog of characters
///
/// Implementations must keep the same ordering and slicing semantics so callers
/// cannot tell which one they are talking to.
pub trait CharacterSource: Send + Sync {
    /// Check the health of this source
    ///
    /// # Errors
    ///
    /// Returns an error if the health check itself could not be performed
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, SourceError>> + Send;

    /// List characters in source order, windowed by `page`
    ///
    /// An offset past the end yields an empty list, not an error.
    fn list_characters(
        &self,
        page: Page,
    ) -> impl Future<Output = Result<Vec<CharacterRecord>, SourceError>> + Send;

    /// Fetch a single character by exact id
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when no character has this id, and
    /// [`SourceError::Unavailable`] for every other failure.
    fn get_character_by_id(
        &self,
        id: CharacterId,
    ) -> impl Future<Output = Result<CharacterRecord, SourceError>> + Send;

    /// Characters whose name starts with `prefix` (case-insensitive), windowed by `page`
    fn search_by_name(
        &self,
        prefix: &str,
        page: Page,
    ) -> impl Future<Output = Result<Vec<CharacterRecord>, SourceError>> + Send;

    /// Get the name/identifier of this source
    fn name(&self) -> &'static str;
}

/// Why a source could not serve a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The call did not finish within the configured deadline
    Timeout,
    /// Connection-level failure (DNS, refused, reset) after retries
    Network,
    /// Provider answered with a non-success status
    ProviderHttp {
        /// HTTP status code returned by the provider
        status: u16,
    },
    /// Provider body could not be decoded
    InvalidResponse,
    /// A required field (`id` or `name`) was missing from a provider record
    Normalization,
    /// The source was misconfigured
    Configuration,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network"),
            FailureKind::ProviderHttp { status } => write!(f, "provider http {status}"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Normalization => write!(f, "normalization"),
            FailureKind::Configuration => write!(f, "configuration"),
        }
    }
}

/// Errors surfaced by a [`CharacterSource`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SourceError {
    /// No character exists with the requested id
    #[error("character {id} not found")]
    NotFound { id: CharacterId },

    /// The source could not serve the request
    #[error("character source unavailable ({kind}): {message}")]
    Unavailable { kind: FailureKind, message: String },
}

impl SourceError {
    /// Create an unavailable error of the given kind
    pub fn unavailable(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Unavailable {
            kind,
            message: message.into(),
        }
    }

    /// Check if this error means the requested character does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }

    /// Failure kind for unavailable errors
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SourceError::NotFound { .. } => None,
            SourceError::Unavailable { kind, .. } => Some(*kind),
        }
    }
}
