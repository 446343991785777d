// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while talking to the Marvel API

use api_client::{FailureKind, SourceError};
use thiserror::Error;

use crate::credentials::CredentialError;

/// Errors specific to the Marvel API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MarvelError {
    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider answered 404
    #[error("resource not found")]
    NotFound,

    /// Provider answered with any other non-success status
    #[error("API error: {status} - {message}")]
    ProviderHttp { status: u16, message: String },

    /// The overall deadline elapsed
    #[error("Request timeout after {millis} ms")]
    Timeout { millis: u64 },

    /// A provider record was missing a required field
    #[error("character record is missing required field `{field}`")]
    Normalization { field: &'static str },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<CredentialError> for MarvelError {
    fn from(value: CredentialError) -> Self {
        MarvelError::Config(value.to_string())
    }
}

impl MarvelError {
    /// Whether another attempt may succeed
    ///
    /// Transport failures and 5xx answers are transient; 4xx answers, decode
    /// failures and configuration problems are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarvelError::Http(error) => !error.is_builder() && !error.is_decode(),
            MarvelError::ProviderHttp { status, .. } => *status >= 500,
            MarvelError::Json(_)
            | MarvelError::NotFound
            | MarvelError::Timeout { .. }
            | MarvelError::Normalization { .. }
            | MarvelError::Config(_) => false,
        }
    }

    /// Classify this error for callers that only see [`SourceError`]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            MarvelError::Http(error) if error.is_timeout() => FailureKind::Timeout,
            MarvelError::Http(error) if error.is_decode() => FailureKind::InvalidResponse,
            MarvelError::Http(_) => FailureKind::Network,
            MarvelError::Json(_) => FailureKind::InvalidResponse,
            MarvelError::NotFound => FailureKind::ProviderHttp { status: 404 },
            MarvelError::ProviderHttp { status, .. } => FailureKind::ProviderHttp { status: *status },
            MarvelError::Timeout { .. } => FailureKind::Timeout,
            MarvelError::Normalization { .. } => FailureKind::Normalization,
            MarvelError::Config(_) => FailureKind::Configuration,
        }
    }
}

/// Every provider failure is "unavailable" to callers; callers that can name the
/// missing character map [`MarvelError::NotFound`] themselves.
impl From<MarvelError> for SourceError {
    fn from(value: MarvelError) -> Self {
        SourceError::unavailable(value.failure_kind(), value.to_string())
    }
}
