// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Validated provider credentials
//!
//! [`ApiKey`] makes unusable keys unrepresentable: once constructed, a key is
//! known to contain non-whitespace characters and not to be one of the
//! placeholder values shipped in sample configuration files. Whether a
//! [`Credentials`] pair can be built is also what decides between the live
//! provider and the static fallback.

use core::fmt;

use thiserror::Error;

use crate::config::ProviderConfig;

/// Values commonly left in sample configuration instead of real keys
const PLACEHOLDER_VALUES: &[&str] = &["changeme", "change-me", "todo", "none", "null"];

/// Reasons a configured key cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Key is empty or whitespace only
    #[error("{0} is empty")]
    Missing(&'static str),

    /// Key is a sample/placeholder value
    #[error("{0} looks like a placeholder value")]
    Placeholder(&'static str),
}

/// A non-empty, non-placeholder API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Box<str>);

impl ApiKey {
    /// Validate a key, `label` names it in error messages
    pub fn new(label: &'static str, value: impl Into<String>) -> Result<Self, CredentialError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(CredentialError::Missing(label));
        }
        if is_placeholder(trimmed) {
            return Err(CredentialError::Placeholder(label));
        }

        Ok(Self(trimmed.into()))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_VALUES.contains(&lower.as_str())
        || lower.starts_with("your")
        || lower.contains("placeholder")
        || (lower.starts_with('<') && lower.ends_with('>'))
        || lower.chars().all(|c| c == 'x' || c == '*')
}

/// The key pair required to sign provider requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Public key, sent on the wire
    pub public_key: ApiKey,
    /// Private key, only used as signing input
    pub private_key: ApiKey,
}

impl Credentials {
    /// Validate both keys
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, CredentialError> {
        Ok(Self {
            public_key: ApiKey::new("public key", public_key)?,
            private_key: ApiKey::new("private key", private_key)?,
        })
    }

    /// Validate the keys held by a provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self, CredentialError> {
        Self::new(config.public_key.as_str(), config.private_key.as_str())
    }
}
