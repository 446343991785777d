// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration
//!
//! The configuration is built once at startup and handed by value or reference to
//! the constructors that need it; nothing reads it from ambient state.

use std::{fmt, time::Duration};

use serde::Deserialize;

use crate::credentials::Credentials;

// Marvel API constants
const DEFAULT_MARVEL_BASE_URL: &str = "https://gateway.marvel.com/v1/public";
const DEFAULT_TIMEOUT_MILLIS: u64 = 30_000;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_BACKOFF_MILLIS: u64 = 1_000;

/// Configuration for the Marvel API client
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL for the provider, e.g. `https://gateway.marvel.com/v1/public`
    pub base_url: String,
    /// Public API key, sent on the wire as `apikey`
    pub public_key: String,
    /// Private API key, only ever used as signing input
    pub private_key: String,
    /// Per-call deadline in milliseconds
    pub timeout_millis: u64,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further retry
    pub initial_backoff_millis: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MARVEL_BASE_URL.to_string(),
            public_key: String::new(),
            private_key: String::new(),
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff_millis: DEFAULT_INITIAL_BACKOFF_MILLIS,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("timeout_millis", &self.timeout_millis)
            .field("max_retries", &self.max_retries)
            .field("initial_backoff_millis", &self.initial_backoff_millis)
            .finish()
    }
}

impl ProviderConfig {
    /// Create a configuration for the default base URL with the given keys
    pub fn with_keys(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            ..Self::default()
        }
    }

    /// Per-call deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    /// Delay before the first retry
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_millis)
    }

    /// Whether the configured keys are present and not placeholders
    pub fn has_usable_credentials(&self) -> bool {
        Credentials::from_config(self).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_provider_contract() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "https://gateway.marvel.com/v1/public");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff(), Duration::from_secs(1));
        assert!(!config.has_usable_credentials());
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let config = ProviderConfig::with_keys("pub-123", "super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("pub-123"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn usable_credentials_require_both_keys() {
        assert!(ProviderConfig::with_keys("abc123", "def456").has_usable_credentials());
        assert!(!ProviderConfig::with_keys("abc123", "").has_usable_credentials());
        assert!(!ProviderConfig::with_keys("   ", "def456").has_usable_credentials());
    }
}
