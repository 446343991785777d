// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marvel API integration
//!
//! This module provides an implementation of the `CharacterSource` trait backed by
//! the public Marvel Comics API.

use std::time::Instant;

use api_client::{CharacterSource, HealthStatus, SourceError};
use shared_types::{CharacterId, CharacterRecord, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET, Page};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::ProviderConfig,
    credentials::Credentials,
    envelope::RawEnvelope,
    error::MarvelError,
    normalizer::{normalize, normalize_character},
    signer::Signer,
    transport::ResilientTransport,
};

const CHARACTERS_PATH: &str = "characters";

/// Marvel API client implementation
#[derive(Debug, Clone)]
pub struct MarvelClient {
    transport: ResilientTransport,
}

impl MarvelClient {
    /// Create a new Marvel API client
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are unusable, the configuration is
    /// invalid or the HTTP client cannot be created
    pub fn new(config: &ProviderConfig) -> Result<Self, MarvelError> {
        let credentials = Credentials::from_config(config)?;
        let transport = ResilientTransport::new(config, Signer::new(credentials))?;
        Ok(Self { transport })
    }

    /// Get a page of characters
    ///
    /// `limit` and `offset` default to 20 and 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed
    pub async fn get_characters(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Result<RawEnvelope, MarvelError> {
        self.transport
            .fetch(CHARACTERS_PATH, &paging_params(offset, limit))
            .await
    }

    /// Get a single character by id
    ///
    /// # Errors
    ///
    /// Returns [`MarvelError::NotFound`] if the provider does not know the id
    pub async fn get_character(&self, id: CharacterId) -> Result<RawEnvelope, MarvelError> {
        self.transport
            .fetch(&format!("{CHARACTERS_PATH}/{id}"), &[])
            .await
    }

    /// Get a page of characters whose name starts with `name_prefix`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed
    pub async fn get_characters_by_name(
        &self,
        name_prefix: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Result<RawEnvelope, MarvelError> {
        let mut params = vec![("nameStartsWith", name_prefix.to_string())];
        params.extend(paging_params(offset, limit));
        self.transport.fetch(CHARACTERS_PATH, &params).await
    }
}

fn paging_params(offset: Option<u32>, limit: Option<u32>) -> Vec<(&'static str, String)> {
    vec![
        ("limit", limit.unwrap_or(DEFAULT_PAGE_LIMIT).to_string()),
        ("offset", offset.unwrap_or(DEFAULT_PAGE_OFFSET).to_string()),
    ]
}

impl CharacterSource for MarvelClient {
    async fn health_check(&self) -> Result<HealthStatus, SourceError> {
        debug!("performing health check on Marvel API");

        let start_time = Instant::now();
        let answer = self
            .transport
            .fetch_once(CHARACTERS_PATH, &paging_params(None, Some(1)))
            .await;
        let response_time = start_time.elapsed();

        match answer {
            Ok(_) => {
                info!("Marvel API health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            Err(MarvelError::ProviderHttp {
                status: 401 | 403 | 409,
                ..
            }) => {
                warn!("Marvel API health check failed: credentials rejected");
                Ok(HealthStatus::Down {
                    reason: "Authentication failed".to_string(),
                })
            }
            Err(MarvelError::ProviderHttp { status: 429, .. }) => {
                warn!("Marvel API health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            Err(MarvelError::ProviderHttp { status, .. }) => {
                warn!("Marvel API health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {status}"),
                })
            }
            Err(e) => {
                warn!(error = %e, "Marvel API health check failed");
                Ok(HealthStatus::Down {
                    reason: e.to_string(),
                })
            }
        }
    }

    #[instrument(skip(self), fields(offset = page.offset, limit = page.limit))]
    async fn list_characters(&self, page: Page) -> Result<Vec<CharacterRecord>, SourceError> {
        let envelope = self
            .get_characters(Some(page.offset), Some(page.limit))
            .await
            .inspect_err(|e| error!(error = %e, "failed to list characters from Marvel"))?;

        Ok(normalize(envelope)?)
    }

    #[instrument(skip(self))]
    async fn get_character_by_id(&self, id: CharacterId) -> Result<CharacterRecord, SourceError> {
        let envelope = match self.get_character(id).await {
            Ok(envelope) => envelope,
            Err(MarvelError::NotFound) => {
                debug!("character {} not found on Marvel", id);
                return Err(SourceError::NotFound { id });
            }
            Err(e) => {
                error!(error = %e, "failed to fetch character {} from Marvel", id);
                return Err(e.into());
            }
        };

        match envelope.data.results.into_iter().next() {
            Some(raw) => Ok(normalize_character(raw)?),
            None => {
                debug!("Marvel returned no results for character {}", id);
                Err(SourceError::NotFound { id })
            }
        }
    }

    #[instrument(skip(self), fields(offset = page.offset, limit = page.limit))]
    async fn search_by_name(
        &self,
        prefix: &str,
        page: Page,
    ) -> Result<Vec<CharacterRecord>, SourceError> {
        let envelope = self
            .get_characters_by_name(prefix, Some(page.offset), Some(page.limit))
            .await
            .inspect_err(|e| error!(error = %e, "failed to search characters on Marvel"))?;

        Ok(normalize(envelope)?)
    }

    fn name(&self) -> &'static str {
        "marvel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_to_first_twenty() {
        assert_eq!(
            paging_params(None, None),
            vec![("limit", "20".to_string()), ("offset", "0".to_string())]
        );
        assert_eq!(
            paging_params(Some(40), Some(5)),
            vec![("limit", "5".to_string()), ("offset", "40".to_string())]
        );
    }

    #[test]
    fn client_creation_requires_usable_credentials() {
        let config = ProviderConfig::with_keys("your-public-key", "your-private-key");
        assert!(matches!(
            MarvelClient::new(&config),
            Err(MarvelError::Config(_))
        ));

        let config = ProviderConfig::with_keys("abc123", "def456");
        let client = MarvelClient::new(&config).unwrap();
        assert_eq!(client.name(), "marvel");
    }
}
