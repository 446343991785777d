// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Character catalog facade
//!
//! [`CharacterCatalog`] is the single entry point callers use to read characters.
//! It is either backed by the live provider or by the static dataset; the variant
//! is chosen once at construction and never changes afterwards.

use api_client::{CharacterSource, HealthStatus, SourceError};
use serde::{Deserialize, Serialize};
use shared_types::{CharacterId, CharacterRecord, Page};
use tracing::{info, warn};

use crate::{
    config::ProviderConfig, credentials::Credentials, error::MarvelError, fallback::StaticSource,
    marvel::MarvelClient,
};

/// How the catalog picks its backing source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Live when usable credentials are configured, static otherwise
    #[default]
    Auto,
    /// Always live; fails to start without usable credentials
    Live,
    /// Always the static dataset
    Static,
}

/// A character source that is either live or static
#[derive(Debug, Clone)]
pub enum CharacterCatalog {
    /// Backed by the Marvel API
    Live(MarvelClient),
    /// Backed by an in-memory dataset
    Static(StaticSource),
}

impl CharacterCatalog {
    /// Build the catalog selected by `mode`
    ///
    /// # Errors
    ///
    /// Returns an error if a live source is required or selected and cannot be
    /// constructed from `config`
    pub fn from_config(config: &ProviderConfig, mode: SourceMode) -> Result<Self, MarvelError> {
        let catalog = match mode {
            SourceMode::Static => Self::fallback(),
            SourceMode::Live => Self::Live(MarvelClient::new(config)?),
            SourceMode::Auto => match Credentials::from_config(config) {
                Ok(_) => Self::Live(MarvelClient::new(config)?),
                Err(reason) => {
                    warn!(%reason, "provider credentials unusable, serving static character dataset");
                    Self::fallback()
                }
            },
        };

        info!(source = catalog.name(), ?mode, "character catalog ready");
        Ok(catalog)
    }

    /// Catalog backed by the built-in static dataset
    pub fn fallback() -> Self {
        Self::Static(StaticSource::with_default_dataset())
    }

    /// Whether requests go to the live provider
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

impl From<MarvelClient> for CharacterCatalog {
    fn from(client: MarvelClient) -> Self {
        Self::Live(client)
    }
}

impl From<StaticSource> for CharacterCatalog {
    fn from(source: StaticSource) -> Self {
        Self::Static(source)
    }
}

impl CharacterSource for CharacterCatalog {
    async fn health_check(&self) -> Result<HealthStatus, SourceError> {
        match self {
            Self::Live(client) => client.health_check().await,
            Self::Static(source) => source.health_check().await,
        }
    }

    async fn list_characters(&self, page: Page) -> Result<Vec<CharacterRecord>, SourceError> {
        match self {
            Self::Live(client) => client.list_characters(page).await,
            Self::Static(source) => source.list_characters(page).await,
        }
    }

    async fn get_character_by_id(&self, id: CharacterId) -> Result<CharacterRecord, SourceError> {
        match self {
            Self::Live(client) => client.get_character_by_id(id).await,
            Self::Static(source) => source.get_character_by_id(id).await,
        }
    }

    async fn search_by_name(
        &self,
        prefix: &str,
        page: Page,
    ) -> Result<Vec<CharacterRecord>, SourceError> {
        match self {
            Self::Live(client) => client.search_by_name(prefix, page).await,
            Self::Static(source) => source.search_by_name(prefix, page).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Live(client) => client.name(),
            Self::Static(source) => source.name(),
        }
    }
}
