// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the character API server,
//! including configuration, the character catalog, and coordinated cancellation.

use std::sync::Arc;

use api_client::CharacterSource;
use external_apis::CharacterCatalog;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use utoipa::ToSchema;

use crate::{
    config::{Environment, ServerConfig},
    error::ServerResult,
};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Character catalog serving every request
    catalog: Arc<CharacterCatalog>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `catalog` - Character catalog shared by all handlers
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        catalog: Arc<CharacterCatalog>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            catalog,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Character catalog
    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    /// Perform health check operations
    ///
    /// A failing character source reports the service as degraded, never down.
    pub async fn health_check(&self) -> ServerResult<HealthCheck> {
        let source = match self.catalog.health_check().await {
            Ok(status) => HealthStatus::from(status),
            Err(e) => {
                warn!(error = %e, "character source health check failed");
                HealthStatus::Down {
                    reason: e.to_string().into_boxed_str(),
                }
            }
        };

        let status = match &source {
            HealthStatus::Up => HealthStatus::Up,
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => {
                HealthStatus::Degraded {
                    reason: format!("character source: {reason}").into_boxed_str(),
                }
            }
        };

        Ok(HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            source_name: Box::from(self.catalog.name()),
            source,
        })
    }
}

/// Health status of a service or dependency
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,

    /// Service is not operational or has critical failures
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },

    /// Service is operational but experiencing performance issues or partial failures
    Degraded {
        /// Human-readable explanation of the degradation condition
        reason: Box<str>,
    },
}

impl From<api_client::HealthStatus> for HealthStatus {
    fn from(status: api_client::HealthStatus) -> Self {
        match status {
            api_client::HealthStatus::Up => HealthStatus::Up,
            api_client::HealthStatus::Degraded { reason } => HealthStatus::Degraded {
                reason: reason.into_boxed_str(),
            },
            api_client::HealthStatus::Down { reason } => HealthStatus::Down {
                reason: reason.into_boxed_str(),
            },
        }
    }
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Which character source backs the catalog (`marvel` or `static`)
    pub source_name: Box<str>,
    /// Status of the character source
    pub source: HealthStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_state(token: CancellationToken) -> ServerState {
        ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(CharacterCatalog::fallback()),
            token,
        )
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = static_state(token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        // Test that the tokens are linked
        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[tokio::test]
    async fn static_catalog_is_healthy() {
        let state = static_state(CancellationToken::new());
        let health = state.health_check().await.unwrap();

        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.source, HealthStatus::Up);
        assert_eq!(&*health.source_name, "static");
        assert_eq!(health.environment, Environment::Testing);
    }

    #[test]
    fn converts_source_health() {
        let status = HealthStatus::from(api_client::HealthStatus::Down {
            reason: "Authentication failed".to_string(),
        });
        assert_eq!(
            status,
            HealthStatus::Down {
                reason: "Authentication failed".into()
            }
        );
    }
}
