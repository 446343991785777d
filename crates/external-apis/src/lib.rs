// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Character provider integrations
//!
//! This crate provides implementations of the `CharacterSource` trait: a client for
//! the Marvel Comics API and a static in-memory dataset, plus the
//! [`catalog::CharacterCatalog`] facade that picks one of them at startup.
//!
//! # Architecture
//!
//! - **Signing**: [`signer`] - per-request `ts`/`apikey`/`hash` authentication
//! - **Transport**: [`transport::ResilientTransport`] - deadline, retries with exponential backoff
//! - **Normalization**: [`envelope`], [`normalizer`] - provider envelope to flat records
//! - **Sources**: [`marvel::MarvelClient`], [`fallback::StaticSource`]
//! - **Facade**: [`catalog::CharacterCatalog`] - live or static, chosen once
//!
//! # Features
//!
//! - **Fresh Signatures**: every attempt, retries included, carries a new timestamp and hash
//! - **Bounded Latency**: the configured deadline covers the whole call, not each attempt
//! - **Distinct Not-Found**: a missing character is never reported as an outage
//! - **Testing Support**: wiremock-backed tests for every provider failure mode

pub mod catalog;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod marvel;
pub mod normalizer;
pub mod signer;
pub mod transport;

pub use catalog::{CharacterCatalog, SourceMode};
pub use config::ProviderConfig;
pub use credentials::{ApiKey, CredentialError, Credentials};
pub use error::MarvelError;
pub use fallback::StaticSource;
pub use marvel::MarvelClient;
pub use signer::{SignedRequestParams, Signer, sign, sign_at};
pub use transport::{ResilientTransport, backoff_schedule};
