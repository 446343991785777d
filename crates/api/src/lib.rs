// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Character Catalog API Server
//!
//! This crate provides the HTTP server that exposes the character catalog, built with
//! Axum and designed for production use with layered configuration, middleware, and
//! graceful shutdown capabilities.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`extractors`]: Query and path extractors that report rejections as validation errors
//! - [`state`]: Shared application state management with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`metrics`]: Prometheus counters and histograms plus the `/metrics` handler
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Key Features
//!
//! - **Live or Static Catalog**: Serves the Marvel API when credentials are usable, a
//!   built-in dataset otherwise
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken`
//! - **Health Monitoring**: Reports the health of the backing character source
//! - **Comprehensive Middleware**: Request ids, tracing, CORS and timeouts

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::Server;
pub use state::{HealthCheck, ServerState};
