// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the character API server:
//! health checks and the three catalog operations.

use std::time::Instant;

use api_client::{CharacterSource, SourceError};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use shared_types::{CharacterId, CharacterRecord, Page};
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ServerError,
    extractors::{PathExtractor, QueryExtractor},
    metrics,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the API service including version, environment information, and the status of the character source backing the catalog.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck),
        (status = 503, description = "Service unavailable", body = String)
    )
)]
pub async fn health_handler(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let health = state.health_check().await?;
    Ok(Json(health))
}

/// Query parameters for listing and searching characters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CharacterListQuery {
    /// Number of characters to skip (default 0)
    #[param(example = 0)]
    pub offset: Option<u32>,
    /// Maximum number of characters to return (default 20, at least 1, clamped to 100)
    #[param(example = 20)]
    pub limit: Option<u32>,
    /// Case-insensitive name prefix; blank values list all characters
    #[param(example = "Spi")]
    pub name: Option<String>,
}

impl CharacterListQuery {
    /// Validated, clamped page
    pub fn page(&self) -> Result<Page, ServerError> {
        let page = Page::from_parts(self.offset, self.limit);
        if page.limit == 0 {
            return Err(ServerError::ValidationError(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(page.clamped())
    }

    /// Trimmed name prefix, if one was given
    pub fn name_prefix(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A window of characters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CharacterPage {
    /// Characters in source order
    pub data: Vec<CharacterRecord>,
    /// Offset that was applied
    pub offset: u32,
    /// Limit that was applied, after clamping
    pub limit: u32,
    /// Number of characters in `data`
    pub count: usize,
}

fn result_label<T>(result: &Result<T, SourceError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(SourceError::NotFound { .. }) => "not_found",
        Err(SourceError::Unavailable { .. }) => "unavailable",
    }
}

fn record_request<T>(endpoint: &str, result: &Result<T, ServerError>) {
    let status = match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    metrics::inc_requests(endpoint, status);
}

/// List or search characters
///
/// Lists characters in source order. When `name` is a non-blank string, only
/// characters whose name starts with it (case-insensitive) are returned.
///
/// # Errors
///
/// Returns `ServerError` if the parameters are invalid or the character source
/// is unavailable.
#[utoipa::path(
    get,
    path = "/v1/characters",
    tag = "characters",
    summary = "List or search characters",
    description = "Returns a window of characters. `limit` defaults to 20 and is clamped to 100; `offset` defaults to 0. A non-blank `name` switches to a case-insensitive prefix search.",
    params(CharacterListQuery),
    responses(
        (status = 200, description = "Characters in the requested window", body = CharacterPage),
        (status = 400, description = "Invalid paging parameters", body = String),
        (status = 503, description = "Character source unavailable", body = String)
    )
)]
pub async fn list_characters_handler(
    State(state): State<ServerState>,
    QueryExtractor(query): QueryExtractor<CharacterListQuery>,
) -> Result<Json<CharacterPage>, ServerError> {
    let result = list_characters(&state, &query).await;
    record_request("list_characters", &result);
    result.map(Json)
}

async fn list_characters(
    state: &ServerState,
    query: &CharacterListQuery,
) -> Result<CharacterPage, ServerError> {
    let page = query.page()?;
    let catalog = state.catalog();
    let started = Instant::now();

    let (operation, result) = match query.name_prefix() {
        Some(prefix) => {
            debug!(prefix, ?page, "searching characters by name");
            ("search_by_name", catalog.search_by_name(prefix, page).await)
        }
        None => {
            debug!(?page, "listing characters");
            ("list_characters", catalog.list_characters(page).await)
        }
    };

    metrics::observe_source_duration(
        catalog.name(),
        operation,
        result_label(&result),
        started.elapsed().as_secs_f64(),
    );

    let data = result.inspect_err(|e| error!(error = %e, operation, "character lookup failed"))?;

    Ok(CharacterPage {
        count: data.len(),
        data,
        offset: page.offset,
        limit: page.limit,
    })
}

/// Get a character by id
///
/// # Errors
///
/// Returns `ServerError` if the id is invalid, no character has this id, or the
/// character source is unavailable.
#[utoipa::path(
    get,
    path = "/v1/characters/{id}",
    tag = "characters",
    summary = "Get a character by id",
    description = "Returns the character with exactly this id.",
    params(
        ("id" = u64, Path, description = "Character id", example = 1_009_610)
    ),
    responses(
        (status = 200, description = "The character", body = CharacterRecord),
        (status = 400, description = "Invalid id", body = String),
        (status = 404, description = "No character with this id", body = String),
        (status = 503, description = "Character source unavailable", body = String)
    )
)]
pub async fn get_character_handler(
    State(state): State<ServerState>,
    PathExtractor(id): PathExtractor<CharacterId>,
) -> Result<Json<CharacterRecord>, ServerError> {
    let result = get_character(&state, id).await;
    record_request("get_character", &result);
    result.map(Json)
}

async fn get_character(state: &ServerState, id: CharacterId) -> Result<CharacterRecord, ServerError> {
    if id == 0 {
        return Err(ServerError::ValidationError(
            "id must be a positive integer".to_string(),
        ));
    }

    let catalog = state.catalog();
    let started = Instant::now();
    let result = catalog.get_character_by_id(id).await;

    metrics::observe_source_duration(
        catalog.name(),
        "get_character_by_id",
        result_label(&result),
        started.elapsed().as_secs_f64(),
    );

    match result {
        Ok(character) => Ok(character),
        Err(e @ SourceError::NotFound { .. }) => {
            debug!(id, "character not found");
            Err(e.into())
        }
        Err(e) => {
            error!(id, error = %e, "character lookup failed");
            Err(e.into())
        }
    }
}
