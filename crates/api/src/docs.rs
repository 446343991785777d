// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use shared_types::CharacterRecord;
use utoipa::OpenApi;

use crate::{
    config::Environment,
    routes::handlers::{self, CharacterPage},
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` document for the character API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Character Catalog API",
        description = "Read access to comic characters backed by the Marvel API, with a static fallback dataset."
    ),
    paths(
        handlers::health_handler,
        handlers::list_characters_handler,
        handlers::get_character_handler,
    ),
    components(schemas(CharacterRecord, CharacterPage, HealthCheck, HealthStatus, Environment)),
    tags(
        (name = "characters", description = "Character catalog operations"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
