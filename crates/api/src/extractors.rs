// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for improved error handling
//!
//! Axum's default query and path rejections answer with plain text. These
//! extractors report malformed parameters through [`ServerError`] so every 400
//! carries the same JSON body as the other errors.

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ServerError;

mod error_hints {
    pub const NUMERIC_PARAMETER: &str = "offset, limit and id must be non-negative integers";
}

/// Query string extractor that rejects malformed parameters with a JSON 400
#[derive(Debug)]
pub struct QueryExtractor<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServerError::ValidationError(format!(
                "invalid query parameters: {}; {}",
                rejection.body_text(),
                error_hints::NUMERIC_PARAMETER
            ))),
        }
    }
}

/// Path parameter extractor that rejects malformed segments with a JSON 400
#[derive(Debug)]
pub struct PathExtractor<T>(pub T);

impl<T, S> FromRequestParts<S> for PathExtractor<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServerError::ValidationError(format!(
                "invalid path parameter: {}; {}",
                rejection.body_text(),
                error_hints::NUMERIC_PARAMETER
            ))),
        }
    }
}
