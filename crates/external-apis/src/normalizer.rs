// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Flattening of provider envelopes into [`CharacterRecord`]s

use shared_types::CharacterRecord;
use tracing::warn;

use crate::{
    envelope::{RawCharacter, RawEnvelope, RawResourceList, RawThumbnail, RawUrl},
    error::MarvelError,
};

/// Normalize every result of an envelope, preserving provider order
///
/// # Errors
///
/// Returns [`MarvelError::Normalization`] if any result lacks an `id` or `name`
pub fn normalize(envelope: RawEnvelope) -> Result<Vec<CharacterRecord>, MarvelError> {
    let container = envelope.data;

    if usize::try_from(container.count).ok() != Some(container.results.len()) {
        warn!(
            count = container.count,
            results = container.results.len(),
            "provider count disagrees with returned results, using results"
        );
    }

    container
        .results
        .into_iter()
        .map(normalize_character)
        .collect()
}

/// Normalize a single provider character
///
/// # Errors
///
/// Returns [`MarvelError::Normalization`] naming the first missing required field
pub fn normalize_character(raw: RawCharacter) -> Result<CharacterRecord, MarvelError> {
    let id = raw.id.ok_or(MarvelError::Normalization { field: "id" })?;
    let name = raw.name.ok_or(MarvelError::Normalization { field: "name" })?;

    Ok(CharacterRecord {
        id,
        name,
        description: raw.description,
        thumbnail_url: raw.thumbnail.as_ref().and_then(thumbnail_url),
        comics: resource_names(raw.comics),
        series: resource_names(raw.series),
        stories: resource_names(raw.stories),
        events: resource_names(raw.events),
        urls: raw
            .urls
            .as_ref()
            .and_then(|urls| urls.first())
            .map(|url| vec![format_url(url)]),
    })
}

fn thumbnail_url(thumbnail: &RawThumbnail) -> Option<String> {
    match (&thumbnail.path, &thumbnail.extension) {
        (Some(path), Some(extension)) => Some(format!("{path}.{extension}")),
        _ => None,
    }
}

fn resource_names(list: Option<RawResourceList>) -> Option<Vec<String>> {
    list?.items.map(|items| {
        items
            .into_iter()
            .map(|item| item.name.unwrap_or_default())
            .collect()
    })
}

fn format_url(url: &RawUrl) -> String {
    format!(
        "{}: {}",
        url.kind.as_deref().unwrap_or_default(),
        url.url.as_deref().unwrap_or_default()
    )
}
