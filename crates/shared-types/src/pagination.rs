// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Offset/limit pagination

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Offset used when the caller does not supply one
pub const DEFAULT_PAGE_OFFSET: u32 = 0;
/// Limit used when the caller does not supply one
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Largest limit the HTTP edge accepts before clamping
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A window into an ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    /// Number of entries to skip
    pub offset: u32,
    /// Maximum number of entries to return
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: DEFAULT_PAGE_OFFSET,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    /// Create a page with explicit bounds
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Create a page from optional bounds, falling back to the defaults
    pub fn from_parts(offset: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            offset: offset.unwrap_or(DEFAULT_PAGE_OFFSET),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }

    /// Same page with the limit capped at [`MAX_PAGE_LIMIT`]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.min(MAX_PAGE_LIMIT),
        }
    }

    /// Apply the window to an ordered slice
    ///
    /// Returns an empty slice when `offset` is at or past the end; otherwise the
    /// end index is `min(offset + limit, len)`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset as usize;
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }
}
