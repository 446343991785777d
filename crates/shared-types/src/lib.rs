// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the character catalog service
//!
//! This crate provides the normalized character record and the pagination value
//! that are shared between the provider clients and the HTTP edge, avoiding
//! circular dependencies between them.

pub mod character;
pub mod pagination;

pub use character::{CharacterId, CharacterRecord};
pub use pagination::{DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET, MAX_PAGE_LIMIT, Page};
