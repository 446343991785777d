// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory character source
//!
//! Serves a fixed dataset with the same ordering, slicing and search semantics as
//! the live provider. Used when no usable provider credentials are configured, and
//! in tests.

use std::sync::Arc;

use api_client::{CharacterSource, HealthStatus, SourceError};
use shared_types::{CharacterId, CharacterRecord, Page};
use tracing::debug;

const THUMBNAIL_BASE: &str = "https://i.annihil.us/u/prod/marvel/i/mg";

/// Character source backed by an immutable in-memory dataset
#[derive(Debug, Clone)]
pub struct StaticSource {
    characters: Arc<[CharacterRecord]>,
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::with_default_dataset()
    }
}

impl StaticSource {
    /// Create a source serving `characters` in the given order
    pub fn new(characters: Vec<CharacterRecord>) -> Self {
        Self {
            characters: characters.into(),
        }
    }

    /// Create a source serving the built-in six-character dataset
    pub fn with_default_dataset() -> Self {
        Self::new(default_dataset())
    }

    /// All characters, in source order
    pub fn characters(&self) -> &[CharacterRecord] {
        &self.characters
    }

    /// Characters windowed by `page`
    pub fn list(&self, page: Page) -> Vec<CharacterRecord> {
        page.slice(self.characters()).to_vec()
    }

    /// First character with the given id
    pub fn get(&self, id: CharacterId) -> Option<&CharacterRecord> {
        self.characters.iter().find(|character| character.id == id)
    }

    /// Characters whose name starts with `prefix` (case-insensitive), windowed by `page`
    pub fn search(&self, prefix: &str, page: Page) -> Vec<CharacterRecord> {
        let matches: Vec<&CharacterRecord> = self
            .characters
            .iter()
            .filter(|character| character.name_starts_with(prefix))
            .collect();

        page.slice(&matches).iter().map(|&c| c.clone()).collect()
    }
}

impl CharacterSource for StaticSource {
    async fn health_check(&self) -> Result<HealthStatus, SourceError> {
        Ok(HealthStatus::Up)
    }

    async fn list_characters(&self, page: Page) -> Result<Vec<CharacterRecord>, SourceError> {
        Ok(self.list(page))
    }

    async fn get_character_by_id(&self, id: CharacterId) -> Result<CharacterRecord, SourceError> {
        self.get(id).cloned().ok_or_else(|| {
            debug!("character {} not in static dataset", id);
            SourceError::NotFound { id }
        })
    }

    async fn search_by_name(
        &self,
        prefix: &str,
        page: Page,
    ) -> Result<Vec<CharacterRecord>, SourceError> {
        Ok(self.search(prefix, page))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(ToString::to_string).collect())
}

struct Entry<'a> {
    id: CharacterId,
    name: &'a str,
    description: &'a str,
    thumbnail: &'a str,
    comics: [&'a str; 3],
    series: [&'a str; 2],
    stories: [&'a str; 2],
    events: [&'a str; 2],
}

impl From<Entry<'_>> for CharacterRecord {
    fn from(entry: Entry<'_>) -> Self {
        CharacterRecord {
            id: entry.id,
            name: entry.name.to_string(),
            description: Some(entry.description.to_string()),
            thumbnail_url: Some(format!("{THUMBNAIL_BASE}/{}", entry.thumbnail)),
            comics: strings(&entry.comics),
            series: strings(&entry.series),
            stories: strings(&entry.stories),
            events: strings(&entry.events),
            urls: None,
        }
    }
}

fn default_dataset() -> Vec<CharacterRecord> {
    [
        Entry {
            id: 1_009_610,
            name: "Spider-Man",
            description: "Bitten by a radioactive spider, high school student Peter Parker gained the speed, strength and powers of a spider.",
            thumbnail: "3/50/526548a343e4b.jpg",
            comics: [
                "Amazing Spider-Man",
                "Spectacular Spider-Man",
                "Ultimate Spider-Man",
            ],
            series: ["Spider-Man Series", "Avengers"],
            stories: ["Origin Story", "First Appearance"],
            events: ["Civil War", "Secret Wars"],
        },
        Entry {
            id: 1_009_368,
            name: "Iron Man",
            description: "Wounded, captured and forced to build a weapon by his enemies, billionaire industrialist Tony Stark instead created an advanced suit of armor.",
            thumbnail: "9/c0/527bb7b37ff55.jpg",
            comics: ["Iron Man", "Avengers", "Tales of Suspense"],
            series: ["Iron Man Series", "Avengers"],
            stories: ["Demon in a Bottle", "Armor Wars"],
            events: ["Civil War", "Infinity War"],
        },
        Entry {
            id: 1_009_220,
            name: "Captain America",
            description: "Vowing to serve his country any way he could, young Steve Rogers took the super soldier serum to become America's one-man army.",
            thumbnail: "3/50/537ba56d31087.jpg",
            comics: [
                "Captain America",
                "Avengers",
                "Captain America: The Winter Soldier",
            ],
            series: ["Captain America Series", "Avengers"],
            stories: ["The First Avenger", "Winter Soldier"],
            events: ["Civil War", "Secret Empire"],
        },
        Entry {
            id: 1_009_664,
            name: "Thor",
            description: "As the Norse God of thunder and lightning, Thor wields one of the greatest weapons ever made, the enchanted hammer Mjolnir.",
            thumbnail: "d/d0/5269657a74350.jpg",
            comics: ["Thor", "Journey into Mystery", "The Mighty Thor"],
            series: ["Thor Series", "Avengers"],
            stories: ["God of Thunder", "Ragnarok"],
            events: ["Fear Itself", "War of the Realms"],
        },
        Entry {
            id: 1_009_351,
            name: "Hulk",
            description: "Caught in a gamma bomb explosion while trying to save the life of a teenager, Dr. Bruce Banner was transformed into the incredibly powerful creature called the Hulk.",
            thumbnail: "5/a0/538615ca33ab0.jpg",
            comics: ["Incredible Hulk", "Avengers", "Hulk"],
            series: ["Hulk Series", "Avengers"],
            stories: ["Planet Hulk", "World War Hulk"],
            events: ["World War Hulk", "Secret Wars"],
        },
        Entry {
            id: 1_009_189,
            name: "Black Widow",
            description: "Natasha Romanoff, former Russian spy, now Avenger.",
            thumbnail: "f/30/50fecad1f395b.jpg",
            comics: ["Black Widow", "Avengers", "Tales of Suspense"],
            series: ["Black Widow Series", "Avengers"],
            stories: ["Red Room", "Budapest Operation"],
            events: ["Secret Wars", "Infinity War"],
        },
    ]
    .into_iter()
    .map(CharacterRecord::from)
    .collect()
}
