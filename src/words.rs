// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::colors::PALETTE_SIZE;
use crate::error::{IdenticonError, Result};
use crate::features::{Section, VARIANTS_PER_SECTION};
use crate::hash::letter_code;

static EMBEDDED_WORDS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/words.json"));
static EMBEDDED_WIDTHS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/word-widths.json"));

/// Nine words per feature variant: adjectives 0..3, verbs 3..6, nouns 6..9.
pub type WordFamily = [String; 9];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCatalog {
    pub face: Vec<WordFamily>,
    pub top: Vec<WordFamily>,
    pub sides: Vec<WordFamily>,
    pub bottom: Vec<WordFamily>,
    /// One word per palette color index.
    pub color: Vec<String>,
}

impl WordCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: WordCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| IdenticonError::io(path, err))?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        for section in Section::ALL {
            let found = self.section(section).len();
            if found != VARIANTS_PER_SECTION as usize {
                return Err(IdenticonError::InvalidWordCatalog(format!(
                    "section {section} has {found} families, expected {VARIANTS_PER_SECTION}"
                )));
            }
        }
        if self.color.len() != PALETTE_SIZE as usize {
            return Err(IdenticonError::InvalidWordCatalog(format!(
                "color table has {} entries, expected {PALETTE_SIZE}",
                self.color.len()
            )));
        }
        if let Some(word) = self.words().find(|w| w.trim().is_empty()) {
            return Err(IdenticonError::InvalidWordCatalog(format!("blank word {word:?}")));
        }
        Ok(())
    }

    pub fn section(&self, section: Section) -> &[WordFamily] {
        match section {
            Section::Face => &self.face,
            Section::Top => &self.top,
            Section::Sides => &self.sides,
            Section::Bottom => &self.bottom,
        }
    }

    /// Family for a raw feature index, reduced mod 21.
    pub fn family(&self, section: Section, index: u8) -> &WordFamily {
        let families = self.section(section);
        &families[index as usize % families.len()]
    }

    pub fn color_word(&self, index: u8) -> &str {
        &self.color[index as usize % self.color.len()]
    }

    /// Every word, duplicates included.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        Section::ALL
            .into_iter()
            .flat_map(|section| self.section(section).iter())
            .flat_map(|family| family.iter())
            .chain(self.color.iter())
            .map(String::as_str)
    }
}

/// Rendered pixel width per six-letter word code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordWidths(HashMap<String, u32>);

impl WordWidths {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| IdenticonError::io(path, err))?;
        Self::from_json(&content)
    }

    /// Builds a table from measured words. Words sharing a code keep the wider width.
    pub fn from_words<'a, I>(measured: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut widths: HashMap<String, u32> = HashMap::new();
        for (word, width) in measured {
            let entry = widths.entry(letter_code(word)).or_insert(width);
            *entry = (*entry).max(width);
        }
        Self(widths)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn by_code(&self, code: &str) -> Option<u32> {
        self.0.get(code).copied()
    }

    pub fn width_of(&self, word: &str) -> Option<u32> {
        self.by_code(&letter_code(word))
    }

    /// Fails on the first catalog word without a width.
    pub fn check_covers(&self, catalog: &WordCatalog) -> Result<()> {
        for word in catalog.words() {
            let code = letter_code(word);
            if !self.0.contains_key(&code) {
                return Err(IdenticonError::MissingWidth { word: word.to_string(), code });
            }
        }
        Ok(())
    }
}

/// Catalog and width table compiled into the binary, validated together once.
pub fn embedded() -> Result<&'static (WordCatalog, WordWidths)> {
    static TABLES: OnceLock<std::result::Result<(WordCatalog, WordWidths), String>> = OnceLock::new();
    let tables = TABLES.get_or_init(|| {
        let load = || -> Result<(WordCatalog, WordWidths)> {
            let catalog = WordCatalog::from_json(EMBEDDED_WORDS)?;
            let widths = WordWidths::from_json(EMBEDDED_WIDTHS)?;
            widths.check_covers(&catalog)?;
            Ok((catalog, widths))
        };
        load().map_err(|err| err.to_string())
    });
    tables
        .as_ref()
        .map_err(|reason| IdenticonError::InvalidWordCatalog(format!("embedded tables: {reason}")))
}

/// Synthetic catalog whose words spell out their position, e.g. `Top4w7`.
#[cfg(test)]
pub(crate) fn tiny_catalog() -> WordCatalog {
    let family = |prefix: String| -> WordFamily { std::array::from_fn(|i| format!("{prefix}{i}")) };
    let section = |name: &str| (0..21).map(|i| family(format!("{name}{i}w"))).collect();
    WordCatalog {
        face: section("Face"),
        top: section("Top"),
        sides: section("Sides"),
        bottom: section("Bottom"),
        color: (0..10).map(|i| format!("Color{i}")).collect(),
    }
}
