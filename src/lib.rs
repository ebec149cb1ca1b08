// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! Turns any string into a hexagonal SVG avatar and a three-word name.
//! The same input always gives the same picture and the same name.

use std::borrow::Cow;

pub mod colors;
pub mod config;
pub mod error;
pub mod features;
pub mod hash;
pub mod identicon;
pub mod indices;
pub mod naming;
pub mod words;

pub use colors::{ColorIndices, Colors};
pub use config::Settings;
pub use error::{IdenticonError, Result};
pub use features::{FeatureCatalog, Section, Sections};
pub use hash::{letter_code, make_hash};
pub use identicon::{IdenticonFormat, IdenticonParams};
pub use naming::{NameEntropy, Namer, FALLBACK_NAME};
pub use words::{WordCatalog, WordWidths};

/// Colors and fragments for `input` from the built-in feature catalog.
pub fn identicon_params(input: &str) -> Result<IdenticonParams<'static>> {
    IdenticonParams::derive(input, FeatureCatalog::embedded())
}

pub fn generate_identicon_markup(input: &str) -> Result<String> {
    create_identicon(input, IdenticonFormat::Svg)
}

pub fn generate_identicon_data_uri(input: &str) -> Result<String> {
    create_identicon(input, IdenticonFormat::DataUri)
}

pub fn create_identicon(input: &str, format: IdenticonFormat) -> Result<String> {
    let params = identicon_params(input)?;
    Ok(identicon::format_identicon(identicon::assemble_svg(&params), format))
}

/// Three-word name for `input`, or [`FALLBACK_NAME`] when no combination fits.
pub fn generate_name(input: &str) -> Result<String> {
    Ok(Namer::embedded()?.name(input))
}

/// Generator over a feature catalog and word tables, built-in or loaded.
#[derive(Debug, Clone)]
pub struct Identicons {
    features: Cow<'static, FeatureCatalog>,
    words: Cow<'static, WordCatalog>,
    widths: Cow<'static, WordWidths>,
}

impl Identicons {
    pub fn embedded() -> Result<Self> {
        let (words, widths) = words::embedded()?;
        Ok(Self {
            features: Cow::Borrowed(FeatureCatalog::embedded()),
            words: Cow::Borrowed(words),
            widths: Cow::Borrowed(widths),
        })
    }

    pub fn with_features(mut self, features: FeatureCatalog) -> Self {
        self.features = Cow::Owned(features);
        self
    }

    /// Swaps the word tables; the width table must cover the new catalog.
    pub fn with_words(mut self, words: WordCatalog, widths: WordWidths) -> Result<Self> {
        Namer::new(&words, &widths)?;
        self.words = Cow::Owned(words);
        self.widths = Cow::Owned(widths);
        Ok(self)
    }

    pub fn params(&self, input: &str) -> Result<IdenticonParams<'_>> {
        IdenticonParams::derive(input, &self.features)
    }

    pub fn create(&self, input: &str, format: IdenticonFormat) -> Result<String> {
        let params = self.params(input)?;
        Ok(identicon::format_identicon(identicon::assemble_svg(&params), format))
    }

    pub fn name(&self, input: &str) -> String {
        self.namer().name(input)
    }

    pub fn namer(&self) -> Namer<'_> {
        Namer::prevalidated(&self.words, &self.widths)
    }
}
