// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::path::PathBuf;

use thiserror::Error;

use crate::features::Section;

pub type Result<T> = std::result::Result<T, IdenticonError>;

#[derive(Debug, Error)]
pub enum IdenticonError {
    /// A computed section/variant has no asset. Packaging defect, never retried.
    #[error("SVG file not found for {section} with index {index}/{selector}. Path {key}")]
    FeatureNotFound {
        section: Section,
        index: i32,
        selector: u32,
        key: String,
    },

    #[error("feature catalog is missing {} asset(s): {}", .missing.len(), .missing.join(", "))]
    IncompleteFeatures { missing: Vec<String> },

    #[error("invalid word catalog: {0}")]
    InvalidWordCatalog(String),

    #[error("word width table has no entry for {word:?} (code {code})")]
    MissingWidth { word: String, code: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IdenticonError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
