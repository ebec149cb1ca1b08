// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::fmt;

use crate::colors::ColorIndices;
use crate::features::Section;
use crate::hash::make_hash;

// Digest positions (keep in sync with the name derivation in naming.rs)
const POS_MAIN: usize = 0;
const POS_BACKGROUND: usize = 2;
const POS_FACE: usize = 3;
const POS_TOP: usize = 5;
const POS_SIDES: usize = 7;
const POS_BOTTOM: usize = 9;
const POS_ACCENT: usize = 11;

/// Decimal-digit string derived from an input; only read positionally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn of(input: &str) -> Self {
        Self(make_hash(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Single digit at `pos`. Non-digits (and positions past the end) read as 0.
    pub fn digit(&self, pos: usize) -> u8 {
        self.0
            .as_bytes()
            .get(pos)
            .and_then(|b| (*b as char).to_digit(10))
            .map_or(0, |d| d as u8)
    }

    /// Two-digit number starting at `pos`, 0..=99.
    pub fn pair(&self, pos: usize) -> u8 {
        self.digit(pos) * 10 + self.digit(pos + 1)
    }

    pub fn color_indices(&self) -> ColorIndices {
        ColorIndices {
            main: self.digit(POS_MAIN),
            background: self.digit(POS_BACKGROUND),
            accent: self.digit(POS_ACCENT),
        }
    }

    pub fn feature_indices(&self) -> FeatureIndices {
        FeatureIndices {
            face: self.pair(POS_FACE),
            top: self.pair(POS_TOP),
            sides: self.pair(POS_SIDES),
            bottom: self.pair(POS_BOTTOM),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw two-digit feature indices, before any modulo reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureIndices {
    pub face: u8,
    pub top: u8,
    pub sides: u8,
    pub bottom: u8,
}

impl FeatureIndices {
    pub fn get(&self, section: Section) -> u8 {
        match section {
            Section::Face => self.face,
            Section::Top => self.top,
            Section::Sides => self.sides,
            Section::Bottom => self.bottom,
        }
    }
}
