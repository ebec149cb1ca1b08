// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use crate::colors::ColorIndices;
use crate::error::Result;
use crate::features::Section;
use crate::indices::{Digest, FeatureIndices};
use crate::words::{self, WordCatalog, WordFamily, WordWidths};

pub const FALLBACK_NAME: &str = "Rare Shiny Bug";
pub const MAX_ROUNDS: u32 = 100;

// Badge layout in px: two lines of 74, or one line of 124, words 2px apart
const LINE_WIDTH: u32 = 74;
const NAME_WIDTH: u32 = 124;
const SPACE_WIDTH: u32 = 2;

const ADJECTIVES: std::ops::Range<usize> = 0..3;
const VERBS: std::ops::Range<usize> = 3..6;
const NOUNS: std::ops::Range<usize> = 6..9;

// Color slot index in the adjective position
const COLOR_SLOT: usize = 4;

/// Everything the word search reads from the input's two digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameEntropy {
    pub features: FeatureIndices,
    /// Which family supplies which word type (bumped once per round).
    pub feature_selectors: u32,
    /// Which of the legal tuples is picked.
    pub words_variation: u32,
    /// Resolved main palette index, for the color-word alternative.
    pub main_color: u8,
}

impl NameEntropy {
    pub fn derive(input: &str) -> Self {
        let hash1 = Digest::of(input);
        let hash2 = Digest::of(hash1.as_str());

        Self {
            features: hash1.feature_indices(),
            feature_selectors: u32::from(hash2.digit(0)) * 10 + u32::from(hash1.digit(0)),
            words_variation: u32::from(hash2.pair(1)),
            main_color: ColorIndices::main_index(hash1.digit(0), hash1.digit(2)),
        }
    }
}

// Four families, of which each word slot claims one. Positions are tracked
// instead of removed so the n-th pick always counts over what is left.
struct FamilyPool<'a> {
    families: [&'a WordFamily; 4],
    taken: [bool; 4],
}

impl<'a> FamilyPool<'a> {
    fn new(families: [&'a WordFamily; 4]) -> Self {
        Self { families, taken: [false; 4] }
    }

    fn nth(&self, n: usize) -> Option<&'a WordFamily> {
        (0..4).filter(|&i| !self.taken[i]).nth(n).map(|i| self.families[i])
    }

    fn take(&mut self, n: usize) -> Option<&'a WordFamily> {
        let pos = (0..4).filter(|&i| !self.taken[i]).nth(n)?;
        self.taken[pos] = true;
        Some(self.families[pos])
    }
}

/// Three-word names over a word catalog and its width table.
#[derive(Debug, Clone, Copy)]
pub struct Namer<'a> {
    catalog: &'a WordCatalog,
    widths: &'a WordWidths,
}

impl<'a> Namer<'a> {
    /// Checks every catalog word has a width before accepting the pair.
    pub fn new(catalog: &'a WordCatalog, widths: &'a WordWidths) -> Result<Self> {
        catalog.validate()?;
        widths.check_covers(catalog)?;
        Ok(Self { catalog, widths })
    }

    pub fn embedded() -> Result<Namer<'static>> {
        let (catalog, widths) = words::embedded()?;
        Ok(Namer::prevalidated(catalog, widths))
    }

    // Caller has already run the checks in `new`.
    pub(crate) fn prevalidated(catalog: &'a WordCatalog, widths: &'a WordWidths) -> Self {
        Self { catalog, widths }
    }

    pub fn name(&self, input: &str) -> String {
        self.words_by_entropy(&NameEntropy::derive(input))
    }

    /// Tries up to 100 rounds, shifting the feature selectors by one each time.
    pub fn words_by_entropy(&self, entropy: &NameEntropy) -> String {
        for round in 0..MAX_ROUNDS {
            let selectors = entropy.feature_selectors + round;
            if let Some(name) = self.word_round(entropy, selectors) {
                if round > 0 {
                    log::trace!("Name found after {} extra round(s)", round);
                }
                return name;
            }
        }

        log::warn!("No legal word combination in {} rounds, using fallback name", MAX_ROUNDS);
        FALLBACK_NAME.to_string()
    }

    /// One attempt at an (adjective, verb, noun) tuple. `None` when nothing fits.
    pub fn word_round(&self, entropy: &NameEntropy, feature_selectors: u32) -> Option<String> {
        let mut pool = FamilyPool::new(
            Section::ALL.map(|section| self.catalog.family(section, entropy.features.get(section))),
        );

        let idx2 = (feature_selectors % 2) as usize;
        let idx1 = (feature_selectors / 2 % 3) as usize;
        let idx0 = (feature_selectors / 6 % 5) as usize;

        // The body color stands in for the adjectives when idx0 is out of family range.
        let firsts: Vec<&str> = if idx0 == COLOR_SLOT {
            vec![self.catalog.color_word(entropy.main_color)]
        } else {
            pool.take(idx0)?[ADJECTIVES].iter().map(String::as_str).collect()
        };
        let verbs = &pool.take(idx1)?[VERBS];
        let nouns = &pool.nth(idx2)?[NOUNS];

        // Noun-major order; words_variation indexes into this positionally.
        let mut legal: Vec<[&str; 3]> = Vec::with_capacity(27);
        for noun in nouns {
            for verb in verbs {
                for first in &firsts {
                    let tuple = [*first, verb.as_str(), noun.as_str()];
                    if self.fits(tuple) {
                        legal.push(tuple);
                    }
                }
            }
        }

        if legal.is_empty() {
            log::trace!("Round with selectors {} has no fitting tuple", feature_selectors);
            return None;
        }

        let pick = entropy.words_variation as usize % legal.len();
        Some(legal[pick].join(" "))
    }

    pub fn width_of(&self, word: &str) -> Option<u32> {
        self.widths.width_of(word)
    }

    // Either line split must fit 74px, and the single line 124px.
    fn fits(&self, tuple: [&str; 3]) -> bool {
        let [w0, w1, w2] = match tuple.map(|word| self.width_of(word)) {
            [Some(w0), Some(w1), Some(w2)] => [w0, w1, w2],
            _ => return false,
        };

        let first_line = w0 + SPACE_WIDTH + w1;
        let second_line = w1 + SPACE_WIDTH + w2;
        if first_line > LINE_WIDTH && second_line > LINE_WIDTH {
            return false;
        }

        w0 + SPACE_WIDTH + w1 + SPACE_WIDTH + w2 <= NAME_WIDTH
    }
}
