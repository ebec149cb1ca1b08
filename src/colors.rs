// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use serde::Serialize;

pub const PALETTE_SIZE: u8 = 10;

// Main and accent colors
pub static COLORS: [&str; PALETTE_SIZE as usize] = [
    "#FC8702", // orange
    "#D94432", // red
    "#E9B213", // yellow
    "#1A5493", // indigo
    "#0582CA", // blue
    "#5961A8", // purple
    "#21BCA5", // teal
    "#FA7268", // pink
    "#88B04B", // green
    "#795548", // brown
];

// Same hues except indigo and purple, which are darker so the body reads on them
pub static BACKGROUND_COLORS: [&str; PALETTE_SIZE as usize] = [
    "#FC8702", "#D94432", "#E9B213", "#1F2348", "#0582CA", "#5F4B8B", "#21BCA5", "#FA7268",
    "#88B04B", "#795548",
];

/// Palette indices for the three color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorIndices {
    pub main: u8,
    pub background: u8,
    pub accent: u8,
}

impl ColorIndices {
    /// Bumps `main` off `background`, then `accent` off both, wrapping at 10.
    pub fn resolve(self) -> Self {
        let bump = |index: u8| (index + 1) % PALETTE_SIZE;

        let mut main = self.main % PALETTE_SIZE;
        let background = self.background % PALETTE_SIZE;
        let mut accent = self.accent % PALETTE_SIZE;

        if main == background {
            main = bump(main);
        }
        while accent == main || accent == background {
            accent = bump(accent);
        }

        Self { main, background, accent }
    }

    /// Main palette index as seen by the body; the accent slot is irrelevant to it.
    pub fn main_index(main: u8, background: u8) -> u8 {
        Self { main, background, accent: 0 }.resolve().main
    }

    pub fn to_colors(self) -> Colors {
        let resolved = self.resolve();
        Colors {
            main: COLORS[resolved.main as usize],
            background: BACKGROUND_COLORS[resolved.background as usize],
            accent: COLORS[resolved.accent as usize],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Colors {
    pub main: &'static str,
    pub background: &'static str,
    pub accent: &'static str,
}

pub fn colors_to_rgb(indices: ColorIndices) -> Colors {
    indices.to_colors()
}
