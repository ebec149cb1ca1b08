// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::colors::Colors;
use crate::error::Result;
use crate::features::{FeatureCatalog, Sections};
use crate::indices::Digest;

pub const SIZE: u32 = 160;

// Hexagon with rounded corners, clips everything below
const CLIP_PATH: &str = "m125.8 16.67 31.765 55.015a15.99 15.99 0 0 1 0 16L125.8 142.7c-2.85 4.95-8.135 8-13.85 8H48.415c-5.715 0-11-3.05-13.85-8L2.8 87.685a16.04 16.04 0 0 1 0-16L34.57 16.67a16 16 0 0 1 13.85-8h63.53c5.715 0 11 3.05 13.85 8";

pub const DEFAULT_SHADOW: &str = r##"<path fill="#010101" d="M119.21 80a39.46 39.46 0 0 1-67.13 28.13c10.36 2.33 36 3 49.82-14.28 10.39-12.47 8.31-33.23 4.16-43.26A39.35 39.35 0 0 1 119.21 80" opacity=".1"/>"##;

pub fn circle_shape(color: &str) -> String {
    format!(r#"<circle cx="80" cy="80" r="40" fill="{color}"/>"#)
}

/// Everything the assembler needs: resolved colors and the four fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdenticonParams<'a> {
    pub colors: Colors,
    pub sections: Sections<'a>,
}

impl<'a> IdenticonParams<'a> {
    pub fn derive(input: &str, catalog: &'a FeatureCatalog) -> Result<Self> {
        let digest = Digest::of(input);
        log::debug!("Identicon digest for {input:?}: {digest}");

        let sections = catalog.sections_to_svg(digest.feature_indices())?;
        let colors = digest.color_indices().to_colors();
        Ok(Self { colors, sections })
    }
}

/// Group fill is the accent and `color` the main color, so fragments can use
/// the default fill or `currentColor`. Layer order: top, sides, face, bottom.
pub fn assemble_svg(params: &IdenticonParams<'_>) -> String {
    let Colors { main, background, accent } = params.colors;
    let Sections { face, top, sides, bottom } = params.sections;

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}">"#,
            r#"<defs><clipPath id="a"><path d="{clip}"/></clipPath></defs>"#,
            r#"<g fill="{accent}" clip-path="url(#a)" color="{main}">"#,
            r#"<path fill="{background}" d="M0 0h{size}v{size}H0z"/>"#,
            "{circle}{shadow}{top}{sides}{face}{bottom}</g></svg>"
        ),
        size = SIZE,
        clip = CLIP_PATH,
        accent = accent,
        main = main,
        background = background,
        circle = circle_shape(main),
        shadow = DEFAULT_SHADOW,
        top = top,
        sides = sides,
        face = face,
        bottom = bottom,
    )
}

/// Output encoding. Unknown names fall back to raw markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdenticonFormat {
    #[default]
    Svg,
    DataUri,
}

impl IdenticonFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            IdenticonFormat::Svg => "svg",
            IdenticonFormat::DataUri => "image/svg+xml",
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        match s.trim() {
            "image/svg+xml" => IdenticonFormat::DataUri,
            "svg" => IdenticonFormat::Svg,
            other => {
                log::debug!("Unknown identicon format {other:?}, using svg");
                IdenticonFormat::Svg
            }
        }
    }
}

impl FromStr for IdenticonFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl From<String> for IdenticonFormat {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<IdenticonFormat> for String {
    fn from(format: IdenticonFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for IdenticonFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn format_identicon(svg: String, format: IdenticonFormat) -> String {
    match format {
        IdenticonFormat::DataUri => format!("data:image/svg+xml;base64,{}", encode_base64(svg.as_bytes())),
        IdenticonFormat::Svg => svg,
    }
}
