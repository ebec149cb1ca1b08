// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::error::{IdenticonError, Result};
use crate::indices::FeatureIndices;

pub const VARIANTS_PER_SECTION: u32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Face,
    Top,
    Sides,
    Bottom,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Face, Section::Top, Section::Sides, Section::Bottom];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Face => "face",
            Section::Top => "top",
            Section::Sides => "sides",
            Section::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("unknown section {s:?}"))
    }
}

/// 1-based variant for a raw index: `|index rem 21| + 1`, always in 1..=21.
pub fn selector(index: i32) -> u32 {
    (index % VARIANTS_PER_SECTION as i32).unsigned_abs() + 1
}

/// Catalog key, e.g. `face/face_01.svg`.
pub fn asset_key(section: Section, selector: u32) -> String {
    format!("{0}/{0}_{1:02}.svg", section.as_str(), selector)
}

fn all_keys() -> impl Iterator<Item = String> {
    Section::ALL
        .into_iter()
        .flat_map(|section| (1..=VARIANTS_PER_SECTION).map(move |sel| asset_key(section, sel)))
}

macro_rules! embedded_features {
    ($($section:literal: $($nn:literal)+;)+) => {
        &[$($(
            (
                concat!($section, "/", $section, "_", $nn, ".svg"),
                include_str!(concat!(
                    env!("CARGO_MANIFEST_DIR"), "/assets/features/", $section, "/", $section, "_", $nn, ".svg"
                )),
            ),
        )+)+]
    };
}

static EMBEDDED_FEATURES: &[(&str, &str)] = embedded_features! {
    "face": "01" "02" "03" "04" "05" "06" "07" "08" "09" "10" "11" "12" "13" "14" "15" "16" "17" "18" "19" "20" "21";
    "top": "01" "02" "03" "04" "05" "06" "07" "08" "09" "10" "11" "12" "13" "14" "15" "16" "17" "18" "19" "20" "21";
    "sides": "01" "02" "03" "04" "05" "06" "07" "08" "09" "10" "11" "12" "13" "14" "15" "16" "17" "18" "19" "20" "21";
    "bottom": "01" "02" "03" "04" "05" "06" "07" "08" "09" "10" "11" "12" "13" "14" "15" "16" "17" "18" "19" "20" "21";
};

/// The four resolved fragments of one identicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections<'a> {
    pub face: &'a str,
    pub top: &'a str,
    pub sides: &'a str,
    pub bottom: &'a str,
}

/// Read-only map from `<section>/<section>_NN.svg` to SVG markup.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    assets: HashMap<String, String>,
}

impl FeatureCatalog {
    /// Builds a catalog and checks all 84 variants are present.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let assets = entries
            .into_iter()
            .map(|(key, svg)| (key.into(), svg.as_ref().trim().to_string()))
            .collect();
        let catalog = Self { assets };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Catalog compiled into the binary; parsed once per process.
    pub fn embedded() -> &'static Self {
        static CATALOG: OnceLock<FeatureCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self {
            assets: EMBEDDED_FEATURES
                .iter()
                .map(|(key, svg)| (key.to_string(), svg.trim().to_string()))
                .collect(),
        })
    }

    /// Loads every variant from `dir/<section>/<section>_NN.svg` concurrently.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tasks = JoinSet::new();

        for key in all_keys() {
            let path = dir.join(&key);
            tasks.spawn(async move {
                match tokio::fs::read_to_string(&path).await {
                    Ok(svg) => Ok((key, Some(svg))),
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok((key, None)),
                    Err(err) => Err(IdenticonError::io(path, err)),
                }
            });
        }

        let mut assets = HashMap::new();
        let mut missing = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (key, svg) = joined.map_err(|err| IdenticonError::io(dir, std::io::Error::other(err)))??;
            match svg {
                Some(svg) => {
                    assets.insert(key, svg.trim().to_string());
                }
                None => missing.push(key),
            }
        }

        if !missing.is_empty() {
            missing.sort();
            log::error!("{} feature asset(s) missing under {}", missing.len(), dir.display());
            return Err(IdenticonError::IncompleteFeatures { missing });
        }

        log::info!("Loaded {} feature assets from {}", assets.len(), dir.display());
        Ok(Self { assets })
    }

    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> = all_keys().filter(|key| !self.assets.contains_key(key)).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IdenticonError::IncompleteFeatures { missing })
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.assets.get(key).map(String::as_str)
    }

    pub fn section_to_svg(&self, section: Section, index: i32) -> Result<&str> {
        let selector = selector(index);
        let key = asset_key(section, selector);
        match self.get(&key) {
            Some(svg) => Ok(svg),
            None => {
                log::error!("No asset {key} for {section} index {index}");
                Err(IdenticonError::FeatureNotFound { section, index, selector, key })
            }
        }
    }

    pub fn sections_to_svg(&self, indices: FeatureIndices) -> Result<Sections<'_>> {
        Ok(Sections {
            face: self.section_to_svg(Section::Face, i32::from(indices.face))?,
            top: self.section_to_svg(Section::Top, i32::from(indices.top))?,
            sides: self.section_to_svg(Section::Sides, i32::from(indices.sides))?,
            bottom: self.section_to_svg(Section::Bottom, i32::from(indices.bottom))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_stays_in_range() {
        for index in 0..100 {
            let sel = selector(index);
            assert!((1..=21).contains(&sel), "index {index} -> {sel}");
        }
        assert_eq!(selector(0), 1);
        assert_eq!(selector(20), 21);
        assert_eq!(selector(21), 1);
        assert_eq!(selector(99), 16);
    }

    #[test]
    fn selector_of_negative_index_uses_truncated_remainder() {
        assert_eq!(selector(-1), 2);
        assert_eq!(selector(-21), 1);
        assert_eq!(selector(-22), 2);
    }

    #[test]
    fn asset_keys_are_zero_padded() {
        assert_eq!(asset_key(Section::Face, 1), "face/face_01.svg");
        assert_eq!(asset_key(Section::Bottom, 21), "bottom/bottom_21.svg");
    }

    #[test]
    fn section_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>(), Ok(section));
        }
        assert!("tail".parse::<Section>().is_err());
    }

    #[test]
    fn embedded_catalog_is_complete() {
        let catalog = FeatureCatalog::embedded();
        assert_eq!(catalog.len(), 84);
        catalog.validate().unwrap();
        for key in all_keys() {
            let svg = catalog.get(&key).unwrap();
            assert!(svg.starts_with('<') && svg.ends_with('>'), "{key}");
        }
    }

    #[test]
    fn section_to_svg_resolves_by_selector() {
        let catalog = FeatureCatalog::embedded();
        let first = catalog.get("face/face_01.svg").unwrap();
        assert_eq!(catalog.section_to_svg(Section::Face, 0).unwrap(), first);
        assert_eq!(catalog.section_to_svg(Section::Face, 21).unwrap(), first);
        assert_eq!(
            catalog.section_to_svg(Section::Face, -1).unwrap(),
            catalog.get("face/face_02.svg").unwrap()
        );
    }

    #[test]
    fn sections_to_svg_resolves_each_slot() {
        let catalog = FeatureCatalog::embedded();
        let sections = catalog
            .sections_to_svg(FeatureIndices { face: 51, top: 87, sides: 29, bottom: 63 })
            .unwrap();
        assert_eq!(sections.face, catalog.get("face/face_10.svg").unwrap());
        assert_eq!(sections.top, catalog.get("top/top_04.svg").unwrap());
        assert_eq!(sections.sides, catalog.get("sides/sides_09.svg").unwrap());
        assert_eq!(sections.bottom, catalog.get("bottom/bottom_01.svg").unwrap());
    }

    #[test]
    fn missing_asset_is_reported_with_selector() {
        let entries = FeatureCatalog::embedded()
            .assets
            .iter()
            .filter(|(key, _)| key.as_str() != "top/top_05.svg")
            .map(|(k, v)| (k.clone(), v.clone()));
        let partial = FeatureCatalog { assets: entries.collect() };

        match partial.section_to_svg(Section::Top, 25) {
            Err(IdenticonError::FeatureNotFound { section, index, selector, key }) => {
                assert_eq!(section, Section::Top);
                assert_eq!(index, 25);
                assert_eq!(selector, 5);
                assert_eq!(key, "top/top_05.svg");
            }
            other => panic!("unexpected {other:?}"),
        }

        match partial.validate() {
            Err(IdenticonError::IncompleteFeatures { missing }) => {
                assert_eq!(missing, vec!["top/top_05.svg".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_entries_rejects_incomplete_sets() {
        let err = FeatureCatalog::from_entries([("face/face_01.svg", "<g/>")]).unwrap_err();
        assert!(err.to_string().contains("83 asset(s)"), "{err}");
    }

    #[tokio::test]
    async fn load_dir_reads_all_variants() {
        let dir = tempfile::tempdir().unwrap();
        for key in all_keys() {
            let path = dir.path().join(&key);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, format!("<g id=\"{key}\"/>\n")).unwrap();
        }

        let catalog = FeatureCatalog::load_dir(dir.path()).await.unwrap();
        assert_eq!(catalog.len(), 84);
        assert_eq!(
            catalog.section_to_svg(Section::Sides, 3).unwrap(),
            "<g id=\"sides/sides_04.svg\"/>"
        );
    }

    #[tokio::test]
    async fn load_dir_reports_every_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let face = dir.path().join("face");
        std::fs::create_dir_all(&face).unwrap();
        std::fs::write(face.join("face_01.svg"), "<g/>").unwrap();

        match FeatureCatalog::load_dir(dir.path()).await {
            Err(IdenticonError::IncompleteFeatures { missing }) => {
                assert_eq!(missing.len(), 83);
                assert!(!missing.contains(&"face/face_01.svg".to_string()));
                assert_eq!(missing[0], "bottom/bottom_01.svg");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
