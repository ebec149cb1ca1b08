// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IdenticonError, Result};
use crate::identicon::IdenticonFormat;

pub const SETTINGS_FILE_NAME: &str = "chaosicon_settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub format: IdenticonFormat,
    /// Files are written here, one per input; printed to stdout when unset.
    pub output_dir: Option<PathBuf>,
    pub with_names: bool,
    // Catalog overrides; the embedded assets are used when unset
    pub assets_dir: Option<PathBuf>,
    pub words_path: Option<PathBuf>,
    pub widths_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: IdenticonFormat::Svg,
            output_dir: None,
            with_names: false,
            assets_dir: None,
            words_path: None,
            widths_path: None,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(SETTINGS_FILE_NAME)
    }

    pub fn load_from_disk(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|err| IdenticonError::io(path, err))?;
        let mut settings: Settings = serde_json::from_str(&data)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Missing file means defaults; a malformed one is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_disk(path)
        } else {
            log::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_disk(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| IdenticonError::io(parent, err))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|err| IdenticonError::io(path, err))?;
        Ok(())
    }

    fn sanitize(&mut self) {
        // Empty strings in the file mean "not set"
        for path in [
            &mut self.output_dir,
            &mut self.assets_dir,
            &mut self.words_path,
            &mut self.widths_path,
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                *path = None;
            }
        }
    }
}
