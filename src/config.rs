//! Gallery configuration
//!
//! Loaded from an optional TOML file; every field has a default so an
//! absent file is the same as an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GalleryError, Result};

const APP_DIR: &str = "photo-gallery";
const DB_FILE: &str = "gallery.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Where the SQLite record store lives (defaults to the platform data dir)
    pub database_path: Option<PathBuf>,
    /// Seed example images when the gallery has never been saved
    pub seed_examples: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            seed_examples: true,
        }
    }
}

impl GalleryConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| GalleryError::Config(e.to_string()))
    }

    /// Read the config file at `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the database location.
    ///
    /// Without an explicit path this is, for example:
    /// - Linux: ~/.local/share/photo-gallery/gallery.db
    /// - macOS: ~/Library/Application Support/photo-gallery/gallery.db
    /// - Windows: %APPDATA%\photo-gallery\gallery.db
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| GalleryError::Config("could not determine user data directory".into()))?;

        path.push(APP_DIR);
        path.push(DB_FILE);
        Ok(path)
    }
}
