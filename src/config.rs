use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::storage::STORAGE_FILE;

const APP_NAME: &str = "strimly";
const CONFIG_FILENAME: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page the share links point at.
    pub share_base_url: String,
    /// Host the players are embedded in. Twitch checks it against `parent`.
    pub embed_parent: String,
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            share_base_url: "http://localhost:8000/".to_string(),
            embed_parent: "localhost".to_string(),
            storage_path: None,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir.join(CONFIG_FILENAME))
    }

    /// Loads the config at `path`, or the default one if the file is missing.
    pub fn load(path: &Path) -> Result<Config> {
        match File::open(path) {
            Ok(file) => {
                log::info!("loading config: {:?}", path);
                serde_json::from_reader(file).with_context(|| format!("failed parsing config at {}", path.display()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err).with_context(|| format!("failed reading config at {}", path.display())),
        }
    }

    /// Loads from the platform config directory, falling back to defaults.
    pub fn load_default() -> Result<Config> {
        match Self::config_path() {
            Some(path) => Self::load(&path),
            None => {
                log::warn!("unable to determine config directory, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }
        Self::app_dirs()
            .map(|dirs| dirs.data_dir.join(STORAGE_FILE))
            .context("unable to determine user data directory")
    }
}
