//! User configuration file loading
//!
//! Settings come from, lowest to highest precedence: built-in defaults, the
//! first config file found, the `CODE_DIR` environment variable, and finally
//! command line flags.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::config::{
    get_search_concurrency, CONFIG_DIR_FILE_NAME, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DEFAULT_CODE_DIR_NAME,
};
use super::filter::Filters;
use super::search::SearchOptions;
use crate::utils::expand_home;

/// Errors raised while loading the config file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `.projector.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directories to search
    pub code_dirs: Vec<String>,
    /// Single root directory, merged into `code_dirs`
    pub code_dir: Option<String>,
    pub excludes: Vec<String>,
    pub includes: Vec<String>,
    pub jobs: Option<usize>,
    pub follow_symlinks: Option<bool>,
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads settings from a specific file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, otherwise the first existing default
    /// location. No file at all yields default settings.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for location in config_locations() {
            match location.try_exists() {
                Ok(true) => {
                    debug!(path = %location.display(), "loading config file");
                    return Self::from_file(&location);
                }
                Ok(false) => continue,
                Err(source) => {
                    return Err(SettingsError::Read {
                        path: location,
                        source,
                    })
                }
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Replaces the configured roots with the value of `CODE_DIR`, if set
    pub fn with_env_code_dir(mut self, code_dir: Option<String>) -> Self {
        if let Some(dir) = code_dir.filter(|d| !d.trim().is_empty()) {
            self.code_dir = None;
            self.code_dirs = vec![dir];
        }
        self
    }

    /// Applies command line overrides. Empty collections leave the file's
    /// values in place.
    pub fn with_overrides(
        mut self,
        code_dirs: Vec<String>,
        excludes: Vec<String>,
        includes: Vec<String>,
        jobs: Option<usize>,
    ) -> Self {
        if !code_dirs.is_empty() {
            self.code_dir = None;
            self.code_dirs = code_dirs;
        }
        if !excludes.is_empty() {
            self.excludes = excludes;
        }
        if !includes.is_empty() {
            self.includes = includes;
        }
        if jobs.is_some() {
            self.jobs = jobs;
        }
        self
    }

    /// Resolved search roots with `~` expanded. Falls back to `~/Code`.
    pub fn roots(&self, home: Option<&Path>) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = self
            .code_dir
            .iter()
            .chain(self.code_dirs.iter())
            .map(|dir| expand_home(dir, home))
            .collect();

        if roots.is_empty() {
            let base = home.map(Path::to_path_buf).unwrap_or_default();
            roots.push(base.join(DEFAULT_CODE_DIR_NAME));
        }

        roots.dedup();
        roots
    }

    pub fn filters(&self) -> Filters {
        Filters::new()
            .with_excludes(self.excludes.iter().cloned())
            .with_includes(self.includes.iter().cloned())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::default()
            .with_concurrency(get_search_concurrency(self.jobs))
            .with_follow_symlinks(self.follow_symlinks.unwrap_or(true))
    }
}

/// Config file locations in the order they are tried
pub fn config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(CONFIG_FILE_NAME));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_DIR_FILE_NAME));
    }
    locations
}
