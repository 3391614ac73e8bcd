// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional `builder.toml` settings
//!
//! Every key is optional; command-line flags take precedence over the file.
//!
//! ```toml
//! tool = "/usr/local/bin/cmake"
//! config = "Release"
//! timeout = "10m"
//! install = true
//! ```

use crate::config::BuildConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "builder.toml";

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Path to the build tool executable
    pub tool: Option<PathBuf>,
    pub config: Option<BuildConfig>,
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub install: bool,
    #[serde(default)]
    pub pack: bool,
}

impl Settings {
    pub fn parse(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from `path`
    ///
    /// A missing file yields the defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
