// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build configuration selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from configuration parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown build configuration '{0}' (expected Debug or Release)")]
    UnknownBuildConfig(String),
}

/// Build type passed to the configure phase as `CMAKE_BUILD_TYPE`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildConfig {
    #[default]
    Debug,
    Release,
}

impl BuildConfig {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfig::Debug => "Debug",
            BuildConfig::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildConfig::Debug),
            "release" => Ok(BuildConfig::Release),
            _ => Err(ConfigError::UnknownBuildConfig(s.to_string())),
        }
    }
}

impl TryFrom<String> for BuildConfig {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildConfig> for String {
    fn from(config: BuildConfig) -> Self {
        config.as_str().to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
