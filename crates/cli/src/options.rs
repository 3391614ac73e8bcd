// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run options: command-line flags merged over the settings file

use builder_core::{BuildConfig, Mode, Settings};
use builder_engine::DEFAULT_TOOL_PATH;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Build configuration for the configure phase [default: Debug]
    #[arg(long, value_name = "Debug|Release")]
    pub config: Option<BuildConfig>,

    /// Add the installation phase after a successful build
    #[arg(long)]
    pub install: bool,

    /// Add the packaging phase after a successful build (and install)
    #[arg(long)]
    pub pack: bool,

    /// Wall-clock limit for every phase, in seconds (0 = no limit)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Path to the build tool [default: ../bin/cmake]
    #[arg(long, env = "BUILDER_TOOL")]
    pub tool: Option<PathBuf>,

    /// Settings file [default: builder.toml, if present]
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

/// Everything the controller needs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub tool: PathBuf,
    pub mode: Mode,
    pub config: BuildConfig,
    pub timeout: Option<Duration>,
}

impl RunOptions {
    /// Flags and environment win over the settings file, which wins over
    /// the built-in defaults. Optional phases are enabled by either source.
    pub fn resolve(args: &RunArgs, settings: Settings) -> Self {
        let timeout = match args.timeout {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => settings.timeout,
        };

        Self {
            tool: args
                .tool
                .clone()
                .or(settings.tool)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL_PATH)),
            mode: Mode::from_flags(
                args.install || settings.install,
                args.pack || settings.pack,
            ),
            config: args.config.or(settings.config).unwrap_or_default(),
            timeout: timeout.filter(|t| !t.is_zero()),
        }
    }
}
