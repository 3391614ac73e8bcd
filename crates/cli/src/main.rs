// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! builder - drive a CMake-style build tool through its phases

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod options;

use anyhow::{Context, Result};
use builder_adapters::{LocalProcessAdapter, TracedProcessAdapter};
use builder_core::{Settings, DEFAULT_SETTINGS_FILE};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::BuilderError;
use crate::options::{RunArgs, RunOptions};

#[derive(Parser)]
#[command(
    name = "builder",
    version,
    about = "Configure, build, install and package a CMake project"
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage output keeps the historical non-zero exit code
            return match e.kind() {
                ErrorKind::DisplayHelp => ExitCode::from(1),
                _ => exit_code(e.exit_code()),
            };
        }
    };

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("warning: {:#}", e);
    }

    match run(cli.run).await {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprint!("{}", err);
            exit_code(err.exit_code)
        }
    }
}

async fn run(args: RunArgs) -> Result<i32, BuilderError> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = Settings::load(&settings_path, args.settings.is_some())
        .map_err(BuilderError::invalid_settings)?;
    let options = RunOptions::resolve(&args, settings);

    tracing::debug!(?options, "resolved options");

    if let Some(timeout) = options.timeout {
        println!("building with timeout");
        println!("timeout is {}", timeout.as_secs());
    }

    let processes = TracedProcessAdapter::new(LocalProcessAdapter::new());
    let report = builder_engine::run(
        &options.tool,
        options.mode,
        options.config,
        options.timeout,
        processes,
        std::io::stdout(),
    )
    .await?;

    Ok(report.exit_code())
}

fn setup_logging(verbose: u8) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")
}

/// Map a phase exit code to a process exit code
///
/// Only the low byte survives on unix, so a non-zero code whose low byte
/// is zero (e.g. 256) is reported as 1 rather than success.
fn exit_code(code: i32) -> ExitCode {
    let low = (code & 0xff) as u8;
    if code != 0 && low == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::from(low)
    }
}
