// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! builder-core: pure data model for the build pipeline
//!
//! This crate provides:
//! - Phase definitions and the fixed build-tool argument templates
//! - Mode selection (which optional phases run)
//! - The pipeline state machine with exit-code gating
//! - The optional `builder.toml` settings model

pub mod config;
pub mod context;
pub mod mode;
pub mod phase;
pub mod pipeline;
pub mod settings;

pub use config::{BuildConfig, ConfigError};
pub use context::RunContext;
pub use mode::Mode;
pub use phase::{Phase, PhaseResult, PhaseSpec, TIMEOUT_EXIT_CODE};
pub use pipeline::{Pipeline, PipelineState};
pub use settings::{Settings, SettingsError, DEFAULT_SETTINGS_FILE};
