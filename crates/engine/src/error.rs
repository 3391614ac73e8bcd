// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the pipeline controller

use builder_adapters::ProcessError;
use builder_core::Phase;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code when the build tool cannot be found before any phase runs
pub const PRECONDITION_EXIT_CODE: i32 = 127;

/// Exit code when a phase process could not be created
pub const SPAWN_EXIT_CODE: i32 = 126;

/// Fatal errors that abort a run
///
/// A phase exiting non-zero is not an error here; it ends the pipeline
/// normally with that exit code.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("build tool not found at {}", .path.display())]
    ToolNotFound { path: PathBuf },
    #[error("build tool at {} is not executable", .path.display())]
    ToolNotExecutable { path: PathBuf },
    #[error("{phase} phase could not run: {source}")]
    Process {
        phase: Phase,
        #[source]
        source: ProcessError,
    },
}

impl EngineError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ToolNotFound { .. } | EngineError::ToolNotExecutable { .. } => {
                PRECONDITION_EXIT_CODE
            }
            EngineError::Process { .. } => SPAWN_EXIT_CODE,
        }
    }
}
