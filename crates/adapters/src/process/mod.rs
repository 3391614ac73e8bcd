// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process adapters: run one phase and report how it ended

mod local;

pub use local::{LocalProcessAdapter, INTERRUPTED_EXIT_CODE};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProcessAdapter;

use async_trait::async_trait;
use builder_core::{PhaseResult, PhaseSpec};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from process operations
///
/// A phase that runs and exits non-zero is not an error; it is reported
/// through [`PhaseResult`].
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn {}: {source}", .program.display())]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for {}: {source}", .program.display())]
    WaitFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter that runs one phase to completion (or until its timeout)
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Spawn `spec.program` with `spec.args` and wait for it
    ///
    /// When `spec.timeout` is set and expires, the process and everything
    /// it spawned are killed and a timed-out result is returned.
    async fn run(&self, spec: &PhaseSpec) -> Result<PhaseResult, ProcessError>;
}
