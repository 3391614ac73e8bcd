// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::process::{ProcessAdapter, ProcessError};
use async_trait::async_trait;
use builder_core::{PhaseResult, PhaseSpec};
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any ProcessAdapter
#[derive(Clone)]
pub struct TracedProcessAdapter<P> {
    inner: P,
}

impl<P> TracedProcessAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

/// Bare program names are resolved through PATH by the OS, so only
/// paths with a directory component can be checked up front.
fn has_directory(program: &Path) -> bool {
    program.is_absolute() || program.components().count() > 1
}

#[async_trait]
impl<P: ProcessAdapter> ProcessAdapter for TracedProcessAdapter<P> {
    async fn run(&self, spec: &PhaseSpec) -> Result<PhaseResult, ProcessError> {
        let span = tracing::info_span!("process.run", program = %spec.program.display());
        self.run_traced(spec).instrument(span).await
    }
}

impl<P: ProcessAdapter> TracedProcessAdapter<P> {
    async fn run_traced(&self, spec: &PhaseSpec) -> Result<PhaseResult, ProcessError> {
        tracing::info!(
            args = ?spec.args,
            timeout_secs = spec.timeout.map(|t| t.as_secs_f64()),
            "starting"
        );

        // Precondition: the program must still exist
        if has_directory(&spec.program) && !spec.program.exists() {
            tracing::error!("program does not exist");
            return Err(ProcessError::SpawnFailed {
                program: spec.program.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "program does not exist",
                ),
            });
        }

        let start = std::time::Instant::now();
        let result = self.inner.run(spec).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(r) if r.timed_out => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                exit_code = r.exit_code,
                "timed out"
            ),
            Ok(r) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                exit_code = r.exit_code,
                "exited"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "run failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
