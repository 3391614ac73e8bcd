// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline controller
//!
//! Runs the phases selected by a mode one after another, building each
//! phase's command line just before it runs and stopping at the first
//! non-zero exit. A human-readable trace of every command and its exit code
//! is written to the operator output.

use crate::discovery::locate_tool;
use crate::error::EngineError;
use builder_adapters::ProcessAdapter;
use builder_core::{
    BuildConfig, Mode, Phase, PhaseResult, Pipeline, PipelineState, RunContext,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happened during one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Every phase that ran, in order
    pub results: Vec<(Phase, PhaseResult)>,
    pub state: PipelineState,
}

impl RunReport {
    /// 0 on success, otherwise the failing phase's exit code
    pub fn exit_code(&self) -> i32 {
        match self.state {
            PipelineState::Succeeded => 0,
            PipelineState::Failed { exit_code, .. } => exit_code,
            // execute() only returns terminal states
            _ => 1,
        }
    }

    pub fn phases_run(&self) -> Vec<Phase> {
        self.results.iter().map(|(phase, _)| *phase).collect()
    }
}

/// Drives a pipeline against one build tool
pub struct Controller<P, W> {
    tool: PathBuf,
    processes: P,
    out: W,
}

impl<P, W> Controller<P, W>
where
    P: ProcessAdapter,
    W: Write,
{
    pub fn new(tool: impl Into<PathBuf>, processes: P, out: W) -> Self {
        Self {
            tool: tool.into(),
            processes,
            out,
        }
    }

    /// Consume the controller, returning the operator output
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every phase of `mode` until one fails or all succeed
    ///
    /// Only a process that cannot be created or waited on is an error; a
    /// phase exiting non-zero (or timing out) ends the run with that code.
    pub async fn execute(
        &mut self,
        mode: Mode,
        config: BuildConfig,
        timeout: Option<Duration>,
    ) -> Result<RunReport, EngineError> {
        let mut ctx = RunContext::new(config, timeout);
        let mut pipeline = Pipeline::new(mode).start();
        let mut results = Vec::new();

        tracing::info!(
            tool = %self.tool.display(),
            %mode,
            %config,
            timeout_secs = ctx.timeout.map(|t| t.as_secs_f64()),
            "pipeline starting"
        );

        while let Some(phase) = pipeline.current_phase() {
            let spec = phase.spec(&self.tool, &ctx);
            self.trace(format_args!("used command: ${}", spec.command_line()));

            let result = match self.processes.run(&spec).await {
                Ok(result) => result,
                Err(source) => {
                    self.trace(format_args!("command({}) could not be started", phase));
                    tracing::error!(%phase, error = %source, "aborting pipeline");
                    return Err(EngineError::Process { phase, source });
                }
            };

            if result.timed_out {
                let limit = ctx.timeout.unwrap_or_default();
                self.trace(format_args!(
                    "command({}) timed out after {:?} and was terminated, exit code: {}",
                    phase, limit, result.exit_code
                ));
            } else {
                self.trace(format_args!(
                    "command({}) exit code: {}",
                    phase, result.exit_code
                ));
            }

            ctx.record(phase, result);
            results.push((phase, result));
            pipeline = pipeline.transition(result);
        }

        if let PipelineState::Failed { phase, .. } = pipeline.state {
            if let Some(next) = next_phase(pipeline.phases(), phase) {
                self.trace(format_args!(
                    "{} exit code is not 0, cannot start {} process. Exit.",
                    capitalize(phase.name()),
                    next
                ));
            }
        }

        tracing::info!(
            state = %pipeline.state,
            last = ?ctx.last_result(),
            "pipeline finished"
        );

        Ok(RunReport {
            results,
            state: pipeline.state,
        })
    }

    fn trace(&mut self, line: std::fmt::Arguments<'_>) {
        // Operator trace only; a closed stdout must not fail the build
        let _ = writeln!(self.out, "{}", line);
    }
}

/// Locate the build tool, then run the pipeline
///
/// A missing tool is reported before any process is spawned.
pub async fn run<P, W>(
    tool: &Path,
    mode: Mode,
    config: BuildConfig,
    timeout: Option<Duration>,
    processes: P,
    out: W,
) -> Result<RunReport, EngineError>
where
    P: ProcessAdapter,
    W: Write,
{
    let tool = locate_tool(tool)?;
    Controller::new(tool, processes, out)
        .execute(mode, config, timeout)
        .await
}

fn next_phase(phases: &[Phase], current: Phase) -> Option<Phase> {
    let index = phases.iter().position(|p| *p == current)?;
    phases.get(index + 1).copied()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
