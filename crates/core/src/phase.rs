// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase definitions
//!
//! A phase is one invocation of the external build tool. Each phase has a
//! fixed argument template; only the configure phase takes a parameter
//! (the build configuration).

use crate::context::RunContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Exit code reported for a phase that was killed after its timeout expired
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Directory the build tool generates into
pub const BUILD_DIR: &str = "_builds";

/// Install prefix handed to the configure phase
pub const INSTALL_PREFIX: &str = "_install";

/// One step of the build pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Configure,
    Build,
    Install,
    Package,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Configure => "configure",
            Phase::Build => "build",
            Phase::Install => "install",
            Phase::Package => "package",
        }
    }

    /// Arguments passed to the build tool for this phase
    pub fn args(&self, ctx: &RunContext) -> Vec<String> {
        match self {
            Phase::Configure => vec![
                "-H.".to_string(),
                format!("-B{}", BUILD_DIR),
                format!("-DCMAKE_INSTALL_PREFIX={}", INSTALL_PREFIX),
                format!("-DCMAKE_BUILD_TYPE={}", ctx.config),
            ],
            Phase::Build => vec!["--build".to_string(), BUILD_DIR.to_string()],
            Phase::Install => target_args("install"),
            Phase::Package => target_args("package"),
        }
    }

    /// Build the invocation for this phase against the given tool
    pub fn spec(&self, tool: &Path, ctx: &RunContext) -> PhaseSpec {
        PhaseSpec::new(tool, self.args(ctx), ctx.timeout)
    }
}

fn target_args(target: &str) -> Vec<String> {
    vec![
        "--build".to_string(),
        BUILD_DIR.to_string(),
        "--target".to_string(),
        target.to_string(),
    ]
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved command line for one phase
///
/// Arguments are handed to the process as-is; nothing goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Upper bound on wall-clock time; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl PhaseSpec {
    /// A zero timeout is treated the same as no timeout.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: timeout.filter(|t| !t.is_zero()),
        }
    }

    /// Render the command line for display
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Outcome of running one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub exit_code: i32,
    /// True when the process was killed because it outlived its timeout
    pub timed_out: bool,
}

impl PhaseResult {
    pub fn exited(exit_code: i32) -> Self {
        Self {
            exit_code,
            timed_out: false,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            exit_code: TIMEOUT_EXIT_CODE,
            timed_out: true,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
