// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local process adapter
//!
//! Runs the build tool directly (no shell) with stdout and stderr inherited,
//! so build output streams live to the console. On unix the child leads its
//! own process group. Whatever is left in that group when the phase ends is
//! killed: on timeout, on Ctrl-C, and after the leader exits, so sub-compilers
//! never outlive their phase.

use super::{ProcessAdapter, ProcessError};
use async_trait::async_trait;
use builder_core::{PhaseResult, PhaseSpec};
use std::future::Future;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

/// Exit code reported for a phase interrupted by Ctrl-C (128 + SIGINT)
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Process adapter backed by real OS processes
#[derive(Clone, Default)]
pub struct LocalProcessAdapter {
    cwd: Option<PathBuf>,
}

/// How a supervised phase came to an end
#[derive(Debug)]
enum Outcome {
    Exited(ExitStatus),
    TimedOut,
    Interrupted,
}

impl LocalProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run phases in `cwd` instead of the current directory
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }

    fn command(&self, spec: &PhaseSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }

    /// Run `spec`, treating completion of `interrupt` as an operator abort
    async fn run_until<F>(
        &self,
        spec: &PhaseSpec,
        interrupt: F,
    ) -> Result<PhaseResult, ProcessError>
    where
        F: Future<Output = ()> + Send,
    {
        let mut child = self
            .command(spec)
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                program: spec.program.clone(),
                source,
            })?;
        // The child was spawned with process_group(0), so its pid is the pgid.
        // Captured now because tokio forgets the pid once the child is reaped.
        let group = child.id();

        let outcome = supervise(&mut child, spec.timeout, interrupt).await;
        kill_group(group);

        let outcome = outcome.map_err(|source| ProcessError::WaitFailed {
            program: spec.program.clone(),
            source,
        })?;

        Ok(match outcome {
            Outcome::Exited(status) => PhaseResult::exited(exit_code(status)),
            Outcome::TimedOut => {
                tracing::warn!(
                    program = %spec.program.display(),
                    timeout_secs = spec.timeout.map(|t| t.as_secs_f64()),
                    "timeout expired, killed process group"
                );
                PhaseResult::timed_out()
            }
            Outcome::Interrupted => {
                tracing::warn!(
                    program = %spec.program.display(),
                    "interrupted, killed process group"
                );
                PhaseResult::exited(INTERRUPTED_EXIT_CODE)
            }
        })
    }
}

#[async_trait]
impl ProcessAdapter for LocalProcessAdapter {
    async fn run(&self, spec: &PhaseSpec) -> Result<PhaseResult, ProcessError> {
        self.run_until(spec, ctrl_c()).await
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::debug!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Wait for the leader, bounded by `limit` and cut short by `interrupt`
async fn supervise<F>(
    child: &mut Child,
    limit: Option<std::time::Duration>,
    interrupt: F,
) -> std::io::Result<Outcome>
where
    F: Future<Output = ()>,
{
    let deadline = async {
        match limit {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };

    let outcome = tokio::select! {
        status = child.wait() => return status.map(Outcome::Exited),
        _ = deadline => Outcome::TimedOut,
        _ = interrupt => Outcome::Interrupted,
    };

    // Leader only; the caller kills the rest of the group
    if let Err(e) = child.start_kill() {
        tracing::debug!(error = %e, "leader already gone");
    }
    child.wait().await?;
    Ok(outcome)
}

/// SIGKILL every process left in the phase's group
#[cfg(unix)]
fn kill_group(group: Option<u32>) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = group else {
        return;
    };
    match killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        Ok(()) => tracing::debug!(pgid, "killed leftover processes"),
        Err(Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pgid, error = %e, "killpg failed"),
    }
}

#[cfg(not(unix))]
fn kill_group(_group: Option<u32>) {}

/// Map an exit status to a shell-style exit code
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
