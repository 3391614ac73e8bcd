// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline state machine
//!
//! A pipeline walks a fixed list of phases, chosen once from the mode.
//! Every phase is gated on the previous one exiting with status zero; the
//! first failure is terminal.

use crate::mode::Mode;
use crate::phase::{Phase, PhaseResult, TIMEOUT_EXIT_CODE};
use std::fmt;

/// Where a pipeline is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Configuring,
    Building,
    Installing,
    Packaging,
    Succeeded,
    Failed {
        phase: Phase,
        exit_code: i32,
        timed_out: bool,
    },
}

impl PipelineState {
    /// The running state for a phase
    pub fn running(phase: Phase) -> Self {
        match phase {
            Phase::Configure => PipelineState::Configuring,
            Phase::Build => PipelineState::Building,
            Phase::Install => PipelineState::Installing,
            Phase::Package => PipelineState::Packaging,
        }
    }

    /// The phase being run in this state, if any
    pub fn phase(&self) -> Option<Phase> {
        match self {
            PipelineState::Configuring => Some(Phase::Configure),
            PipelineState::Building => Some(Phase::Build),
            PipelineState::Installing => Some(Phase::Install),
            PipelineState::Packaging => Some(Phase::Package),
            PipelineState::Idle | PipelineState::Succeeded | PipelineState::Failed { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Succeeded | PipelineState::Failed { .. }
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => f.write_str("idle"),
            PipelineState::Configuring => f.write_str("configuring"),
            PipelineState::Building => f.write_str("building"),
            PipelineState::Installing => f.write_str("installing"),
            PipelineState::Packaging => f.write_str("packaging"),
            PipelineState::Succeeded => f.write_str("succeeded"),
            PipelineState::Failed {
                phase,
                exit_code,
                timed_out: true,
            } => write!(f, "failed ({} timed out, exit code {})", phase, exit_code),
            PipelineState::Failed {
                phase, exit_code, ..
            } => write!(f, "failed ({} exited with {})", phase, exit_code),
        }
    }
}

/// An ordered, immutable list of phases plus the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    phases: Vec<Phase>,
    cursor: usize,
    pub state: PipelineState,
}

impl Pipeline {
    pub fn new(mode: Mode) -> Self {
        Self {
            phases: mode.phases(),
            cursor: 0,
            state: PipelineState::Idle,
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Leave `Idle` and enter the first phase
    pub fn start(mut self) -> Self {
        if self.state == PipelineState::Idle {
            self.state = match self.phases.first() {
                Some(phase) => PipelineState::running(*phase),
                None => PipelineState::Succeeded,
            };
        }
        self
    }

    /// Phase that should run next, or `None` once idle or terminal
    pub fn current_phase(&self) -> Option<Phase> {
        self.state.phase()
    }

    /// Apply the result of the current phase
    ///
    /// A zero exit code advances to the next phase in the list (or to
    /// `Succeeded` after the last one); anything else is terminal. Idle and
    /// terminal pipelines are returned unchanged.
    pub fn transition(mut self, result: PhaseResult) -> Self {
        let Some(phase) = self.current_phase() else {
            return self;
        };

        if !result.success() {
            // A failed phase never reports zero, even if killed after exiting cleanly
            let exit_code = match result.exit_code {
                0 => TIMEOUT_EXIT_CODE,
                code => code,
            };
            self.state = PipelineState::Failed {
                phase,
                exit_code,
                timed_out: result.timed_out,
            };
            return self;
        }

        self.cursor += 1;
        self.state = match self.phases.get(self.cursor) {
            Some(next) => PipelineState::running(*next),
            None => PipelineState::Succeeded,
        };
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Final process exit code once the pipeline is terminal
    pub fn exit_code(&self) -> Option<i32> {
        match self.state {
            PipelineState::Succeeded => Some(0),
            PipelineState::Failed { exit_code, .. } => Some(exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
