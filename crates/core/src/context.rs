// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run context threaded through the pipeline

use crate::config::BuildConfig;
use crate::phase::{Phase, PhaseResult};
use std::time::Duration;

/// Inputs shared by every phase of one run, plus the latest result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub config: BuildConfig,
    /// Bound applied to every phase; `None` waits indefinitely
    pub timeout: Option<Duration>,
    last: Option<(Phase, PhaseResult)>,
}

impl RunContext {
    pub fn new(config: BuildConfig, timeout: Option<Duration>) -> Self {
        Self {
            config,
            timeout: timeout.filter(|t| !t.is_zero()),
            last: None,
        }
    }

    pub fn record(&mut self, phase: Phase, result: PhaseResult) {
        self.last = Some((phase, result));
    }

    pub fn last_result(&self) -> Option<(Phase, PhaseResult)> {
        self.last
    }
}
