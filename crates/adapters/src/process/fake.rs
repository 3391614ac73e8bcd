// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProcessAdapter, ProcessError};
use async_trait::async_trait;
use builder_core::{PhaseResult, PhaseSpec};
use std::sync::{Arc, Mutex};

/// A scripted response: the first rule whose pattern appears in the
/// command line decides the result
#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    result: PhaseResult,
}

/// Fake process adapter for testing
///
/// Every call is recorded. Unscripted commands succeed.
#[derive(Clone, Default)]
pub struct FakeProcessAdapter {
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<PhaseSpec>>>,
    spawn_fails: Arc<Mutex<bool>>,
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `result` for any command line containing `pattern`
    pub fn respond(&self, pattern: &str, result: PhaseResult) -> &Self {
        self.rules
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Rule {
                pattern: pattern.to_string(),
                result,
            });
        self
    }

    /// Make every subsequent spawn fail as if the binary had vanished
    pub fn fail_spawn(&self) {
        *self.spawn_fails.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PhaseSpec> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded calls rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(PhaseSpec::command_line).collect()
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn run(&self, spec: &PhaseSpec) -> Result<PhaseResult, ProcessError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(spec.clone());

        if *self.spawn_fails.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(ProcessError::SpawnFailed {
                program: spec.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake spawn failure"),
            });
        }

        let line = spec.command_line();
        let rules = self.rules.lock().unwrap_or_else(|e| e.into_inner());
        let result = rules
            .iter()
            .find(|rule| line.contains(&rule.pattern))
            .map(|rule| rule.result)
            .unwrap_or(PhaseResult::exited(0));

        Ok(result)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
