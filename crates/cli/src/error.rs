// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostics printed when a run ends without a pipeline exit code.
//!
//! A diagnostic names the failure, the phase it hit (if any), the underlying
//! OS or parse error, what to try next, and the exit code `builder` returns.
//! Ordinary phase failures are not diagnostics; the controller already
//! reported them on stdout.

use builder_core::{Phase, SettingsError};
use builder_engine::{EngineError, PRECONDITION_EXIT_CODE, SPAWN_EXIT_CODE};
use std::error::Error as _;
use std::fmt;
use std::path::Path;

/// Exit code for errors detected before the pipeline starts (bad settings)
pub const USAGE_EXIT_CODE: i32 = 2;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// A fatal run error as shown to the operator
#[derive(Debug)]
pub struct BuilderError {
    pub message: String,
    /// Phase that was aborted, `None` when no phase was started
    pub phase: Option<Phase>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
    pub exit_code: i32,
    pub source: Option<Source>,
}

impl BuilderError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            phase: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
            exit_code,
            source: None,
        }
    }

    pub fn in_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Innermost error in the source chain, usually the OS error
    fn root_cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let mut cause = self.source()?;
        while let Some(next) = cause.source() {
            cause = next;
        }
        Some(cause)
    }
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        match self.phase {
            Some(phase) => writeln!(f, "  phase: {}", phase)?,
            None => writeln!(f, "  phase: none started")?,
        }
        if let Some(cause) = self.root_cause() {
            writeln!(f, "  cause: {}", cause)?;
        }
        for note in &self.notes {
            writeln!(f, "  note: {}", note)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "builder exited with code {}", self.exit_code)
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl BuilderError {
    pub fn tool_not_found(path: &Path) -> Self {
        BuilderError::new(
            format!("build tool not found at {}", path.display()),
            PRECONDITION_EXIT_CODE,
        )
        .with_note("the default location is ../bin/cmake relative to the working directory")
        .with_suggestion("Point at the tool explicitly: builder --tool /path/to/cmake")
        .with_suggestion("Or set BUILDER_TOOL, or `tool = \"...\"` in builder.toml")
    }

    pub fn tool_not_executable(path: &Path) -> Self {
        BuilderError::new(
            format!("build tool at {} is not executable", path.display()),
            PRECONDITION_EXIT_CODE,
        )
        .with_suggestion(format!("Make it executable: chmod +x {}", path.display()))
    }

    /// The settings file could not be read or parsed.
    pub fn invalid_settings(err: SettingsError) -> Self {
        let friendly = match &err {
            SettingsError::Io { path, .. } => {
                BuilderError::new(format!("cannot read {}", path.display()), USAGE_EXIT_CODE)
                    .with_suggestion("Check the path given to --settings")
            }
            SettingsError::Parse { path, .. } => {
                BuilderError::new(
                    format!("invalid settings in {}", path.display()),
                    USAGE_EXIT_CODE,
                )
                .with_suggestion("Valid keys are: tool, config, timeout, install, pack")
                .with_suggestion("Durations use units, e.g. timeout = \"90s\"")
            }
        };
        friendly.with_source(err)
    }
}

impl From<EngineError> for BuilderError {
    fn from(err: EngineError) -> Self {
        let friendly = match &err {
            EngineError::ToolNotFound { path } => BuilderError::tool_not_found(path),
            EngineError::ToolNotExecutable { path } => BuilderError::tool_not_executable(path),
            EngineError::Process { phase, .. } => BuilderError::new(
                format!("could not start the {} phase", phase),
                SPAWN_EXIT_CODE,
            )
            .in_phase(*phase)
            .with_note("later phases were not attempted")
            .with_suggestion("Check that the build tool was not removed mid-run"),
        };
        friendly.with_source(err)
    }
}
