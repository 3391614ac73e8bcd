// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mode selection
//!
//! A mode decides which optional phases follow configure and build.

use crate::phase::Phase;
use std::fmt;

/// Operator-selected combination of optional phases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode {
    pub install: bool,
    pub pack: bool,
}

impl Mode {
    pub fn from_flags(install: bool, pack: bool) -> Self {
        Self { install, pack }
    }

    /// The ordered phases this mode runs
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = vec![Phase::Configure, Phase::Build];
        if self.install {
            phases.push(Phase::Install);
        }
        if self.pack {
            phases.push(Phase::Package);
        }
        phases
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.phases().iter().map(Phase::name).collect();
        f.write_str(&names.join(" -> "))
    }
}
