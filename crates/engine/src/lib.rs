// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Build pipeline controller

mod controller;
mod discovery;
mod error;

pub use controller::{run, Controller, RunReport};
pub use discovery::{locate_tool, DEFAULT_TOOL_PATH};
pub use error::{EngineError, PRECONDITION_EXIT_CODE, SPAWN_EXIT_CODE};
