// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build tool discovery

use crate::error::EngineError;
use std::path::{Path, PathBuf};

/// Where the build tool lives relative to the working directory
pub const DEFAULT_TOOL_PATH: &str = "../bin/cmake";

/// Check that the build tool exists and is runnable
///
/// Returns the canonical path so later phases do not depend on lookups
/// relative to the working directory.
pub fn locate_tool(path: &Path) -> Result<PathBuf, EngineError> {
    let not_found = || EngineError::ToolNotFound {
        path: path.to_path_buf(),
    };

    let metadata = std::fs::metadata(path).map_err(|_| not_found())?;
    if !metadata.is_file() {
        return Err(not_found());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(EngineError::ToolNotExecutable {
                path: path.to_path_buf(),
            });
        }
    }

    let located = path.canonicalize().map_err(|_| not_found())?;
    tracing::debug!(tool = %located.display(), "located build tool");
    Ok(located)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
