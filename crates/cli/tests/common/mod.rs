// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.
//!
//! A test project is a temp directory laid out the way the builder expects:
//!
//! ```text
//! <root>/bin/cmake   fake build tool (shell script), logs its arguments
//! <root>/work/       working directory the builder runs in
//! <root>/calls.log   one line per tool invocation
//! ```

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONFIGURE_DEBUG: &str =
    "-H. -B_builds -DCMAKE_INSTALL_PREFIX=_install -DCMAKE_BUILD_TYPE=Debug";
pub const CONFIGURE_RELEASE: &str =
    "-H. -B_builds -DCMAKE_INSTALL_PREFIX=_install -DCMAKE_BUILD_TYPE=Release";
pub const BUILD: &str = "--build _builds";
pub const INSTALL: &str = "--build _builds --target install";
pub const PACKAGE: &str = "--build _builds --target package";

pub struct Project {
    root: TempDir,
}

impl Project {
    /// Project whose fake tool runs `body` after logging its arguments
    pub fn with_tool(body: &str) -> Self {
        let project = Self::without_tool();
        let bin = project.root().join("bin");
        fs::create_dir_all(&bin).expect("Failed to create bin dir");
        write_script(&bin.join("cmake"), &project.script(body));
        project
    }

    /// Project whose fake tool always succeeds
    pub fn succeeding() -> Self {
        Self::with_tool("exit 0")
    }

    /// Project with no build tool at the default location
    pub fn without_tool() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(root.path().join("work")).expect("Failed to create work dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root().join("work")
    }

    /// Script text for a fake tool that logs to this project's call log
    pub fn script(&self, body: &str) -> String {
        format!(
            "#!/bin/sh\necho \"$*\" >> '{}'\n{}\n",
            self.root().join("calls.log").display(),
            body
        )
    }

    /// Arguments of every tool invocation, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The builder binary, running in the work directory
    #[allow(deprecated)]
    pub fn builder(&self) -> Command {
        let mut cmd = Command::cargo_bin("builder").expect("builder binary not built");
        cmd.current_dir(self.work_dir())
            .env_remove("BUILDER_TOOL")
            .env_remove("RUST_LOG")
            .timeout(std::time::Duration::from_secs(60));
        cmd
    }
}

/// Write an executable shell script
pub fn write_script(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
    }
}

/// Tool body that exits with `code` when its arguments contain `pattern`
pub fn fail_when(pattern: &str, code: i32) -> String {
    format!("case \"$*\" in *\"{}\"*) exit {};; esac\nexit 0", pattern, code)
}
