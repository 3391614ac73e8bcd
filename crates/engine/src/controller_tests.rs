// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::PRECONDITION_EXIT_CODE;
use builder_adapters::{FakeProcessAdapter, TracedProcessAdapter};
use builder_core::TIMEOUT_EXIT_CODE;
use tempfile::TempDir;
use yare::parameterized;

const CONFIGURE: &str =
    "/opt/cmake -H. -B_builds -DCMAKE_INSTALL_PREFIX=_install -DCMAKE_BUILD_TYPE=Debug";
const BUILD: &str = "/opt/cmake --build _builds";
const INSTALL: &str = "/opt/cmake --build _builds --target install";
const PACKAGE: &str = "/opt/cmake --build _builds --target package";

fn controller(fake: &FakeProcessAdapter) -> Controller<FakeProcessAdapter, Vec<u8>> {
    Controller::new("/opt/cmake", fake.clone(), Vec::new())
}

fn output(controller: Controller<FakeProcessAdapter, Vec<u8>>) -> String {
    String::from_utf8(controller.into_output()).unwrap()
}

#[parameterized(
    default = { false, false, &[CONFIGURE, BUILD] },
    install = { true, false, &[CONFIGURE, BUILD, INSTALL] },
    pack = { false, true, &[CONFIGURE, BUILD, PACKAGE] },
    install_and_pack = { true, true, &[CONFIGURE, BUILD, INSTALL, PACKAGE] },
)]
#[test_macro(tokio::test)]
async fn mode_selects_command_sequence(install: bool, pack: bool, expected: &[&str]) {
    let fake = FakeProcessAdapter::new();
    let mut controller = controller(&fake);

    let report = controller
        .execute(Mode::from_flags(install, pack), BuildConfig::Debug, None)
        .await
        .unwrap();

    assert_eq!(fake.command_lines(), expected);
    assert_eq!(report.state, PipelineState::Succeeded);
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn release_config_reaches_configure_phase() {
    let fake = FakeProcessAdapter::new();
    let mut controller = controller(&fake);

    controller
        .execute(Mode::default(), BuildConfig::Release, None)
        .await
        .unwrap();

    assert_eq!(
        fake.command_lines()[0],
        "/opt/cmake -H. -B_builds -DCMAKE_INSTALL_PREFIX=_install -DCMAKE_BUILD_TYPE=Release"
    );
}

#[parameterized(
    configure = { "CMAKE_BUILD_TYPE", 1, Phase::Configure },
    build = { "--build _builds", 2, Phase::Build },
    install = { "--target install", 3, Phase::Install },
    package = { "--target package", 4, Phase::Package },
)]
#[test_macro(tokio::test)]
async fn failing_phase_stops_pipeline(pattern: &str, calls: usize, phase: Phase) {
    let fake = FakeProcessAdapter::new();
    fake.respond(pattern, PhaseResult::exited(3));
    let mut controller = controller(&fake);

    let report = controller
        .execute(Mode::from_flags(true, true), BuildConfig::Debug, None)
        .await
        .unwrap();

    assert_eq!(fake.calls().len(), calls);
    assert_eq!(report.exit_code(), 3);
    assert_eq!(report.results.last(), Some(&(phase, PhaseResult::exited(3))));
}

#[tokio::test]
async fn exit_code_is_returned_unchanged() {
    let fake = FakeProcessAdapter::new();
    fake.respond("CMAKE_BUILD_TYPE", PhaseResult::exited(42));
    let mut controller = controller(&fake);

    let report = controller
        .execute(Mode::default(), BuildConfig::Debug, None)
        .await
        .unwrap();

    assert_eq!(report.exit_code(), 42);
    assert_eq!(report.phases_run(), vec![Phase::Configure]);
}

#[tokio::test]
async fn timeout_is_passed_to_every_phase() {
    let fake = FakeProcessAdapter::new();
    let mut controller = controller(&fake);

    controller
        .execute(
            Mode::from_flags(true, true),
            BuildConfig::Debug,
            Some(Duration::from_secs(30)),
        )
        .await
        .unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls
        .iter()
        .all(|spec| spec.timeout == Some(Duration::from_secs(30))));
}

#[tokio::test]
async fn no_timeout_means_unbounded_phases() {
    let fake = FakeProcessAdapter::new();
    let mut controller = controller(&fake);

    controller
        .execute(Mode::default(), BuildConfig::Debug, Some(Duration::ZERO))
        .await
        .unwrap();

    assert!(fake.calls().iter().all(|spec| spec.timeout.is_none()));
}

#[tokio::test]
async fn timed_out_phase_fails_pipeline() {
    let fake = FakeProcessAdapter::new();
    fake.respond("--build _builds", PhaseResult::timed_out());
    let mut controller = controller(&fake);

    let report = controller
        .execute(
            Mode::from_flags(true, false),
            BuildConfig::Debug,
            Some(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert_eq!(report.exit_code(), TIMEOUT_EXIT_CODE);
    assert!(matches!(
        report.state,
        PipelineState::Failed {
            phase: Phase::Build,
            timed_out: true,
            ..
        }
    ));
    assert_eq!(fake.calls().len(), 2);

    let out = output(controller);
    assert!(out.contains("command(build) timed out after 5s"), "{}", out);
}

#[tokio::test]
async fn spawn_failure_aborts_immediately() {
    let fake = FakeProcessAdapter::new();
    fake.fail_spawn();
    let mut controller = controller(&fake);

    let err = controller
        .execute(Mode::from_flags(true, true), BuildConfig::Debug, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Process {
            phase: Phase::Configure,
            ..
        }
    ));
    assert_eq!(err.exit_code(), crate::SPAWN_EXIT_CODE);
    assert_eq!(fake.calls().len(), 1);
}

#[tokio::test]
async fn trace_lists_commands_and_exit_codes() {
    let fake = FakeProcessAdapter::new();
    let mut controller = controller(&fake);

    controller
        .execute(Mode::default(), BuildConfig::Debug, None)
        .await
        .unwrap();

    let out = output(controller);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("used command: ${}", CONFIGURE).as_str(),
            "command(configure) exit code: 0",
            format!("used command: ${}", BUILD).as_str(),
            "command(build) exit code: 0",
        ]
    );
}

#[tokio::test]
async fn trace_explains_gating() {
    let fake = FakeProcessAdapter::new();
    fake.respond("CMAKE_BUILD_TYPE", PhaseResult::exited(1));
    let mut controller = controller(&fake);

    controller
        .execute(Mode::default(), BuildConfig::Debug, None)
        .await
        .unwrap();

    let out = output(controller);
    assert!(
        out.contains("Configure exit code is not 0, cannot start build process. Exit."),
        "{}",
        out
    );
}

#[tokio::test]
async fn rerun_repeats_same_invocations() {
    let fake = FakeProcessAdapter::new();
    let mode = Mode::from_flags(true, false);

    let mut first = controller(&fake);
    first.execute(mode, BuildConfig::Debug, None).await.unwrap();
    let mut second = controller(&fake);
    second.execute(mode, BuildConfig::Debug, None).await.unwrap();

    let lines = fake.command_lines();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[..3], lines[3..]);
}

#[tokio::test]
async fn run_with_missing_tool_spawns_nothing() {
    let dir = TempDir::new().unwrap();
    let fake = FakeProcessAdapter::new();

    let err = run(
        &dir.path().join("bin/cmake"),
        Mode::from_flags(true, true),
        BuildConfig::Debug,
        None,
        fake.clone(),
        Vec::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), PRECONDITION_EXIT_CODE);
    assert!(fake.calls().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn run_with_located_tool_uses_canonical_path() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("cmake");
    std::fs::write(&tool, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
    let fake = FakeProcessAdapter::new();

    let report = run(
        &tool,
        Mode::default(),
        BuildConfig::Debug,
        None,
        TracedProcessAdapter::new(fake.clone()),
        Vec::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.exit_code(), 0);
    assert_eq!(fake.calls()[0].program, tool.canonicalize().unwrap());
}
