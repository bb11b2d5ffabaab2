//! Checks that end the process. Each case re-runs this binary as a child that performs the
//! fatal check, and the parent inspects how the child died.

use std::process::{Command, Output};

use newengine_assert::{check_custom, check_fatal, ignore_all, set_handler, Action, HandlerRef, Report};

const CHILD_ENV: &str = "NEWENGINE_ASSERT_DEATH_CASE";

fn child_case() -> Option<String> {
    std::env::var(CHILD_ENV).ok()
}

fn run_child(case: &str) -> Output {
    let exe = std::env::current_exe().unwrap();
    Command::new(exe)
        .args(["death_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, case)
        .output()
        .unwrap()
}

/// Body of every child process. A no-op in the parent run.
#[test]
fn death_child() {
    let Some(case) = child_case() else {
        return;
    };

    set_handler(None);
    match case.as_str() {
        "fatal" => check_fatal!(false, "always false, always fails"),
        "custom-above-fatal" => check_custom!(1337, false),
        "handler-abort" => {
            let abort: HandlerRef = std::sync::Arc::new(|_: &Report<'_>| Action::Abort);
            set_handler(Some(abort));
            check_custom!(0, false);
        }
        "ignored" => {
            ignore_all(true);
            check_fatal!(false);
        }
        _ => {}
    }
}

#[test]
fn fatal_check_aborts_under_default_handler() {
    let out = run_child("fatal");
    assert!(!out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Assertion 'false' failed (FATAL)"), "{stderr}");
    assert!(stderr.contains("  with message: always false, always fails"), "{stderr}");
}

#[test]
fn levels_above_fatal_abort_too() {
    let out = run_child("custom-above-fatal");
    assert!(!out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed (level = 1337)"), "{stderr}");
}

#[test]
fn abort_action_ends_the_process_at_any_level() {
    let out = run_child("handler-abort");
    assert!(!out.status.success());
}

#[test]
fn ignore_all_keeps_fatal_checks_quiet() {
    let out = run_child("ignored");
    assert!(out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("Assertion"), "{stderr}");
}
