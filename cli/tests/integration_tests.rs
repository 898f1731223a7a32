//! Integration tests that run the demo binary end to end.

use std::process::{Command, Output};

fn run_demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optline"))
        .args(args)
        .output()
        .expect("demo binary must run")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_mixed_arguments_round_and_collect_leftovers() {
    let output = run_demo(&["--up", "2.3", "-d7.9", "--dub=3.5", "-bpq", "keep-me"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains(r#"leftover: ["keep-me"]"#));
    assert!(stdout.contains("up = 3 ; down = 7 ; dub = 3.5"));
    assert!(stdout.contains("pings = 3"));
}

#[test]
fn test_help_prints_usage_and_exits_zero() {
    let output = run_demo(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("[options]"));
    assert!(stdout.contains("  -h, --help"));
    assert!(stdout.contains("--dub"));
    assert!(!stdout.contains("leftover:"));
}

#[test]
fn test_unknown_option_exits_with_code_two() {
    let output = run_demo(&["--nope"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown option: nope"));
}

#[test]
fn test_missing_parameter_exits_with_code_two() {
    let output = run_demo(&["--up"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing parameter for option up"));
}

#[test]
fn test_terminator_passes_option_like_tokens_through() {
    let output = run_demo(&["--", "--dub=9"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains(r#"leftover: ["--dub=9"]"#));
    assert!(stdout.contains("dub = 1"));
}

#[test]
fn test_file_option_accepts_every_spelling() {
    for args in [
        &["--file", "a.txt"][..],
        &["--in", "a.txt"][..],
        &["-f", "a.txt"][..],
        &["-fa.txt"][..],
    ] {
        let output = run_demo(args);
        assert!(output.status.success());
        assert!(stdout_of(&output).contains("file = a.txt"));
    }
}
