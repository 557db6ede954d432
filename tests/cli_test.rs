//! End-to-end tests of the treedag binary.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use rstest::rstest;
use tempfile::TempDir;

use treedag::exitcode;

/// Runs the binary with an empty config home so the user's config is ignored.
fn treedag(args: &[&str], stdin: &str) -> Output {
    treedag_with(args, stdin, &[], None)
}

/// Runs the binary with extra environment and an optional `treedag.toml`.
fn treedag_with(args: &[&str], stdin: &str, envs: &[(&str, &str)], config: Option<&str>) -> Output {
    let config_home = TempDir::new().unwrap();
    if let Some(content) = config {
        let dir = config_home.path().join("treedag");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("treedag.toml"), content).unwrap();
    }
    let mut child = Command::new(env!("CARGO_BIN_EXE_treedag"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("TREEDAG_STRATEGY")
        .env_remove("TREEDAG_STATS")
        .env_remove("TREEDAG_SHOW")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn treedag");
    // The process may exit without reading stdin, so a broken pipe is fine here
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().expect("wait for treedag")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[rstest]
#[case::compress(&["compress"], "5\n3\n0\n0\n3\n0\n0\n0\n", "5\n3\n0\n0\n-2\n")]
#[case::short_compress(&["c"], "1 0 0", "1\n0\n0\n")]
#[case::decompress(&["decompress"], "5\n3\n0\n0\n-2\n", "5\n3\n0\n0\n3\n0\n0\n")]
#[case::canonical(&["--strategy", "canonical", "compress"], "1 2 0 0 2 0 0", "1\n2\n0\n0\n-2\n")]
#[case::stats_go_to_stderr(&["--stats", "--show", "-ddd", "compress"], "1 2 0 0 2 0 0", "1\n2\n0\n0\n-2\n")]
fn given_mode_when_running_then_writes_result(
    #[case] args: &[&str],
    #[case] input: &str,
    #[case] expected: &str,
) {
    let output = treedag(args, input);
    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert_eq!(stdout(&output), expected);
}

#[rstest]
#[case::no_argument(&[])]
#[case::unknown_mode(&["xyz"])]
#[case::uppercase_mode(&["Compress"])]
#[case::unknown_flag(&["--frobnicate", "compress"])]
fn given_no_recognized_mode_when_running_then_no_work_and_success(#[case] args: &[&str]) {
    let output = treedag(args, "this is not read");
    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert!(output.stdout.is_empty());
}

#[rstest]
#[case::garbage(&["compress"], "5\nfive\n")]
#[case::truncated(&["compress"], "5\n3\n")]
#[case::bad_reference(&["decompress"], "5\n-7\n0\n")]
fn given_malformed_input_when_running_then_data_error(#[case] args: &[&str], #[case] input: &str) {
    let output = treedag(args, input);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn given_stats_flag_when_compressing_then_counts_on_stderr() {
    let output = treedag(&["--stats", "compress"], "1 2 0 0 2 0 0");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("3 tree nodes -> 3 DAG nodes"), "{}", stderr);
    assert!(stderr.contains("back-references: 1"), "{}", stderr);
}

#[test]
fn given_stats_env_var_when_compressing_then_counts_on_stderr() {
    let output = treedag_with(&["compress"], "1 2 0 0 2 0 0", &[("TREEDAG_STATS", "true")], None);
    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert_eq!(stdout(&output), "1\n2\n0\n0\n-2\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("back-references: 1"), "{}", stderr);
}

#[rstest]
#[case::bad_env_strategy(&[("TREEDAG_STRATEGY", "bogus")], None)]
#[case::malformed_config_file(&[], Some("stats = \"yes\"\n"))]
fn given_broken_configuration_when_compressing_then_defaults_used(
    #[case] envs: &[(&str, &str)],
    #[case] config: Option<&str>,
) {
    let output = treedag_with(&["compress"], "1 2 0 0 2 0 0", envs, config);
    assert_eq!(output.status.code(), Some(exitcode::OK));
    assert_eq!(stdout(&output), "1\n2\n0\n0\n-2\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ignoring configuration"), "{}", stderr);
}
