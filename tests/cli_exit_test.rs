use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_test-data-generator"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_bad_count_is_reported_and_exits_zero() {
    let output = run(&["--create-users", "abc", "--offline"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("❌ [ERROR]"));
    assert!(stderr.contains("'abc' is not a valid user count"));
}

#[test]
fn test_unknown_flag_exits_zero() {
    let output = run(&["--bogus"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("❌ [ERROR]"));
}

#[test]
fn test_help_still_prints() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--create-users"));
}

#[test]
fn test_offline_batch_exits_zero() {
    let output = run(&["--offline", "--create-users", "3"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Batch mode complete. Exiting."));
}
