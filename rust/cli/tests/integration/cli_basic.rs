use crate::helpers::{clear_env, run_cli};
use serial_test::serial;

#[test]
#[serial]
fn probs_defaults_come_from_config() {
    clear_env();
    let res = run_cli(&["probs", "--player", "0", "--house", "0"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let v: serde_json::Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(v["input"], serde_json::json!([0, 0, 3, 6]));
    let total = v["win"].as_f64().unwrap() + v["loss"].as_f64().unwrap();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(v["push"].as_f64(), Some(0.0));
}

#[test]
#[serial]
fn probs_terminal_state_settles_immediately() {
    clear_env();
    let res = run_cli(&[
        "probs", "--player", "9", "--house", "9", "--stages", "0", "--sides", "6",
    ]);
    assert_eq!(res.exit_code, 0);
    let v: serde_json::Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(v["loss"].as_f64(), Some(1.0));
    assert_eq!(v["entropy"].as_f64(), Some(0.0));
}

#[test]
#[serial]
fn probs_negative_stages_exit_two() {
    clear_env();
    let res = run_cli(&["probs", "--player", "0", "--house", "0", "--stages", "-1"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("remaining_stages"));
    assert!(res.stdout.is_empty());
}

#[test]
fn entropy_of_fair_coin_is_one_bit() {
    let res = run_cli(&["entropy", "--win", "0.5", "--loss", "0.5"]);
    assert_eq!(res.exit_code, 0);
    assert_eq!(res.stdout.trim(), "1");
}

#[test]
fn entropy_warns_on_unnormalized_input() {
    let res = run_cli(&["entropy", "--win", "0.5", "--loss", "0.7"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stderr.contains("WARNING"));
}

#[test]
fn unknown_command_lists_commands() {
    let res = run_cli(&["deal"]);
    assert_eq!(res.exit_code, 2);
    for c in ["probs", "entropy", "truth", "verify", "sim", "export", "cfg"] {
        assert!(res.stderr.contains(c), "missing {c}");
    }
}

#[test]
fn help_goes_to_stdout() {
    let res = run_cli(&["--help"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Usage"));
    assert!(res.stderr.is_empty());
}
