use crate::helpers::{clear_env, path_str, run_cli};
use serde_json::Value;
use serial_test::serial;

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 0);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["stages"]["value"].as_u64(), Some(3));
    assert_eq!(json["ante"]["value"].as_u64(), Some(15));
    assert_eq!(json["start_wealth"]["value"].as_i64(), Some(500));
    assert_eq!(json["log_level"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("stagedice.toml");
    std::fs::write(&cfg_path, "sides = 8\nstages = 2\ntie_rule = \"push\"\nante = 20\n").unwrap();
    unsafe {
        std::env::set_var("STAGEDICE_CONFIG", &cfg_path);
        std::env::set_var("STAGEDICE_SIDES", "4");
    }

    let res = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["sides"]["value"].as_u64(), Some(4));
    assert_eq!(json["sides"]["source"].as_str(), Some("env"));
    assert_eq!(json["stages"]["value"].as_u64(), Some(2));
    assert_eq!(json["stages"]["source"].as_str(), Some("file"));
    assert_eq!(json["tie_rule"]["value"].as_str(), Some("push"));
    assert_eq!(json["ante"]["source"].as_str(), Some("file"));
}

#[test]
#[serial]
fn cli_flags_override_config() {
    clear_env();
    unsafe {
        std::env::set_var("STAGEDICE_STAGES", "4");
        std::env::set_var("STAGEDICE_TIE_RULE", "push");
    }

    let from_env = run_cli(&["probs", "--player", "1", "--house", "1"]);
    let from_flags = run_cli(&[
        "probs", "--player", "1", "--house", "1", "--stages", "1", "--ties", "loss",
    ]);
    clear_env();

    let env_json: Value = serde_json::from_str(&from_env.stdout).unwrap();
    assert_eq!(env_json["input"][2].as_i64(), Some(4));
    assert_eq!(env_json["tie_rule"].as_str(), Some("push"));
    assert!(env_json["push"].as_f64().unwrap() > 0.0);

    let flag_json: Value = serde_json::from_str(&from_flags.stdout).unwrap();
    assert_eq!(flag_json["input"][2].as_i64(), Some(1));
    assert_eq!(flag_json["push"].as_f64(), Some(0.0));
}

#[test]
#[serial]
fn unknown_file_key_is_rejected() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("stagedice.toml");
    std::fs::write(&cfg_path, "level = 3\n").unwrap();
    unsafe { std::env::set_var("STAGEDICE_CONFIG", path_str(&cfg_path)) };

    let res = run_cli(&["cfg"]);
    clear_env();
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration"));
}

#[test]
#[serial]
fn invalid_env_sides_fails_commands_that_read_config() {
    clear_env();
    unsafe { std::env::set_var("STAGEDICE_SIDES", "1") };
    let res = run_cli(&["sim", "--trials", "1", "--seed", "3"]);
    clear_env();
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("sides must be >=2"));
}
