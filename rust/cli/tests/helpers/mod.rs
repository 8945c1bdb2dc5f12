//! Shared helpers for the integration suite.
//!
//! `run_cli` drives the library entry point in-process and captures both
//! streams. Tests that touch `STAGEDICE_*` variables run under
//! `#[serial]` and start from `clear_env()`.

pub const ENV_KEYS: [&str; 6] = [
    "STAGEDICE_CONFIG",
    "STAGEDICE_SIDES",
    "STAGEDICE_STAGES",
    "STAGEDICE_SEED",
    "STAGEDICE_TIE_RULE",
    "STAGEDICE_LOG_LEVEL",
];

#[derive(Debug)]
pub struct CliOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliOutput {
    let mut argv = vec!["stagedice"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = stagedice_cli::run(argv, &mut out, &mut err);
    CliOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

pub fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

pub fn path_str(path: &std::path::Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
