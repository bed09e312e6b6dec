use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &[
    "SUITED_CONFIG",
    "SUITED_STARTING_STACK",
    "SUITED_SMALL_BLIND",
    "SUITED_BIG_BLIND",
    "SUITED_PLAYERS",
    "SUITED_SEED",
    "SUITED_BIG_BLIND_OPTION",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn run_cfg() -> (i32, Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = suited_cli::run(["suited", "cfg"], &mut out, &mut err);
    let stderr = String::from_utf8(err).unwrap();
    let json = if code == 0 {
        serde_json::from_slice(&out).unwrap()
    } else {
        Value::Null
    };
    (code, json, stderr)
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    clear_env();
    let (code, json, _) = run_cfg();
    assert_eq!(code, 0);
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(1000));
    assert_eq!(json["big_blind"]["value"].as_u64(), Some(10));
    assert_eq!(json["players"]["source"].as_str(), Some("default"));
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn env_overrides_file_per_field() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suited.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "seed = 456\nbig_blind = 20\nsmall_blind = 10\nbig_blind_option = true").unwrap();
    drop(f);

    unsafe {
        std::env::set_var("SUITED_CONFIG", &path);
        std::env::set_var("SUITED_SEED", "789");
    }
    let (code, json, stderr) = run_cfg();
    clear_env();

    assert_eq!(code, 0, "stderr={}", stderr);
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["big_blind"]["value"].as_u64(), Some(20));
    assert_eq!(json["big_blind"]["source"].as_str(), Some("file"));
    assert_eq!(json["big_blind_option"]["value"].as_bool(), Some(true));
    assert_eq!(json["starting_stack"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn invalid_values_exit_with_two() {
    clear_env();
    unsafe {
        std::env::set_var("SUITED_PLAYERS", "12");
    }
    let (code, _, stderr) = run_cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.contains("players must be between 2 and 9"), "stderr={}", stderr);

    unsafe {
        std::env::set_var("SUITED_SEED", "not-a-number");
    }
    let (code, _, stderr) = run_cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid seed"), "stderr={}", stderr);
}

#[test]
#[serial]
fn missing_config_file_is_an_error() {
    clear_env();
    unsafe {
        std::env::set_var("SUITED_CONFIG", "/nonexistent/suited.toml");
    }
    let (code, _, stderr) = run_cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.contains("Configuration error"), "stderr={}", stderr);
}
