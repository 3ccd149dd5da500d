use assert_cmd::Command;

fn libris() -> Command {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.env(
        "LIBRIS_CONFIG_DIR",
        std::env::temp_dir().join("libris-cli-no-config"),
    );
    cmd
}

#[test]
fn settings_reflect_environment_overrides() {
    let output = libris()
        .env("LIBRIS_ENV", "test")
        .env("LIBRIS_SERVER__PORT", "9123")
        .arg("settings")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9123);
    assert_eq!(settings["environment"], "test");
}

#[test]
fn unknown_environment_fails() {
    let output = libris()
        .env("LIBRIS_ENV", "qa")
        .arg("settings")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unsupported environment 'qa'"));
}

#[test]
fn help_lists_subcommands() {
    libris().arg("--help").assert().success();

    let output = libris().arg("--help").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("settings"));
}
