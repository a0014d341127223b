//! Exit status and output of the codeswap binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.yml");
    std::fs::write(
        &path,
        "chatgpt:\n  endpoint: http://127.0.0.1:9/conversation\n  access_token: test\n",
    )
    .unwrap();
    path
}

fn codeswap() -> Command {
    let mut cmd = Command::cargo_bin("codeswap").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn invalid_input_path_exits_84() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());
    let out = tmp.path().join("out");

    codeswap()
        .arg("-c")
        .arg(&config)
        .args(["-s", "python", "-d", "rust", "--ie", "py", "--oe", "rs"])
        .arg("-i")
        .arg(tmp.path().join("missing"))
        .arg("-o")
        .arg(&out)
        .assert()
        .code(84)
        .stderr(predicate::str::contains("is not a valid filepath"));

    assert!(!out.exists());
}

#[test]
fn missing_config_file_exits_1() {
    let tmp = TempDir::new().unwrap();

    codeswap()
        .arg("-c")
        .arg(tmp.path().join("absent.yml"))
        .args(["-s", "python", "-d", "rust", "-i", ".", "-o", "out"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn dry_run_previews_without_writing() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());
    let src = tmp.path().join("src");
    std::fs::create_dir_all(src.join("pkg")).unwrap();
    std::fs::write(src.join("main.py"), "print(1)").unwrap();
    std::fs::write(src.join("pkg").join("util.py"), "pass").unwrap();
    std::fs::write(src.join("README.md"), "docs").unwrap();
    let out = tmp.path().join("out");

    codeswap()
        .arg("--dry-run")
        .arg("-vv")
        .arg("-c")
        .arg(&config)
        .args(["-s", "python", "-d", "rust", "--input-extension", "py", "--output-extension", "rs"])
        .arg("-i")
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would convert: 2"))
        .stderr(predicate::str::contains("Writing the output to"));

    assert!(!out.exists());
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    codeswap()
        .args(["-s", "python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--destination"));
}

#[test]
fn continue_on_error_with_failed_file_exits_1() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());
    let src = tmp.path().join("src");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join("bad.py"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    std::fs::write(src.join("notes.txt"), "skipped").unwrap();
    let out = tmp.path().join("out");

    codeswap()
        .arg("--continue-on-error")
        .arg("-c")
        .arg(&config)
        .args(["-s", "python", "-d", "rust", "--ie", "py", "--oe", "rs"])
        .arg("-i")
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed: 1"))
        .stdout(predicate::str::contains("Skipped: 1"))
        .stderr(predicate::str::contains("1 file(s) failed to convert"));

    assert!(!out.exists());
}
