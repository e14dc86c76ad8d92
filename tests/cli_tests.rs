//! # CLI Integration Tests / CLI 集成测试
//!
//! Runs the `matrix-verify` binary end to end against temporary projects and
//! checks exit codes, console output and written reports.
//!
//! 针对临时项目端到端运行 `matrix-verify` 二进制程序，检查退出码、控制台输出和写出的报告。

mod common;

use assert_cmd::prelude::*;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn matrix_verify() -> Command {
    let mut cmd = Command::cargo_bin("matrix-verify").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A correct result for every size exits with 0 and reports success.
/// 每个尺寸结果都正确时，退出码为 0 并报告成功。
#[test]
fn test_successful_run() {
    let project = setup_verify_project(&[2, 4], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some(C_2X2));
    write_case(&data_dir(&project), 4, &ramp_matrix(4), &identity_matrix(4), Some(&ramp_matrix(4)));

    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .assert()
        .success()
        .stdout(predicate::str::contains("2x2"))
        .stdout(predicate::str::contains("4x4"))
        .stdout(predicate::str::contains("ALL RESULTS MATCH"));
}

/// A missing file fails the run, but later sizes are still reported.
/// 缺失文件会使运行失败，但后续尺寸仍会被报告。
#[test]
fn test_missing_file_fails_but_continues() {
    let project = setup_verify_project(&[100, 2], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some(C_2X2));

    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .assert()
        .failure()
        .stdout(predicate::str::contains("File not found"))
        .stdout(predicate::str::contains("2x2"))
        .stdout(predicate::str::contains("VERIFICATION FAILED"))
        .stdout(predicate::str::contains("mat1_100.txt"));
}

/// A wrong element is reported as a mismatch.
/// 错误的元素被报告为不匹配。
#[test]
fn test_mismatch_fails() {
    let project = setup_verify_project(&[2], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some("19 22\n43 51\n"));

    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Mismatch"))
        .stdout(predicate::str::contains("1.00e0"));
}

/// Command line overrides replace the sizes and the tolerance.
/// 命令行覆盖参数会替换尺寸和容差。
#[test]
fn test_overrides() {
    let project = setup_verify_project(&[100], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some("19.5 22\n43 50\n"));

    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .arg("--sizes")
        .arg("2")
        .arg("--atol")
        .arg("0.75")
        .assert()
        .success();
}

/// `--json` writes a machine-readable report even when verification fails.
/// 即使验证失败，`--json` 也会写出机器可读的报告。
#[test]
fn test_json_report() {
    let project = setup_verify_project(&[2, 3], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some(C_2X2));
    let report = project.path().join("reports/report.json");

    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .arg("--json")
        .arg(&report)
        .assert()
        .failure();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["results"][0]["status"], "match");
    assert_eq!(value["results"][1]["status"], "file_not_found");
}

/// `--html` writes a standalone page.
/// `--html` 写出独立的页面。
#[test]
fn test_html_report() {
    let project = setup_verify_project(&[2], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some(C_2X2));
    let report = project.path().join("report.html");

    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .arg("--html")
        .arg(&report)
        .assert()
        .success();

    let html = fs::read_to_string(&report).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("2x2"));
}

/// A config that cannot be read fails with a message naming it.
/// 无法读取的配置会失败，并在消息中给出其路径。
#[test]
fn test_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    matrix_verify()
        .arg("run")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

/// `--lang ru` switches the console output to Russian.
/// `--lang ru` 将控制台输出切换为俄语。
#[test]
fn test_russian_output() {
    let project = setup_verify_project(&[2, 3], "");
    write_case(&data_dir(&project), 2, A_2X2, B_2X2, Some(C_2X2));

    matrix_verify()
        .arg("--lang")
        .arg("ru")
        .arg("run")
        .arg("--config")
        .arg(config_path(&project))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Результат верный"))
        .stdout(predicate::str::contains("Файл не найден"));
}

/// `init --non-interactive` writes a config that `run` can load.
/// `init --non-interactive` 写出可被 `run` 加载的配置。
#[test]
fn test_init_then_run() {
    let dir = tempfile::tempdir().unwrap();

    matrix_verify()
        .current_dir(dir.path())
        .arg("--lang")
        .arg("en")
        .arg("init")
        .arg("--non-interactive")
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("Verify.toml")).unwrap();
    assert!(content.contains("sizes = ["));
    assert!(content.contains("data_dir = \"files_txt\""));

    // No matrix files exist yet, so every size fails.
    matrix_verify()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stdout(predicate::str::contains("100x100"))
        .stdout(predicate::str::contains("2500x2500"));
}

/// `generate --with-result` produces a data set that verifies cleanly.
/// `generate --with-result` 生成可以顺利通过验证的数据集。
#[test]
fn test_generate_then_run() {
    for extra in ["", "format = \"header\"\ncomparison = \"exact\""] {
        let project = setup_verify_project(&[3, 5], extra);

        matrix_verify()
            .arg("generate")
            .arg("--config")
            .arg(config_path(&project))
            .arg("--seed")
            .arg("11")
            .arg("--with-result")
            .assert()
            .success();
        assert!(data_dir(&project).join("res_5.txt").is_file());

        matrix_verify()
            .arg("run")
            .arg("--config")
            .arg(config_path(&project))
            .assert()
            .success();
    }
}

/// Generated floats cannot be checked exactly.
/// 生成的浮点数无法进行精确检查。
#[test]
fn test_generate_float_with_exact_is_rejected() {
    let project = setup_verify_project(&[3], "comparison = \"exact\"");

    matrix_verify()
        .arg("generate")
        .arg("--config")
        .arg(config_path(&project))
        .arg("--float")
        .assert()
        .failure();
}
