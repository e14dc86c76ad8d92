//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the verification table to the console: a header,
//! one coloured line per size as soon as it is verified, a closing summary,
//! and the details of every failed size.
//!
//! 此模块将验证表格打印到控制台：表头、每验证完一个尺寸立即打印的一行彩色结果、
//! 最终摘要，以及每个失败尺寸的详细信息。

use colored::*;
use std::fmt;

use crate::core::config::{ComparisonPolicy, VerifyConfig};
use crate::core::models::{Status, Tally, VerificationResult};
use crate::infra::t;

const SIZE_WIDTH: usize = 11;
const STATUS_WIDTH: usize = 20;

/// Prints the banner, the active settings and the column headers.
///
/// # Output Format / 输出格式
/// ```text
/// --- Matrix Multiplication Verification ---
/// Format: plain | Comparison: tolerance (atol = 1e-6)
/// Size        | Status               | Max abs diff
/// ------------|----------------------|-------------
/// ```
pub fn print_header(config: &VerifyConfig, locale: &str) {
    println!("\n{}", t!("report.banner", locale = locale).bold());

    let policy = match config.comparison {
        ComparisonPolicy::Tolerance => {
            t!("report.policy_tolerance", locale = locale, atol = config.atol)
        }
        ComparisonPolicy::Exact => t!("report.policy_exact", locale = locale),
    };
    println!(
        "{}",
        t!(
            "report.settings",
            locale = locale,
            format = config.format,
            policy = policy
        )
        .cyan()
    );

    println!(
        "{:<size_w$} | {:<status_w$} | {}",
        t!("report.col_size", locale = locale),
        t!("report.col_status", locale = locale),
        t!("report.col_max_diff", locale = locale),
        size_w = SIZE_WIDTH,
        status_w = STATUS_WIDTH,
    );
    println!(
        "{}|{}|{}",
        "-".repeat(SIZE_WIDTH + 1),
        "-".repeat(STATUS_WIDTH + 2),
        "-".repeat(14)
    );
}

/// Formats a single table line without colour.
/// 格式化不带颜色的单行表格内容。
pub fn format_row(result: &VerificationResult, locale: &str) -> String {
    row_line(result, status_cell(result.status(), locale))
}

/// Prints one coloured line for a verified size.
/// 为已验证的尺寸打印一行彩色结果。
pub fn print_row(result: &VerificationResult, locale: &str) {
    let status = result.status();
    let cell = status_cell(status, locale);
    let colored_cell = match status {
        Status::Match => cell.green(),
        Status::Mismatch => cell.red(),
        Status::FileNotFound => cell.yellow(),
        Status::ParseError | Status::ShapeMismatch | Status::ReadError => cell.red().dimmed(),
    };
    println!("{}", row_line(result, colored_cell));
}

// The status cell is padded before colouring so escape codes do not count
// towards the column width.
fn status_cell(status: Status, locale: &str) -> String {
    format!("{:<width$}", status_text(status, locale), width = STATUS_WIDTH)
}

fn row_line(result: &VerificationResult, status_cell: impl fmt::Display) -> String {
    format!(
        "{:<size_w$} | {} | {}",
        result.size_label(),
        status_cell,
        result.max_abs_diff_str(),
        size_w = SIZE_WIDTH,
    )
}

/// Prints the closing counts and the overall verdict.
/// 打印最终计数和总体结论。
pub fn print_summary(results: &[VerificationResult], locale: &str) {
    let tally = Tally::from_results(results);
    println!(
        "\n{}",
        t!(
            "report.summary",
            locale = locale,
            total = tally.total,
            matched = tally.matched,
            mismatched = tally.mismatched,
            errors = tally.errors
        )
    );
    if tally.all_passed() {
        println!("{}", t!("report.all_matched", locale = locale).green().bold());
    } else {
        println!("{}", t!("report.some_failed", locale = locale).red().bold());
    }
}

/// Prints the reason behind every size that did not match.
/// Returns early when every size passed.
///
/// 打印每个未通过尺寸的原因。所有尺寸均通过时直接返回。
pub fn print_failure_details(results: &[VerificationResult], locale: &str) {
    let failures: Vec<_> = results.iter().filter(|r| r.is_failure()).collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("report.failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));
    for (i, result) in failures.iter().enumerate() {
        let detail = match &result.outcome {
            Ok(cmp) => t!(
                "report.mismatch_detail",
                locale = locale,
                count = cmp.mismatched,
                total = cmp.shape.0 * cmp.shape.1,
                diff = format!("{:.3e}", cmp.max_abs_diff)
            )
            .to_string(),
            Err(e) => e.to_string(),
        };
        println!(
            "[{}/{}] {} {}",
            i + 1,
            failures.len(),
            result.size_label().cyan(),
            detail
        );
    }
    println!("{}", "-".repeat(80));
}

fn status_text(status: Status, locale: &str) -> String {
    let mark = match status {
        Status::Match => "✓",
        Status::Mismatch => "✗",
        _ => "!",
    };
    format!("{} {}", mark, status.label(locale))
}
