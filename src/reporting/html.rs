//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML verification reports.
//! It creates a styled, self-contained HTML file with summary statistics and
//! a per-size results table.
//!
//! 此模块处理 HTML 验证报告的生成。
//! 它创建一个带样式的独立 HTML 文件，包含摘要统计和每个尺寸的结果表格。

use anyhow::Result;
use chrono::Utc;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::path::Path;

use crate::core::models::{Tally, VerificationResult};
use crate::infra::{fs, t};

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Renders the report as markup.
/// 将报告渲染为标记。
pub fn render_html_report(results: &[VerificationResult], locale: &str) -> Markup {
    let tally = Tally::from_results(results);
    let generated = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale).to_string()) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale).to_string()) }
                p.generated { (t!("html_report.generated_at", locale = locale, time = generated).to_string()) }
                div.summary {
                    div.stat { span.label { (t!("html_report.total", locale = locale).to_string()) } span.value { (tally.total) } }
                    div.stat.status-match { span.label { (t!("html_report.matched", locale = locale).to_string()) } span.value { (tally.matched) } }
                    div.stat.status-mismatch { span.label { (t!("html_report.mismatched", locale = locale).to_string()) } span.value { (tally.mismatched) } }
                    div.stat.status-error { span.label { (t!("html_report.errors", locale = locale).to_string()) } span.value { (tally.errors) } }
                }
                table.results {
                    thead {
                        tr {
                            th { (t!("report.col_size", locale = locale).to_string()) }
                            th { (t!("report.col_status", locale = locale).to_string()) }
                            th { (t!("report.col_max_diff", locale = locale).to_string()) }
                            th { (t!("html_report.col_details", locale = locale).to_string()) }
                        }
                    }
                    tbody {
                        @for result in results {
                            tr class=(result.status().css_class()) {
                                td { (result.size_label()) }
                                td { (result.status().label(locale)) }
                                td.numeric { (result.max_abs_diff_str()) }
                                td.details {
                                    @if let Some(error) = result.error() {
                                        (error.to_string())
                                    } @else if let Some(cmp) = result.comparison() {
                                        (format!("{}x{}, {} / {}", cmp.shape.0, cmp.shape.1, cmp.mismatched, cmp.shape.0 * cmp.shape.1))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Generates the HTML report and writes it to `output_path`.
///
/// # Errors / 错误
/// Returns an error when the file or its parent directory cannot be written.
/// 当无法写入文件或其父目录时返回错误。
pub fn generate_html_report(
    results: &[VerificationResult],
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let markup = render_html_report(results, locale);
    fs::write_creating_parents(output_path, &markup.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::VerifyError;
    use crate::core::models::Comparison;
    use std::path::PathBuf;

    #[test]
    fn test_render_contains_rows_and_escapes_errors() {
        let results = vec![
            VerificationResult {
                size: 2,
                outcome: Ok(Comparison {
                    shape: (2, 2),
                    matches: false,
                    max_abs_diff: 1.0,
                    mismatched: 1,
                }),
            },
            VerificationResult {
                size: 3,
                outcome: Err(VerifyError::FileNotFound {
                    path: PathBuf::from("<res>.txt"),
                }),
            },
        ];
        let html = render_html_report(&results, "en").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("2x2"));
        assert!(html.contains("status-mismatch"));
        assert!(html.contains("status-missing"));
        assert!(html.contains("&lt;res&gt;.txt"));
    }
}
