//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable report of a verification run. Status and error kinds are
//! stable snake_case identifiers so that scripts do not depend on the locale.
//!
//! 验证运行的机器可读报告。状态和错误类型使用稳定的 snake_case 标识符，
//! 使脚本不依赖于语言设置。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::config::{ComparisonPolicy, VerifyConfig};
use crate::core::error::Shape;
use crate::core::loader::MatrixFormat;
use crate::core::models::{Status, Tally, VerificationResult};
use crate::infra::fs;

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: DateTime<Utc>,
    pub settings: ReportSettings,
    pub summary: Tally,
    pub results: Vec<JsonEntry>,
}

#[derive(Debug, Serialize)]
pub struct ReportSettings {
    pub data_dir: PathBuf,
    pub result_dir: PathBuf,
    pub atol: f64,
    pub comparison: ComparisonPolicy,
    pub format: MatrixFormat,
}

/// One entry per size. Fields that do not apply are `null`.
#[derive(Debug, Serialize)]
pub struct JsonEntry {
    pub size: usize,
    pub status: Status,
    pub matches: bool,
    pub max_abs_diff: Option<f64>,
    pub mismatched_elements: Option<usize>,
    pub shape: Option<Shape>,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
}

impl From<&VerificationResult> for JsonEntry {
    fn from(result: &VerificationResult) -> Self {
        let comparison = result.comparison();
        JsonEntry {
            size: result.size,
            status: result.status(),
            matches: result.matches(),
            max_abs_diff: result.max_abs_diff(),
            mismatched_elements: comparison.map(|c| c.mismatched),
            shape: comparison.map(|c| c.shape),
            error_kind: result.error().map(|e| e.kind()),
            error: result.error().map(|e| e.to_string()),
        }
    }
}

/// Builds the report structure without touching the disk.
pub fn build_json_report(results: &[VerificationResult], config: &VerifyConfig) -> JsonReport {
    JsonReport {
        generated_at: Utc::now(),
        settings: ReportSettings {
            data_dir: config.data_dir.clone(),
            result_dir: config.result_dir().to_path_buf(),
            atol: config.atol,
            comparison: config.comparison,
            format: config.format,
        },
        summary: Tally::from_results(results),
        results: results.iter().map(JsonEntry::from).collect(),
    }
}

/// Writes the JSON report to `output_path`.
/// 将 JSON 报告写入 `output_path`。
pub fn write_json_report(
    results: &[VerificationResult],
    config: &VerifyConfig,
    output_path: &Path,
) -> Result<()> {
    let report = build_json_report(results, config);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write_creating_parents(output_path, &json)
}
