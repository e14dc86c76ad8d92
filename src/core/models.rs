//! # Data Models Module / 数据模型模块
//!
//! This module defines the result types produced by a verification run:
//! the numeric [`Comparison`] of one candidate, the per-size
//! [`VerificationResult`], and the [`Status`] used by every reporter.
//!
//! 此模块定义验证运行产生的结果类型：单个候选结果的数值比较 [`Comparison`]、
//! 每个尺寸的 [`VerificationResult`]，以及所有报告器使用的 [`Status`]。

use serde::Serialize;
use std::fmt;

use crate::core::error::{Shape, VerifyError};
use crate::core::planner::size_label;
use crate::infra::t;

/// Outcome of comparing a candidate with the reference product.
/// 候选结果与参考乘积比较的结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// Shape shared by candidate and reference. / 候选与参考共同的形状
    pub shape: Shape,
    /// `true` when every element is within tolerance. / 所有元素均在容差内时为 `true`
    pub matches: bool,
    /// Largest absolute element difference. / 最大的元素绝对差
    pub max_abs_diff: f64,
    /// Number of elements outside tolerance. / 超出容差的元素个数
    pub mismatched: usize,
}

/// Status of one size, as shown in reports.
/// 单个尺寸在报告中显示的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Match,
    Mismatch,
    FileNotFound,
    ParseError,
    ShapeMismatch,
    ReadError,
}

impl Status {
    /// Localised label for console and HTML output.
    pub fn label(&self, locale: &str) -> String {
        match self {
            Status::Match => t!("report.status_match", locale = locale),
            Status::Mismatch => t!("report.status_mismatch", locale = locale),
            Status::FileNotFound => t!("report.status_file_not_found", locale = locale),
            Status::ParseError => t!("report.status_parse_error", locale = locale),
            Status::ShapeMismatch => t!("report.status_shape_mismatch", locale = locale),
            Status::ReadError => t!("report.status_read_error", locale = locale),
        }
        .to_string()
    }

    /// CSS class used by the HTML report.
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Match => "status-match",
            Status::Mismatch => "status-mismatch",
            Status::FileNotFound => "status-missing",
            Status::ParseError | Status::ShapeMismatch | Status::ReadError => "status-error",
        }
    }
}

/// The verification result for one size. Produced once per size and only
/// consumed by the reporters.
///
/// 单个尺寸的验证结果。每个尺寸产生一次，仅供报告器使用。
#[derive(Debug)]
pub struct VerificationResult {
    /// The `n` of the `n×n` case. / `n×n` 用例中的 `n`
    pub size: usize,
    /// Either the comparison or the error that prevented it.
    /// 比较结果，或阻止比较的错误。
    pub outcome: Result<Comparison, VerifyError>,
}

impl VerificationResult {
    /// `true` only when the comparison ran and every element matched.
    pub fn matches(&self) -> bool {
        matches!(&self.outcome, Ok(cmp) if cmp.matches)
    }

    /// Checks if this size did not pass, for any reason.
    pub fn is_failure(&self) -> bool {
        !self.matches()
    }

    /// The largest absolute difference, when the comparison ran.
    pub fn max_abs_diff(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|cmp| cmp.max_abs_diff)
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&VerifyError> {
        self.outcome.as_ref().err()
    }

    pub fn status(&self) -> Status {
        match &self.outcome {
            Ok(cmp) if cmp.matches => Status::Match,
            Ok(_) => Status::Mismatch,
            Err(VerifyError::FileNotFound { .. }) => Status::FileNotFound,
            Err(VerifyError::Parse { .. }) => Status::ParseError,
            Err(VerifyError::ShapeMismatch { .. }) => Status::ShapeMismatch,
            Err(VerifyError::Io { .. }) => Status::ReadError,
        }
    }

    /// Label such as `100x100`.
    pub fn size_label(&self) -> String {
        size_label(self.size)
    }

    /// `max_abs_diff` formatted for tables, `-` when unavailable.
    /// 为表格格式化的 `max_abs_diff`，不可用时为 `-`。
    pub fn max_abs_diff_str(&self) -> String {
        self.max_abs_diff()
            .map(|d| format!("{:.2e}", d))
            .unwrap_or_else(|| "-".to_string())
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(cmp) => write!(
                f,
                "{}: {} (max abs diff {:.2e})",
                self.size_label(),
                if cmp.matches { "match" } else { "mismatch" },
                cmp.max_abs_diff
            ),
            Err(e) => write!(f, "{}: {}", self.size_label(), e),
        }
    }
}

/// Counts per status for the closing summary.
/// 用于最终摘要的各状态计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub errors: usize,
}

impl Tally {
    pub fn from_results(results: &[VerificationResult]) -> Self {
        let mut tally = Tally {
            total: results.len(),
            ..Tally::default()
        };
        for result in results {
            match result.status() {
                Status::Match => tally.matched += 1,
                Status::Mismatch => tally.mismatched += 1,
                _ => tally.errors += 1,
            }
        }
        tally
    }

    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }
}
