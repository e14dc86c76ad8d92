//! # Verification Errors / 验证错误
//!
//! Typed errors raised while verifying a single size. Every variant is caught
//! at the per-size boundary and turned into a report entry, so none of them
//! ever aborts a run.
//!
//! 验证单个尺寸时产生的类型化错误。所有变体都会在单个尺寸的边界处被捕获
//! 并转换为报告条目，因此不会中断整个运行。

use std::path::PathBuf;
use thiserror::Error;

/// A `(rows, cols)` pair.
pub type Shape = (usize, usize);

/// A problem found while turning text into a matrix.
/// 将文本解析为矩阵时发现的问题。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based line number in the source text (0 when the whole input is at fault).
    /// 源文本中从 1 开始的行号（整个输入有问题时为 0）。
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Which shape rule was violated.
/// 违反了哪条形状规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeCheck {
    /// Operand A columns must equal operand B rows.
    Operands,
    /// The candidate must be `A.rows × B.cols`.
    Result,
}

/// Errors for one size case. / 单个尺寸用例的错误。
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A required operand or result file is missing.
    /// 缺少必需的操作数或结果文件。
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read.
    /// 文件存在但无法读取。
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a rectangular numeric matrix.
    /// 文件不是规则的数值矩阵。
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Operand or result dimensions break matrix-multiplication rules.
    /// 操作数或结果的维度不符合矩阵乘法规则。
    #[error("shape mismatch ({check:?}): expected {}x{}, found {}x{}", expected.0, expected.1, found.0, found.1)]
    ShapeMismatch {
        check: ShapeCheck,
        expected: Shape,
        found: Shape,
    },
}

impl VerifyError {
    /// Stable, locale-independent identifier used in JSON reports.
    /// 用于 JSON 报告的稳定且与语言无关的标识符。
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::FileNotFound { .. } => "file_not_found",
            VerifyError::Io { .. } => "io_error",
            VerifyError::Parse { .. } => "parse_error",
            VerifyError::ShapeMismatch { .. } => "shape_mismatch",
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;
