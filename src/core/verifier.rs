//! # Verification Engine Module / 验证引擎模块
//!
//! This module checks an externally produced matrix product against a
//! reference product computed locally. It handles a single size
//! ([`MatrixVerifier::verify`]) and the whole configured run
//! ([`verify_each`] / [`verify_all`]), isolating every per-size failure.
//!
//! 此模块将外部生成的矩阵乘积与本地计算的参考乘积进行比对。
//! 它既处理单个尺寸（[`MatrixVerifier::verify`]），也处理整个配置的运行
//! （[`verify_each`] / [`verify_all`]），并隔离每个尺寸的失败。

use log::{debug, info};

use crate::core::config::{ComparisonPolicy, VerifyConfig};
use crate::core::error::{Result, ShapeCheck, VerifyError};
use crate::core::loader::MatrixLoader;
use crate::core::matrix::{Element, Matrix};
use crate::core::models::{Comparison, VerificationResult};
use crate::core::planner::{self, SizeCase};
use crate::infra::fs;

/// Units of `f64::EPSILON`, relative to the compared values, added on top of
/// `atol` so that a decimal perturbation of exactly `atol` is accepted.
const ROUNDING_ULPS: f64 = 4.0;

/// When a candidate element is close enough to the reference.
/// 候选元素与参考值足够接近的判定规则。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// `|candidate - reference| <= atol`, up to the rounding of the two values.
    Absolute(f64),
    /// `candidate == reference`.
    Exact,
}

impl Tolerance {
    /// Whether an absolute difference is acceptable. `scale` is the magnitude
    /// of the values it was computed from. NaN and infinity are never acceptable.
    ///
    /// 判断绝对差是否可接受。`scale` 是计算该差值所用数值的量级。NaN 和无穷大永远不可接受。
    pub fn accepts(&self, diff: f64, scale: f64) -> bool {
        match *self {
            Tolerance::Absolute(atol) => {
                diff.is_finite() && diff <= atol + ROUNDING_ULPS * f64::EPSILON * scale
            }
            Tolerance::Exact => diff == 0.0,
        }
    }
}

/// Compares a candidate against a reference of the same shape.
///
/// `max_abs_diff` becomes NaN as soon as any difference is NaN.
///
/// 比较形状相同的候选矩阵与参考矩阵。只要有任意差值为 NaN，`max_abs_diff` 即为 NaN。
pub fn compare<T: Element>(
    candidate: &Matrix<T>,
    reference: &Matrix<T::Acc>,
    tolerance: Tolerance,
) -> Comparison {
    debug_assert_eq!(candidate.shape(), reference.shape());

    let mut max_abs_diff = 0.0f64;
    let mut mismatched = 0;
    for (&c, &r) in candidate.as_slice().iter().zip(reference.as_slice()) {
        let diff = T::abs_diff(c, r);
        if !tolerance.accepts(diff, T::rounding_scale(c, r)) {
            mismatched += 1;
        }
        if diff.is_nan() || diff > max_abs_diff {
            max_abs_diff = diff;
        }
    }

    Comparison {
        shape: candidate.shape(),
        matches: mismatched == 0,
        max_abs_diff,
        mismatched,
    }
}

/// Verifies candidate results using a loader strategy and a tolerance.
/// 使用加载策略和容差验证候选结果。
#[derive(Debug, Clone, Copy)]
pub struct MatrixVerifier<L> {
    loader: L,
    tolerance: Tolerance,
}

impl<L: MatrixLoader> MatrixVerifier<L> {
    pub fn new(loader: L, tolerance: Tolerance) -> Self {
        Self { loader, tolerance }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Verifies one size case.
    ///
    /// All three files must exist before anything is parsed. Operand shapes
    /// are checked before the candidate is read, and the candidate shape is
    /// checked before the reference product is computed.
    ///
    /// 验证单个尺寸用例。
    /// 在解析任何内容之前，三个文件都必须存在。读取候选结果前先检查操作数形状，
    /// 计算参考乘积前先检查候选结果的形状。
    ///
    /// # Errors / 错误
    /// - [`VerifyError::FileNotFound`] when any of the three files is missing
    /// - [`VerifyError::Io`] when a file exists but cannot be read
    /// - [`VerifyError::Parse`] when a file is not a rectangular numeric matrix
    /// - [`VerifyError::ShapeMismatch`] when the shapes break multiplication rules
    pub fn verify<T: Element>(&self, case: &SizeCase) -> Result<Comparison> {
        if let Some(missing) = fs::first_missing(case.paths()) {
            return Err(VerifyError::FileNotFound {
                path: missing.to_path_buf(),
            });
        }

        let a: Matrix<T> = self.loader.load(&case.operand_a)?;
        let b: Matrix<T> = self.loader.load(&case.operand_b)?;
        if a.cols() != b.rows() {
            return Err(VerifyError::ShapeMismatch {
                check: ShapeCheck::Operands,
                expected: (a.cols(), b.cols()),
                found: b.shape(),
            });
        }

        let candidate: Matrix<T> = self.loader.load(&case.result)?;
        let expected = (a.rows(), b.cols());
        if candidate.shape() != expected {
            return Err(VerifyError::ShapeMismatch {
                check: ShapeCheck::Result,
                expected,
                found: candidate.shape(),
            });
        }

        let reference = a.matmul(&b)?;
        Ok(compare(&candidate, &reference, self.tolerance))
    }
}

/// Verifies every configured size in declared order, calling `on_result`
/// as soon as each size is done. Failures never stop the run.
///
/// 按声明顺序验证每个配置的尺寸，每完成一个尺寸就调用 `on_result`。失败不会中止运行。
pub fn verify_each<L, F>(
    config: &VerifyConfig,
    loader: L,
    mut on_result: F,
) -> Vec<VerificationResult>
where
    L: MatrixLoader,
    F: FnMut(&VerificationResult),
{
    let verifier = MatrixVerifier::new(loader, config.tolerance());
    let mut results = Vec::with_capacity(config.sizes.len());

    for case in planner::plan_cases(config) {
        debug!(
            "verifying {} ({}, {}, {})",
            case.label(),
            case.operand_a.display(),
            case.operand_b.display(),
            case.result.display()
        );
        let outcome = match config.comparison {
            ComparisonPolicy::Tolerance => verifier.verify::<f64>(&case),
            ComparisonPolicy::Exact => verifier.verify::<i64>(&case),
        };
        match &outcome {
            Ok(cmp) => info!(
                "{}: matches={} max_abs_diff={:e}",
                case.label(),
                cmp.matches,
                cmp.max_abs_diff
            ),
            Err(e) => info!("{}: {}", case.label(), e),
        }

        let result = VerificationResult {
            size: case.size,
            outcome,
        };
        on_result(&result);
        results.push(result);
    }

    results
}

/// Verifies every configured size with the configured file format.
/// 使用配置的文件格式验证所有尺寸。
pub fn verify_all(config: &VerifyConfig) -> Vec<VerificationResult> {
    verify_each(config, config.format, |_| {})
}
