//! # Matrix Module / 矩阵模块
//!
//! A small row-major matrix type plus the `Element` capability that decides
//! how values are parsed, multiplied and compared. Two element kinds exist:
//! `f64` for tolerance-based checks and `i64` for exact integer checks.
//!
//! 一个简单的行主序矩阵类型，以及决定数值如何解析、相乘和比较的 `Element` 能力。
//! 共有两种元素类型：`f64` 用于基于容差的检查，`i64` 用于精确的整数检查。

use std::fmt;
use std::str::FromStr;

use crate::core::error::{ParseError, Result, Shape, ShapeCheck, VerifyError};

/// Numeric element stored in a [`Matrix`].
///
/// `Acc` is the accumulator used for the reference product. It must be wide
/// enough that summing `k` products of two elements cannot overflow.
///
/// 存储在 [`Matrix`] 中的数值元素。
/// `Acc` 是参考乘积使用的累加器类型，必须足够宽以保证累加 `k` 个乘积不会溢出。
pub trait Element: Copy + PartialEq + fmt::Debug + fmt::Display + FromStr {
    type Acc: Copy + PartialEq + fmt::Debug + fmt::Display + Default;

    /// Human readable name, used in parse errors.
    const KIND: &'static str;

    /// Returns `acc + a * b` in the accumulator type.
    fn mul_add(acc: Self::Acc, a: Self, b: Self) -> Self::Acc;

    /// Absolute difference between a candidate element and a reference value.
    fn abs_diff(candidate: Self, reference: Self::Acc) -> f64;

    /// Magnitude that decimal-to-binary rounding of the two values is
    /// relative to. Zero for kinds that are represented exactly.
    fn rounding_scale(candidate: Self, reference: Self::Acc) -> f64;
}

impl Element for f64 {
    type Acc = f64;
    const KIND: &'static str = "floating-point number";

    #[inline]
    fn mul_add(acc: f64, a: f64, b: f64) -> f64 {
        acc + a * b
    }

    #[inline]
    fn abs_diff(candidate: f64, reference: f64) -> f64 {
        (candidate - reference).abs()
    }

    #[inline]
    fn rounding_scale(candidate: f64, reference: f64) -> f64 {
        candidate.abs().max(reference.abs())
    }
}

impl Element for i64 {
    type Acc = i128;
    const KIND: &'static str = "integer";

    #[inline]
    fn mul_add(acc: i128, a: i64, b: i64) -> i128 {
        acc + i128::from(a) * i128::from(b)
    }

    #[inline]
    fn abs_diff(candidate: i64, reference: i128) -> f64 {
        i128::from(candidate).abs_diff(reference) as f64
    }

    #[inline]
    fn rounding_scale(_candidate: i64, _reference: i128) -> f64 {
        0.0
    }
}

/// A rectangular matrix stored in row-major order.
/// Immutable once built.
///
/// 以行主序存储的矩阵，构建后不可变。
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Builds a matrix from a flat row-major buffer.
    /// Both dimensions must be non-zero and `data.len()` must equal `rows * cols`.
    ///
    /// 从扁平的行主序缓冲区构建矩阵。
    /// 两个维度都必须非零，且 `data.len()` 必须等于 `rows * cols`。
    pub fn from_shape_vec(shape: Shape, data: Vec<T>) -> std::result::Result<Self, ParseError> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(ParseError::new(0, format!("empty matrix ({}x{})", rows, cols)));
        }
        if data.len() != rows * cols {
            return Err(ParseError::new(
                0,
                format!(
                    "expected {} values for a {}x{} matrix, found {}",
                    rows * cols,
                    rows,
                    cols,
                    data.len()
                ),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.cols)
    }
}

/// Test-only `(row, col)` element access.
#[cfg(test)]
impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &self.data[row * self.cols + col]
    }
}

impl<T: Element> Matrix<T> {
    /// Computes `self · rhs` in the widened accumulator type.
    ///
    /// Uses the i-k-j loop order so that both `rhs` and the output are walked
    /// row by row.
    ///
    /// 以加宽的累加器类型计算 `self · rhs`。
    /// 使用 i-k-j 循环顺序，使 `rhs` 和输出都按行遍历。
    pub fn matmul(&self, rhs: &Matrix<T>) -> Result<Matrix<T::Acc>> {
        if self.cols != rhs.rows {
            return Err(VerifyError::ShapeMismatch {
                check: ShapeCheck::Operands,
                expected: (self.cols, rhs.cols),
                found: rhs.shape(),
            });
        }

        let (m, k, n) = (self.rows, self.cols, rhs.cols);
        let mut out = vec![T::Acc::default(); m * n];
        for i in 0..m {
            let out_row = &mut out[i * n..(i + 1) * n];
            for p in 0..k {
                let a = self.data[i * k + p];
                let rhs_row = &rhs.data[p * n..(p + 1) * n];
                for (acc, &b) in out_row.iter_mut().zip(rhs_row) {
                    *acc = T::mul_add(*acc, a, b);
                }
            }
        }

        Ok(Matrix {
            rows: m,
            cols: n,
            data: out,
        })
    }
}
