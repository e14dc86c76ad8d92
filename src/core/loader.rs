//! # Matrix Loader Module / 矩阵加载模块
//!
//! Parses whitespace-delimited text into [`Matrix`] values. Three on-disk
//! layouts are supported, each behind the [`MatrixLoader`] capability:
//!
//! - `header`: a `rows cols` line followed by exactly `rows` rows of `cols` values
//! - `skip-header`: the first line is ignored, the rest is shaped automatically
//! - `plain`: no header, rows and columns are inferred from the text
//!
//! 将空白分隔的文本解析为 [`Matrix`]。支持三种磁盘格式，均通过 [`MatrixLoader`] 能力实现：
//!
//! - `header`：一行 `rows cols`，随后恰好 `rows` 行，每行 `cols` 个值
//! - `skip-header`：忽略第一行，其余部分自动推断形状
//! - `plain`：没有表头，行列数从文本中推断

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write};
use std::path::Path;

use crate::core::error::{ParseError, Result, VerifyError};
use crate::core::matrix::{Element, Matrix};
use crate::infra::fs;

/// Something that can turn matrix text into a [`Matrix`].
/// 能将矩阵文本转换为 [`Matrix`] 的类型。
pub trait MatrixLoader {
    /// Parses `text` into a matrix of `T`.
    fn parse<T: Element>(&self, text: &str) -> std::result::Result<Matrix<T>, ParseError>;

    /// Reads `path` and parses it. A missing file yields
    /// [`VerifyError::FileNotFound`], malformed content [`VerifyError::Parse`].
    ///
    /// 读取 `path` 并解析。文件缺失返回 [`VerifyError::FileNotFound`]，
    /// 内容格式错误返回 [`VerifyError::Parse`]。
    fn load<T: Element>(&self, path: &Path) -> Result<Matrix<T>> {
        let text = fs::read_matrix_source(path)?;
        self.parse(&text).map_err(|source| VerifyError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `rows cols` header followed by exactly `rows` lines of `cols` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderLoader;

/// Skips the first line unvalidated, then shapes the rest automatically.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipHeaderLoader;

/// No header. Rows come from the non-blank lines, columns from the first row.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLoader;

impl MatrixLoader for PlainLoader {
    fn parse<T: Element>(&self, text: &str) -> std::result::Result<Matrix<T>, ParseError> {
        auto_shape(numbered_lines(text))
    }
}

impl MatrixLoader for SkipHeaderLoader {
    fn parse<T: Element>(&self, text: &str) -> std::result::Result<Matrix<T>, ParseError> {
        auto_shape(numbered_lines(text).skip(1))
    }
}

impl MatrixLoader for HeaderLoader {
    fn parse<T: Element>(&self, text: &str) -> std::result::Result<Matrix<T>, ParseError> {
        let mut lines = numbered_lines(text).filter(|(_, line)| !line.trim().is_empty());

        let (header_no, header) = lines
            .next()
            .ok_or_else(|| ParseError::new(0, "missing `rows cols` header"))?;
        let (rows, cols) = parse_header(header_no, header)?;

        let mut data = Vec::with_capacity(rows.saturating_mul(cols).min(1 << 20));
        let mut read_rows = 0;
        for (line_no, line) in lines.by_ref().take(rows) {
            let row = parse_row::<T>(line_no, line)?;
            if row.len() != cols {
                return Err(ParseError::new(
                    line_no,
                    format!("expected {} values, found {}", cols, row.len()),
                ));
            }
            data.extend(row);
            read_rows += 1;
        }
        if read_rows != rows {
            return Err(ParseError::new(
                0,
                format!("header declares {} rows, found {}", rows, read_rows),
            ));
        }
        if let Some((line_no, _)) = lines.next() {
            return Err(ParseError::new(
                line_no,
                format!("unexpected content after {} declared rows", rows),
            ));
        }

        Matrix::from_shape_vec((rows, cols), data)
    }
}

/// The on-disk layout selected in the configuration.
/// 配置中选择的磁盘格式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixFormat {
    #[default]
    Plain,
    Header,
    SkipHeader,
}

impl MatrixLoader for MatrixFormat {
    fn parse<T: Element>(&self, text: &str) -> std::result::Result<Matrix<T>, ParseError> {
        match self {
            MatrixFormat::Plain => PlainLoader.parse(text),
            MatrixFormat::Header => HeaderLoader.parse(text),
            MatrixFormat::SkipHeader => SkipHeaderLoader.parse(text),
        }
    }
}

impl MatrixFormat {
    pub const ALL: [MatrixFormat; 3] = [
        MatrixFormat::Plain,
        MatrixFormat::Header,
        MatrixFormat::SkipHeader,
    ];

    /// Renders `matrix` in this layout so that the matching loader reads it back.
    /// Both header layouts write a `rows cols` line.
    ///
    /// 以此格式渲染 `matrix`，使对应的加载器能够读回。两种带表头的格式都会写出 `rows cols` 行。
    pub fn render<T: Display>(&self, matrix: &Matrix<T>) -> String {
        let mut out = String::new();
        if *self != MatrixFormat::Plain {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{} {}", matrix.rows(), matrix.cols());
        }
        for row in matrix.row_iter() {
            let mut first = true;
            for value in row {
                if !first {
                    out.push(' ');
                }
                let _ = write!(out, "{}", value);
                first = false;
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixFormat::Plain => "plain",
            MatrixFormat::Header => "header",
            MatrixFormat::SkipHeader => "skip-header",
        };
        f.write_str(name)
    }
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line))
}

fn parse_header(line_no: usize, line: &str) -> std::result::Result<(usize, usize), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [rows, cols] = tokens.as_slice() else {
        return Err(ParseError::new(
            line_no,
            format!("expected `rows cols` header, found {} tokens", tokens.len()),
        ));
    };
    let dim = |token: &str| {
        token.parse::<usize>().map_err(|_| {
            ParseError::new(line_no, format!("`{}` is not a valid dimension", token))
        })
    };
    Ok((dim(*rows)?, dim(*cols)?))
}

fn parse_row<T: Element>(line_no: usize, line: &str) -> std::result::Result<Vec<T>, ParseError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| {
                ParseError::new(line_no, format!("`{}` is not a valid {}", token, T::KIND))
            })
        })
        .collect()
}

fn auto_shape<'a, T: Element>(
    lines: impl Iterator<Item = (usize, &'a str)>,
) -> std::result::Result<Matrix<T>, ParseError> {
    let mut data = Vec::new();
    let mut cols = None;
    let mut rows = 0;

    for (line_no, line) in lines.filter(|(_, line)| !line.trim().is_empty()) {
        let row = parse_row::<T>(line_no, line)?;
        match cols {
            None => cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(ParseError::new(
                    line_no,
                    format!("expected {} values, found {}", expected, row.len()),
                ));
            }
            Some(_) => {}
        }
        data.extend(row);
        rows += 1;
    }

    Matrix::from_shape_vec((rows, cols.unwrap_or(0)), data)
}
