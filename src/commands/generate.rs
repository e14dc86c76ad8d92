//! # Matrix Generation Module / 矩阵生成模块
//!
//! Writes random operand matrices for every configured size, in the configured
//! layout and at the paths the verifier will read. Optionally writes the exact
//! product too, which gives a known-good result set.
//!
//! 为每个配置的尺寸写出随机操作数矩阵，使用配置的格式，并放在验证器读取的路径上。
//! 也可以选择写出精确乘积，从而得到一组已知正确的结果。

use anyhow::{bail, Result};
use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    commands::run::setup_and_parse_config,
    core::{
        config::{ComparisonPolicy, Overrides, VerifyConfig},
        loader::MatrixFormat,
        matrix::{Element, Matrix},
        planner::{plan_cases, SizeCase},
    },
    infra::fs,
    resolve_locale, t,
};

/// Options of the `generate` subcommand.
/// `generate` 子命令的选项。
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub config: std::path::PathBuf,
    pub sizes: Option<Vec<usize>>,
    pub seed: Option<u64>,
    pub float: bool,
    pub with_result: bool,
    /// Values are drawn from `0..max_value`.
    pub max_value: u32,
    pub language: Option<String>,
}

pub fn execute(options: GenerateOptions) -> Result<()> {
    let overrides = Overrides {
        sizes: options.sizes.clone(),
        ..Overrides::default()
    };
    let config = setup_and_parse_config(&options.config, overrides)?;
    let locale = resolve_locale(options.language.as_deref().unwrap_or(&config.language));
    let locale = locale.as_str();

    if options.float && config.comparison == ComparisonPolicy::Exact {
        bail!(t!("generate.float_with_exact", locale = locale).to_string());
    }
    if options.max_value == 0 {
        bail!(t!("generate.zero_max_value", locale = locale).to_string());
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let written = generate_all(&config, &options, &mut rng)?;
    for path in &written {
        println!("{} {}", "✔".green(), path.display());
    }
    println!(
        "\n{}",
        t!("generate.done", locale = locale, count = written.len()).bold()
    );
    Ok(())
}

/// Generates files for every case and returns the paths written, in order.
/// 为每个用例生成文件，并按顺序返回写出的路径。
pub fn generate_all<R: Rng>(
    config: &VerifyConfig,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<std::path::PathBuf>> {
    let mut written = Vec::new();
    let max = options.max_value;
    for case in plan_cases(config) {
        let n = case.size;
        if options.float {
            let a = random_matrix(n, || rng.gen_range(0.0..f64::from(max)))?;
            let b = random_matrix(n, || rng.gen_range(0.0..f64::from(max)))?;
            write_case(&case, config.format, &a, &b, options.with_result, &mut written)?;
        } else {
            let a = random_matrix(n, || i64::from(rng.gen_range(0..max)))?;
            let b = random_matrix(n, || i64::from(rng.gen_range(0..max)))?;
            write_case(&case, config.format, &a, &b, options.with_result, &mut written)?;
        }
    }
    Ok(written)
}

fn random_matrix<T>(n: usize, mut next: impl FnMut() -> T) -> Result<Matrix<T>> {
    let data = (0..n * n).map(|_| next()).collect();
    Ok(Matrix::from_shape_vec((n, n), data)?)
}

fn write_case<T: Element>(
    case: &SizeCase,
    format: MatrixFormat,
    a: &Matrix<T>,
    b: &Matrix<T>,
    with_result: bool,
    written: &mut Vec<std::path::PathBuf>,
) -> Result<()> {
    fs::write_creating_parents(&case.operand_a, &format.render(a))?;
    written.push(case.operand_a.clone());
    fs::write_creating_parents(&case.operand_b, &format.render(b))?;
    written.push(case.operand_b.clone());

    if with_result {
        let product = a.matmul(b)?;
        fs::write_creating_parents(&case.result, &format.render(&product))?;
        written.push(case.result.clone());
    }
    Ok(())
}
