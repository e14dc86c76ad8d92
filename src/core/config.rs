//! # Configuration Module / 配置模块
//!
//! The verification run is described by a `Verify.toml` file: which sizes to
//! check, where the operand and result files live, how they are laid out, and
//! which comparison policy applies.
//!
//! 验证运行由 `Verify.toml` 文件描述：要检查哪些尺寸、操作数和结果文件的位置、
//! 文件格式以及采用哪种比较策略。

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::loader::MatrixFormat;
use crate::core::verifier::Tolerance;
use crate::infra::fs as infra_fs;

/// Placeholder replaced by the size in file name templates.
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// How candidate elements are compared against the reference product.
/// 候选元素与参考乘积的比较方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonPolicy {
    /// Elements are parsed as `f64`; `|diff| <= atol` passes.
    /// 元素按 `f64` 解析；`|diff| <= atol` 即通过。
    #[default]
    Tolerance,
    /// Elements are parsed as integers; only exact equality passes.
    /// 元素按整数解析；只有完全相等才通过。
    Exact,
}

/// File name templates. `{size}` is replaced with the matrix size.
/// 文件名模板，其中 `{size}` 会被替换为矩阵尺寸。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileTemplates {
    #[serde(default = "default_operand_a")]
    pub operand_a: String,
    #[serde(default = "default_operand_b")]
    pub operand_b: String,
    #[serde(default = "default_result")]
    pub result: String,
}

impl Default for FileTemplates {
    fn default() -> Self {
        Self {
            operand_a: default_operand_a(),
            operand_b: default_operand_b(),
            result: default_result(),
        }
    }
}

impl FileTemplates {
    /// Substitutes `size` into a template.
    pub fn render(template: &str, size: usize) -> String {
        template.replace(SIZE_PLACEHOLDER, &size.to_string())
    }
}

/// Represents the entire verification configuration, loaded from a TOML file.
/// 代表从 TOML 文件加载的完整验证配置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// The language for output messages (e.g., "en", "ru", "zh-CN").
    /// 输出消息使用的语言（例如 "en"、"ru"、"zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// Sizes to verify, processed in the declared order.
    /// 要验证的尺寸，按声明顺序处理。
    pub sizes: Vec<usize>,

    /// Directory holding the operand files.
    /// 存放操作数文件的目录。
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding the result files. Falls back to `data_dir`.
    /// 存放结果文件的目录，未设置时使用 `data_dir`。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_dir: Option<PathBuf>,

    /// Absolute tolerance for the `tolerance` policy.
    /// `tolerance` 策略下的绝对容差。
    #[serde(default = "default_atol")]
    pub atol: f64,

    #[serde(default)]
    pub comparison: ComparisonPolicy,

    #[serde(default)]
    pub format: MatrixFormat,

    #[serde(default)]
    pub files: FileTemplates,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            sizes: vec![100, 500, 1000, 1500, 2000, 2500],
            data_dir: default_data_dir(),
            result_dir: None,
            atol: default_atol(),
            comparison: ComparisonPolicy::default(),
            format: MatrixFormat::default(),
            files: FileTemplates::default(),
        }
    }
}

/// Command line values that take precedence over the file.
/// 优先于配置文件的命令行参数。
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub result_dir: Option<PathBuf>,
    pub atol: Option<f64>,
    pub sizes: Option<Vec<usize>>,
    pub exact: bool,
}

impl VerifyConfig {
    /// Parses a configuration from TOML text and validates it.
    /// Directories are left exactly as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VerifyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    /// Relative directories are resolved against the file's own directory.
    ///
    /// 读取、解析并验证配置文件。相对目录以配置文件所在目录为基准解析。
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        config.data_dir = infra_fs::resolve_dir(&config.data_dir, base)?;
        if let Some(dir) = &config.result_dir {
            config.result_dir = Some(infra_fs::resolve_dir(dir, base)?);
        }
        Ok(config)
    }

    /// Applies command line overrides and re-validates.
    /// Override directories are relative to the working directory.
    pub fn apply(&mut self, overrides: Overrides) -> Result<()> {
        if let Some(dir) = overrides.data_dir {
            self.data_dir = infra_fs::expand_path(&dir)?;
        }
        if let Some(dir) = overrides.result_dir {
            self.result_dir = Some(infra_fs::expand_path(&dir)?);
        }
        if let Some(atol) = overrides.atol {
            self.atol = atol;
        }
        if let Some(sizes) = overrides.sizes {
            self.sizes = sizes;
        }
        if overrides.exact {
            self.comparison = ComparisonPolicy::Exact;
        }
        self.validate()
    }

    /// Checks the invariants the verifier relies on.
    /// 检查验证器依赖的不变量。
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            bail!("`sizes` must list at least one size");
        }
        let mut seen = HashSet::new();
        for &size in &self.sizes {
            if size == 0 {
                bail!("sizes must be positive, found 0");
            }
            if !seen.insert(size) {
                bail!("size {} is listed more than once", size);
            }
        }
        if !self.atol.is_finite() || self.atol < 0.0 {
            bail!("`atol` must be a finite, non-negative number, found {}", self.atol);
        }
        for (name, template) in [
            ("files.operand_a", &self.files.operand_a),
            ("files.operand_b", &self.files.operand_b),
            ("files.result", &self.files.result),
        ] {
            if template.trim().is_empty() {
                bail!("`{}` must not be empty", name);
            }
        }
        Ok(())
    }

    /// Directory that holds the result files.
    pub fn result_dir(&self) -> &Path {
        self.result_dir.as_deref().unwrap_or(&self.data_dir)
    }

    /// The tolerance implied by the comparison policy.
    pub fn tolerance(&self) -> Tolerance {
        match self.comparison {
            ComparisonPolicy::Tolerance => Tolerance::Absolute(self.atol),
            ComparisonPolicy::Exact => Tolerance::Exact,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("files_txt")
}

fn default_atol() -> f64 {
    1e-6
}

fn default_operand_a() -> String {
    "mat1_{size}.txt".to_string()
}

fn default_operand_b() -> String {
    "mat2_{size}.txt".to_string()
}

fn default_result() -> String {
    "res_{size}.txt".to_string()
}
