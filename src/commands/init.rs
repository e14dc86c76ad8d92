//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module provides functionality for creating a new `Verify.toml`
//! through an interactive command-line wizard, or non-interactively with the
//! default settings.
//!
//! 此模块通过交互式命令行向导创建新的 `Verify.toml`，
//! 也可以非交互地使用默认设置创建。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Step-by-step prompts for sizes, directory, format and policy
//! - **Overwrite Protection**: Confirmation prompts before overwriting existing configurations
//!
//! - **交互式向导**: 逐步提示尺寸、目录、格式和比较策略
//! - **覆盖保护**: 覆盖现有配置前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::{Path, PathBuf};

use crate::core::config::{ComparisonPolicy, VerifyConfig};
use crate::core::loader::MatrixFormat;
use crate::infra::fs;
use crate::t;

/// Runs the wizard and writes the configuration to `config_path`.
///
/// With `non_interactive` the default configuration is written. An existing
/// file is only replaced when `force` is set; the wizard asks instead.
///
/// 运行向导并将配置写入 `config_path`。
/// 使用 `non_interactive` 时写出默认配置。仅在设置 `force` 时才替换现有文件，交互模式下则会询问。
pub fn run_init_wizard(
    config_path: &Path,
    language: &str,
    non_interactive: bool,
    force: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    if non_interactive {
        if config_path.exists() && !force {
            println!(
                "{}",
                t!("init_file_exists", locale = language, path = config_path.display()).red()
            );
            println!("{}", t!("init_use_force", locale = language).yellow());
            return Ok(());
        }
        let config = VerifyConfig {
            language: language.to_string(),
            ..VerifyConfig::default()
        };
        return write_config(config_path, &config, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if config_path.exists() && !force {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let defaults = VerifyConfig::default();

    let sizes_text: String = Input::with_theme(&theme)
        .with_prompt(t!("init_sizes_prompt", locale = language))
        .default(join_sizes(&defaults.sizes))
        .validate_with(|input: &String| -> Result<(), String> {
            parse_sizes(input)
                .map(|_| ())
                .map_err(|_| t!("init_invalid_sizes", locale = language).to_string())
        })
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
    // Already checked by the validator above.
    let sizes = parse_sizes(&sizes_text).unwrap_or_else(|_| defaults.sizes.clone());

    let data_dir: String = Input::with_theme(&theme)
        .with_prompt(t!("init_data_dir_prompt", locale = language))
        .default(defaults.data_dir.display().to_string())
        .interact_text()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let format_names: Vec<String> = MatrixFormat::ALL.iter().map(|f| f.to_string()).collect();
    let format_index = Select::with_theme(&theme)
        .with_prompt(t!("init_format_prompt", locale = language))
        .items(&format_names)
        .default(0)
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let comparisons = [
        (ComparisonPolicy::Tolerance, t!("init_comparison_tolerance", locale = language)),
        (ComparisonPolicy::Exact, t!("init_comparison_exact", locale = language)),
    ];
    let comparison_index = Select::with_theme(&theme)
        .with_prompt(t!("init_comparison_prompt", locale = language))
        .items(&comparisons.iter().map(|c| c.1.to_string()).collect::<Vec<_>>())
        .default(0)
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
    let comparison = comparisons[comparison_index].0;

    let atol = if comparison == ComparisonPolicy::Tolerance {
        Input::<f64>::with_theme(&theme)
            .with_prompt(t!("init_atol_prompt", locale = language))
            .default(defaults.atol)
            .interact_text()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?
    } else {
        defaults.atol
    };

    let config = VerifyConfig {
        language: language.to_string(),
        sizes,
        data_dir: PathBuf::from(data_dir),
        atol,
        comparison,
        format: MatrixFormat::ALL[format_index],
        ..defaults
    };
    config
        .validate()
        .context(t!("init_invalid_config", locale = language).to_string())?;

    write_config(config_path, &config, language)
}

/// Parses a comma or whitespace separated list of sizes.
/// 解析以逗号或空白分隔的尺寸列表。
pub fn parse_sizes(input: &str) -> Result<Vec<usize>> {
    let sizes = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("`{}` is not a valid size", s))
        })
        .collect::<Result<Vec<_>>>()?;
    if sizes.is_empty() || sizes.contains(&0) {
        anyhow::bail!("sizes must be a non-empty list of positive integers");
    }
    Ok(sizes)
}

fn join_sizes(sizes: &[usize]) -> String {
    sizes
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_config(path: &Path, config: &VerifyConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write_creating_parents(path, &toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
