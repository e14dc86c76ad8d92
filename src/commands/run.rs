// src/commands/run.rs

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::{
    core::{
        config::{Overrides, VerifyConfig},
        verifier::verify_each,
    },
    reporting::{
        generate_html_report, print_failure_details, print_header, print_row, print_summary,
        write_json_report,
    },
    resolve_locale, t,
};

/// Everything the `run` subcommand needs, as parsed from the command line.
/// `run` 子命令所需的全部参数，由命令行解析得到。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: PathBuf,
    pub overrides: Overrides,
    pub json: Option<PathBuf>,
    pub html: Option<PathBuf>,
    /// Language given with `--lang`; takes precedence over the config file.
    pub language: Option<String>,
}

pub fn execute(options: RunOptions) -> Result<()> {
    let config = setup_and_parse_config(&options.config, options.overrides)?;
    let locale = resolve_locale(options.language.as_deref().unwrap_or(&config.language));
    let locale = locale.as_str();
    rust_i18n::set_locale(locale);

    println!(
        "{}",
        t!("run.loading_config", locale = locale, path = options.config.display())
    );
    println!(
        "{}",
        t!(
            "run.directories",
            locale = locale,
            data = config.data_dir.display(),
            result = config.result_dir().display()
        )
        .cyan()
    );

    print_header(&config, locale);
    let results = verify_each(&config, config.format, |result| print_row(result, locale));

    print_summary(&results, locale);
    print_failure_details(&results, locale);

    if let Some(report_path) = &options.json {
        match write_json_report(&results, &config, report_path) {
            Ok(()) => println!(
                "\n{}",
                t!("run.json_written", locale = locale, path = report_path.display())
            ),
            Err(e) => eprintln!("{} {:#}", t!("run.report_failed", locale = locale).red(), e),
        }
    }

    if let Some(report_path) = &options.html {
        match generate_html_report(&results, report_path, locale) {
            Ok(()) => println!(
                "\n{}",
                t!("run.html_written", locale = locale, path = report_path.display())
            ),
            Err(e) => eprintln!("{} {:#}", t!("run.report_failed", locale = locale).red(), e),
        }
    }

    if results.iter().any(|r| r.is_failure()) {
        anyhow::bail!(t!("run.verification_failed", locale = locale).to_string());
    }
    Ok(())
}

/// Loads the config file and applies command line overrides on top of it.
/// 加载配置文件并在其上应用命令行覆盖。
pub fn setup_and_parse_config(config_path: &Path, overrides: Overrides) -> Result<VerifyConfig> {
    // For config parsing, we don't have the locale yet. Use English as a default.
    let locale = "en";
    let mut config = VerifyConfig::load(config_path).with_context(|| {
        t!("config_read_failed_path", locale = locale, path = config_path.display()).to_string()
    })?;
    config
        .apply(overrides)
        .with_context(|| t!("config_invalid_override", locale = locale).to_string())?;
    Ok(config)
}
