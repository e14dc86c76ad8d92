//! # Matrix Verify Library / Matrix Verify 库
//!
//! This library provides the core functionality for the Matrix Verify tool,
//! a configuration-driven checker for matrix-multiplication benchmark results.
//! For each configured size it reads two operand matrices and a candidate
//! result, computes the reference product, and compares the two.
//!
//! 此库为 Matrix Verify 工具提供核心功能，
//! 这是一个配置驱动的矩阵乘法基准结果检查器。
//! 对每个配置的尺寸，它读取两个操作数矩阵和一个候选结果，计算参考乘积并进行比较。
//!
//! ## Modules / 模块
//!
//! - `core` - Matrices, loaders, configuration and the verification engine
//! - `infra` - File system helpers, logging and i18n
//! - `reporting` - Console, JSON and HTML reports
//! - `cli` / `commands` - Command-line interface and subcommands
//!
//! - `core` - 矩阵、加载器、配置和验证引擎
//! - `infra` - 文件系统辅助、日志和国际化
//! - `reporting` - 控制台、JSON 和 HTML 报告
//! - `cli` / `commands` - 命令行接口和子命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;
pub use crate::core::verifier;
pub use infra::t;

/// Picks the best available locale for a requested one.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "ru" from "ru-RU"), and finally falls back to "en".
///
/// 为请求的语言选择最合适的可用语言。
/// 先尝试完整匹配（如 "zh-CN"），再尝试语言代码（如从 "ru-RU" 得到 "ru"），最后回退到 "en"。
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale("zh-CN"), "zh-CN");
        assert_eq!(resolve_locale("ru-RU"), "ru");
        assert_eq!(resolve_locale("ru_RU.UTF-8"), "ru");
        assert_eq!(resolve_locale("de-DE"), "en");
        assert_eq!(resolve_locale(""), "en");
    }
}
