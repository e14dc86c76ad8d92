//! # Verification Planner Module / 验证计划模块
//!
//! Turns the configured sizes into concrete [`SizeCase`]s with resolved file
//! paths, in the order the sizes were declared.
//!
//! 将配置的尺寸转换为带有已解析文件路径的 [`SizeCase`]，顺序与声明顺序一致。

use std::path::{Path, PathBuf};

use crate::core::config::{FileTemplates, VerifyConfig};

/// One `n×n` benchmark instance and the files that belong to it.
/// 一个 `n×n` 基准实例及其对应的文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeCase {
    pub size: usize,
    pub operand_a: PathBuf,
    pub operand_b: PathBuf,
    pub result: PathBuf,
}

impl SizeCase {
    /// The three input paths, in reading order.
    pub fn paths(&self) -> [&Path; 3] {
        [&self.operand_a, &self.operand_b, &self.result]
    }

    /// Label used in reports, e.g. `100x100`.
    pub fn label(&self) -> String {
        size_label(self.size)
    }
}

/// Formats a size the way reports show it.
pub fn size_label(size: usize) -> String {
    format!("{}x{}", size, size)
}

/// Builds the case for a single size.
pub fn case_for(config: &VerifyConfig, size: usize) -> SizeCase {
    let files = &config.files;
    SizeCase {
        size,
        operand_a: config
            .data_dir
            .join(FileTemplates::render(&files.operand_a, size)),
        operand_b: config
            .data_dir
            .join(FileTemplates::render(&files.operand_b, size)),
        result: config
            .result_dir()
            .join(FileTemplates::render(&files.result, size)),
    }
}

/// Creates the list of cases to verify, one per configured size.
/// 为每个配置的尺寸创建一个待验证用例。
pub fn plan_cases(config: &VerifyConfig) -> Vec<SizeCase> {
    config
        .sizes
        .iter()
        .map(|&size| case_for(config, size))
        .collect()
}
