//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Matrix Verify,
//! including file system operations, logging setup, and i18n support.
//!
//! 此模块为 Matrix Verify 提供基础设施服务，
//! 包括文件系统操作、日志初始化和国际化支持。

pub mod fs;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
