//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Matrix Verify,
//! including matrices, loaders, configuration, and the verification engine.
//!
//! 此模块包含 Matrix Verify 的核心功能，
//! 包括矩阵、加载器、配置和验证引擎。

pub mod config;
pub mod error;
pub mod loader;
pub mod matrix;
pub mod models;
pub mod planner;
pub mod verifier;

// Re-exports
pub use config::VerifyConfig;
pub use error::VerifyError;
pub use matrix::Matrix;
pub use models::VerificationResult;
pub use verifier::{verify_all, MatrixVerifier};
