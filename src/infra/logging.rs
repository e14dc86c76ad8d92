//! # Logging / 日志
//!
//! Diagnostic logging goes through the `log` facade. User-facing output stays
//! on stdout via the reporting module.
//!
//! 诊断日志通过 `log` 门面输出，面向用户的输出仍由报告模块打印到标准输出。

use env_logger::Env;

/// Installs the `env_logger` backend. `RUST_LOG` overrides the default `warn`
/// filter. Calling this more than once is harmless.
///
/// 安装 `env_logger` 后端。`RUST_LOG` 可覆盖默认的 `warn` 级别，重复调用无副作用。
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
