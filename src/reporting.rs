//! # Reporting Module / 报告模块
//!
//! This module handles the display and export of verification results.
//! It prints colourful, formatted tables to the console and writes optional
//! JSON and HTML reports, with internationalization support.
//!
//! 此模块处理验证结果的显示和导出。
//! 它在控制台打印彩色格式化表格，并可选地写出 JSON 和 HTML 报告，支持国际化。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_details, print_header, print_row, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;
