//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Tests parsing, validation, override handling and directory resolution of
//! `VerifyConfig`.
//!
//! 测试 `VerifyConfig` 的解析、验证、覆盖处理和目录解析。

mod common;

use common::*;
use matrix_verify::core::config::{ComparisonPolicy, FileTemplates, Overrides, VerifyConfig};
use matrix_verify::core::loader::MatrixFormat;
use matrix_verify::core::planner::plan_cases;
use matrix_verify::core::verifier::Tolerance;
use std::path::PathBuf;
use tempfile::tempdir;

#[cfg(test)]
mod parsing_tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = VerifyConfig::from_toml_str("sizes = [2, 3]").unwrap();
        assert_eq!(config.sizes, vec![2, 3]);
        assert_eq!(config.language, "en");
        assert_eq!(config.data_dir, PathBuf::from("files_txt"));
        assert_eq!(config.result_dir(), config.data_dir.as_path());
        assert_eq!(config.atol, 1e-6);
        assert_eq!(config.comparison, ComparisonPolicy::Tolerance);
        assert_eq!(config.format, MatrixFormat::Plain);
        assert_eq!(config.files, FileTemplates::default());
    }

    #[test]
    fn test_full_config() {
        let content = r#"
language = "ru"
sizes = [500, 100]
data_dir = "inputs"
result_dir = "outputs"
atol = 0.001
comparison = "exact"
format = "skip-header"

[files]
operand_a = "A{size}.txt"
operand_b = "B{size}.txt"
result = "C{size}.txt"
"#;
        let config = VerifyConfig::from_toml_str(content).unwrap();
        assert_eq!(config.sizes, vec![500, 100]);
        assert_eq!(config.result_dir(), PathBuf::from("outputs").as_path());
        assert_eq!(config.comparison, ComparisonPolicy::Exact);
        assert_eq!(config.format, MatrixFormat::SkipHeader);
        assert_eq!(config.tolerance(), Tolerance::Exact);

        let cases = plan_cases(&config);
        assert_eq!(cases[0].size, 500);
        assert_eq!(cases[0].operand_a, PathBuf::from("inputs/A500.txt"));
        assert_eq!(cases[0].operand_b, PathBuf::from("inputs/B500.txt"));
        assert_eq!(cases[0].result, PathBuf::from("outputs/C500.txt"));
        assert_eq!(cases[1].size, 100);
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = VerifyConfig {
            sizes: vec![8, 16],
            format: MatrixFormat::Header,
            ..VerifyConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("format = \"header\""));
        assert!(!text.contains("result_dir"));
        assert_eq!(VerifyConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        for content in [
            "",
            "sizes = []",
            "sizes = [0, 10]",
            "sizes = [10, 10]",
            "sizes = [10]\natol = -1.0",
            "sizes = [10]\natol = nan",
            "sizes = [10]\nformat = \"csv\"",
            "sizes = [10]\ncomparison = \"fuzzy\"",
            "sizes = [10]\n[files]\nresult = \"  \"",
            "sizes = [10",
        ] {
            assert!(
                VerifyConfig::from_toml_str(content).is_err(),
                "accepted: {:?}",
                content
            );
        }
    }
}

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_relative_dirs_resolve_against_config_file() {
        let project = setup_verify_project(&[2], "result_dir = \"out\"");
        let config = VerifyConfig::load(&config_path(&project)).unwrap();
        assert_eq!(config.data_dir, data_dir(&project));
        assert_eq!(config.result_dir(), project.path().join("out").as_path());
    }

    #[test]
    fn test_absolute_dirs_are_kept() {
        let elsewhere = tempdir().unwrap();
        let project = setup_verify_project(&[2], "");
        let content = format!(
            "sizes = [2]\ndata_dir = {:?}\n",
            elsewhere.path().display().to_string()
        );
        std::fs::write(config_path(&project), content).unwrap();

        let config = VerifyConfig::load(&config_path(&project)).unwrap();
        assert_eq!(config.data_dir, elsewhere.path());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempdir().unwrap();
        let err = VerifyConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.toml"));
    }
}

#[cfg(test)]
mod override_tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = VerifyConfig::default();
        config
            .apply(Overrides {
                data_dir: Some(PathBuf::from("/tmp/data")),
                result_dir: Some(PathBuf::from("/tmp/results")),
                atol: Some(0.5),
                sizes: Some(vec![7]),
                exact: false,
            })
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.result_dir(), PathBuf::from("/tmp/results").as_path());
        assert_eq!(config.tolerance(), Tolerance::Absolute(0.5));
        assert_eq!(config.sizes, vec![7]);
    }

    #[test]
    fn test_exact_flag_switches_policy() {
        let mut config = VerifyConfig::default();
        config
            .apply(Overrides {
                exact: true,
                ..Overrides::default()
            })
            .unwrap();
        assert_eq!(config.comparison, ComparisonPolicy::Exact);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = VerifyConfig::default();
        let result = config.apply(Overrides {
            sizes: Some(vec![5, 5]),
            ..Overrides::default()
        });
        assert!(result.is_err());
    }
}
