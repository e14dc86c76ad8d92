//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system helpers used by the verifier and the
//! commands: reading matrix files with typed errors, expanding and resolving
//! configured directories, and writing generated files.
//!
//! 此模块提供验证器和命令使用的文件系统辅助功能：
//! 以类型化错误读取矩阵文件、展开并解析配置的目录，以及写入生成的文件。

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::VerifyError;

/// Reads a matrix file into memory.
///
/// A missing file maps to [`VerifyError::FileNotFound`]; any other I/O failure
/// maps to [`VerifyError::Io`].
///
/// 将矩阵文件读入内存。
/// 文件缺失映射为 [`VerifyError::FileNotFound`]，其他 I/O 错误映射为 [`VerifyError::Io`]。
pub fn read_matrix_source(path: &Path) -> Result<String, VerifyError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => VerifyError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => VerifyError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Returns the first path in `paths` that is not an existing file.
/// 返回 `paths` 中第一个不存在的文件路径。
pub fn first_missing<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Option<&'a Path> {
    paths.into_iter().find(|path| !path.is_file())
}

/// Expands `~` and environment variables in a configured path.
///
/// # Arguments
/// * `raw` - Path as written in the configuration or on the command line
///
/// # Returns
/// The expanded path, or an error naming the variable that could not be resolved
pub fn expand_path(raw: &Path) -> Result<PathBuf> {
    let as_str = raw
        .to_str()
        .ok_or_else(|| anyhow!("Path is not valid UTF-8: {}", raw.display()))?;
    let expanded = shellexpand::full(as_str)
        .map_err(|e| anyhow!("Failed to expand path '{}': {}", as_str, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Expands `raw` and, if it is relative, anchors it at `base`.
///
/// Relative directories in a config file are interpreted relative to the
/// directory containing that file, not the current working directory.
///
/// 展开 `raw`，若为相对路径则以 `base` 为基准。
/// 配置文件中的相对目录相对于配置文件所在目录解释，而不是当前工作目录。
pub fn resolve_dir(raw: &Path, base: &Path) -> Result<PathBuf> {
    let expanded = expand_path(raw)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub fn write_creating_parents(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file_is_file_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        match read_matrix_source(&path) {
            Err(VerifyError::FileNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_matrix_source(dir.path()),
            Err(VerifyError::Io { .. })
        ));
    }

    #[test]
    fn test_first_missing() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("a.txt");
        fs::write(&present, "1").unwrap();
        let absent = dir.path().join("b.txt");
        assert_eq!(first_missing([present.as_path()]), None);
        assert_eq!(
            first_missing([present.as_path(), absent.as_path()]),
            Some(absent.as_path())
        );
    }

    #[test]
    fn test_resolve_dir_relative_and_absolute() {
        let base = Path::new("/configs");
        assert_eq!(
            resolve_dir(Path::new("data"), base).unwrap(),
            PathBuf::from("/configs/data")
        );
        assert_eq!(
            resolve_dir(Path::new("/abs/data"), base).unwrap(),
            PathBuf::from("/abs/data")
        );
    }

    #[test]
    fn test_write_creating_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/file.txt");
        write_creating_parents(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
