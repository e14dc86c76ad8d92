// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// `[[1,2],[3,4]]`
pub const A_2X2: &str = "1 2\n3 4\n";
/// `[[5,6],[7,8]]`
pub const B_2X2: &str = "5 6\n7 8\n";
/// The exact product of `A_2X2` and `B_2X2`.
pub const C_2X2: &str = "19 22\n43 50\n";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Writes the three files of one size using the default name templates.
pub fn write_case(dir: &Path, size: usize, a: &str, b: &str, result: Option<&str>) {
    write_file(dir, &format!("mat1_{}.txt", size), a);
    write_file(dir, &format!("mat2_{}.txt", size), b);
    if let Some(result) = result {
        write_file(dir, &format!("res_{}.txt", size), result);
    }
}

/// An `n×n` matrix whose element `(i, j)` is `i + j`, in plain format.
pub fn ramp_matrix(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let row: Vec<String> = (0..n).map(|j| (i + j).to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// An `n×n` identity matrix in plain format.
pub fn identity_matrix(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        let row: Vec<&str> = (0..n).map(|j| if i == j { "1" } else { "0" }).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Creates a temporary directory with a `Verify.toml` whose data lives in
/// `files_txt/` next to it.
pub fn setup_verify_project(sizes: &[usize], extra: &str) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let sizes = sizes
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let content = format!(
        "language = \"en\"\nsizes = [{}]\ndata_dir = \"files_txt\"\n{}\n",
        sizes, extra
    );
    fs::write(temp_dir.path().join("Verify.toml"), content).expect("Failed to write Verify.toml");
    fs::create_dir_all(temp_dir.path().join("files_txt")).expect("Failed to create data dir");
    temp_dir
}

pub fn data_dir(project: &TempDir) -> PathBuf {
    project.path().join("files_txt")
}

pub fn config_path(project: &TempDir) -> PathBuf {
    project.path().join("Verify.toml")
}
