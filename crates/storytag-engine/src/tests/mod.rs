use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary workspace directory
pub fn create_test_workspace() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file inside the workspace with content
pub fn create_test_file(workspace: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = workspace.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
