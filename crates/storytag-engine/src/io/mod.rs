use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl IoError {
    fn at(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| IoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Whether `path` is an existing directory. Only "not found" maps to `false`.
pub fn folder_exists(path: &Path) -> Result<bool, IoError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(IoError::at(path)(e)),
    }
}

/// Whether `path` is an existing regular file. Only "not found" maps to `false`.
pub fn file_exists(path: &Path) -> Result<bool, IoError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(IoError::at(path)(e)),
    }
}

/// Create the directory (and parents) unless it already exists
pub fn ensure_folder(path: &Path) -> Result<(), IoError> {
    if folder_exists(path)? {
        return Ok(());
    }
    if path.exists() {
        return Err(IoError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(IoError::at(path))?;
    log::info!("Folder created at {}", path.display());
    Ok(())
}

/// Leave an empty file at `path`, creating it or truncating what was there
pub fn reset_file(path: &Path) -> Result<(), IoError> {
    let existed = file_exists(path)?;
    fs::write(path, "").map_err(IoError::at(path))?;
    if existed {
        log::info!("File wiped: {}", path.display());
    } else {
        log::info!("File created at {}", path.display());
    }
    Ok(())
}

/// Append one block followed by a line separator
pub fn append_block(path: &Path, block: &str) -> Result<(), IoError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(IoError::at(path))?;
    writeln!(file, "{block}").map_err(IoError::at(path))
}

/// Write `content` only if nothing exists at `path` yet.
///
/// Returns whether the file was written.
pub fn write_if_absent(path: &Path, content: &str) -> Result<bool, IoError> {
    if file_exists(path)? {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_folder(parent)?;
    }
    fs::write(path, content).map_err(IoError::at(path))?;
    log::info!("File created at {}", path.display());
    Ok(true)
}

/// Read a source document to scan
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !file_exists(path)? {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::at(path))
}
