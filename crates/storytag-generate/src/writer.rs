use std::path::Path;
use storytag_engine::io::{self, IoError};

use crate::batch::BatchReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Replace the contents of `path` with every generated block, in story order.
///
/// The parent folder is created if needed and stories without a stub are
/// skipped. Filesystem errors are returned to the caller.
pub fn write_test_file(path: &Path, report: &BatchReport) -> Result<WriteSummary, IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        io::ensure_folder(parent)?;
    }
    io::reset_file(path)?;

    let mut summary = WriteSummary::default();
    for stub in &report.stubs {
        match stub.code() {
            Some(code) => {
                io::append_block(path, code)?;
                summary.written += 1;
            }
            None => summary.skipped += 1,
        }
    }
    Ok(summary)
}
