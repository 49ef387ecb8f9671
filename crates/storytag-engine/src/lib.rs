pub mod io;
pub mod models;
pub mod scanning;
pub mod session;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use models::{Story, apply_descriptions};
pub use scanning::{
    Diagnostic, DiagnosticKind, ProjectId, ProjectScan, ScanOutcome, ScanReport, scan_document,
    scan_lines, scan_project_document, scan_project_lines,
};
pub use session::{Session, SessionError};
