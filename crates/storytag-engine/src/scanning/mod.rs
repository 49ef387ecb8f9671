//! # Tag Scanning
//!
//! Extracts user stories from a document in one forward pass.
//!
//! ## Phases
//!
//! 1. **Line classification** (`tokenize`): every line is independently
//!    classified as an end tag, a start tag (with its id) or content. The end
//!    tag is checked first.
//! 2. **State machine** (`scanner`): `TagScanner` moves between idle and
//!    loading, appends content to the current story and records structural
//!    diagnostics.
//! 3. **Preamble** (`preamble`): the project-aware variant requires the first
//!    line to carry a project tag before stories are scanned.
//!
//! ## Key Invariants
//!
//! - A story exists iff its start tag was accepted while idle
//! - Structural errors never drop content of well-formed stories
//! - A story left open at end of input is kept without a diagnostic
//! - Diagnostic line numbers are 1-based and document-absolute

pub mod preamble;
pub mod report;
pub mod scanner;
pub mod tokenize;

pub use preamble::{ProjectId, check_preamble};
pub use report::{Diagnostic, DiagnosticKind, MISSING_PROJECT_TAG, NO_ERRORS, ScanReport};
pub use scanner::TagScanner;
pub use tokenize::{LineToken, LineTokenizer};

use crate::models::Story;
use serde::Serialize;

/// Stories and report produced by one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub stories: Vec<Story>,
    pub report: ScanReport,
}

/// Result of the project-aware scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectScan {
    pub project: Option<ProjectId>,
    pub stories: Vec<Story>,
    pub report: ScanReport,
}

/// Scan every line of a document for stories.
pub fn scan_lines<I, S>(lines: I) -> ScanOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan_from(lines.into_iter().enumerate())
}

/// Scan a whole document held as one string.
pub fn scan_document(text: &str) -> ScanOutcome {
    scan_lines(text.lines())
}

/// Scan a document whose first line must declare the project.
///
/// Without the project tag no stories are scanned and the report is
/// [`ScanReport::MissingProjectTag`].
pub fn scan_project_lines<I, S>(lines: I) -> ProjectScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter().enumerate();

    let project = lines
        .next()
        .and_then(|(_, first)| check_preamble(Some(first.as_ref())));

    let Some(project) = project else {
        return ProjectScan {
            project: None,
            stories: vec![],
            report: ScanReport::MissingProjectTag,
        };
    };

    let ScanOutcome { stories, report } = scan_from(lines);
    ProjectScan {
        project: Some(project),
        stories,
        report,
    }
}

pub fn scan_project_document(text: &str) -> ProjectScan {
    scan_project_lines(text.lines())
}

fn scan_from<S: AsRef<str>>(lines: impl Iterator<Item = (usize, S)>) -> ScanOutcome {
    let mut scanner = TagScanner::new();
    for (index, line) in lines {
        scanner.push(index, line.as_ref());
    }
    let (stories, report) = scanner.finish();
    ScanOutcome { stories, report }
}

#[cfg(test)]
mod tests;
