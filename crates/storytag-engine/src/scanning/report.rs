use serde::Serialize;
use std::fmt;

/// Rendered form of a scan that recorded nothing.
pub const NO_ERRORS: &str = "No errors found";
/// Rendered form of a scan aborted by a missing project tag.
pub const MISSING_PROJECT_TAG: &str = "Error: Project tag not found on line 1";

/// Cause of a single structural diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An end tag closed a story that captured no lines.
    ///
    /// `story_count` is the number of stories accepted so far, not the id of
    /// the story that was closed.
    NoContent { story_count: usize },
    /// An end tag appeared while no story was open.
    EndBeforeStart,
    /// A start tag appeared while a story was still open.
    StartBeforeEnd,
}

/// A diagnostic tied to the 1-based line that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::NoContent { story_count } => {
                write!(f, "Error: No content found for user story {story_count}")
            }
            DiagnosticKind::EndBeforeStart => {
                write!(f, "Error: End tag found before start tag on line {}", self.line)
            }
            DiagnosticKind::StartBeforeEnd => {
                write!(f, "Error: Start tag found before end tag on line {}", self.line)
            }
        }
    }
}

/// Outcome of validating a document's tag structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "diagnostics", rename_all = "snake_case")]
pub enum ScanReport {
    Clean,
    Diagnostics(Vec<Diagnostic>),
    /// The first line did not declare a project; nothing was scanned.
    MissingProjectTag,
}

impl ScanReport {
    pub(crate) fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            Self::Clean
        } else {
            Self::Diagnostics(diagnostics)
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Diagnostics(diagnostics) => diagnostics,
            Self::Clean | Self::MissingProjectTag => &[],
        }
    }
}

/// Renders the text report: the sentinel, or one newline-terminated message
/// per diagnostic.
impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => f.write_str(NO_ERRORS),
            Self::MissingProjectTag => f.write_str(MISSING_PROJECT_TAG),
            Self::Diagnostics(diagnostics) => {
                for diagnostic in diagnostics {
                    writeln!(f, "{diagnostic}")?;
                }
                Ok(())
            }
        }
    }
}
