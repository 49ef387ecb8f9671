use crate::scanning::{ProjectId, ProjectScan, ScanOutcome, scan_document, scan_project_document};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Cannot derive a test file name from {0}")]
    InvalidDocumentPath(PathBuf),
}

/// Per-invocation context threaded through scanning and generation.
#[derive(Debug, Clone)]
pub struct Session {
    workspace_root: PathBuf,
    tests_dir: PathBuf,
    test_suffix: String,
    require_project_tag: bool,
    project: Option<ProjectId>,
}

impl Session {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        let workspace_root = workspace_root.into();
        Self {
            tests_dir: workspace_root.join("tests"),
            workspace_root,
            test_suffix: ".test.js".to_string(),
            require_project_tag: false,
            project: None,
        }
    }

    /// Directory generated test files go in. Relative paths are taken from the
    /// workspace root.
    pub fn with_tests_dir(mut self, tests_dir: impl AsRef<Path>) -> Self {
        self.tests_dir = self.workspace_root.join(tests_dir);
        self
    }

    pub fn with_test_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.test_suffix = suffix.into();
        self
    }

    pub fn with_project_tag_required(mut self, required: bool) -> Self {
        self.require_project_tag = required;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn test_suffix(&self) -> &str {
        &self.test_suffix
    }

    pub fn tests_dir(&self) -> &Path {
        &self.tests_dir
    }

    /// Project declared by the last project-aware scan
    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    /// Scan a document with the variant this session is configured for.
    ///
    /// The project declared by this scan (or its absence) replaces whatever
    /// the session remembered.
    pub fn scan(&mut self, text: &str) -> ProjectScan {
        if !self.require_project_tag {
            let ScanOutcome { stories, report } = scan_document(text);
            return ProjectScan {
                project: None,
                stories,
                report,
            };
        }

        let scan = scan_project_document(text);
        self.project = scan.project.clone();
        scan
    }

    /// Resolve a document path given on the command line against the root
    pub fn resolve(&self, document: &Path) -> PathBuf {
        self.workspace_root.join(document)
    }

    /// Test file that stubs for `document` are written to.
    ///
    /// `<root>/src/cart.js` maps to `<tests_dir>/src/cart<suffix>`.
    pub fn test_file_for(&self, document: &Path) -> Result<PathBuf, SessionError> {
        let absolute = self.resolve(document);
        let invalid = || SessionError::InvalidDocumentPath(document.to_path_buf());

        // `..` components are resolved before deciding the document is inside
        let inside = absolute
            .strip_prefix(&self.workspace_root)
            .ok()
            .and_then(|inside| RelativePathBuf::from_path(inside).ok())
            .map(|relative| relative.normalize())
            .filter(|relative| !relative.starts_with(".."));

        let relative = match inside {
            Some(relative) => relative,
            None => {
                let name = absolute.file_name().ok_or_else(invalid)?;
                RelativePathBuf::from_path(name).map_err(|_| invalid())?
            }
        };

        let stem = relative.with_extension("");
        if stem.file_name().is_none() {
            return Err(invalid());
        }

        let test_file = RelativePathBuf::from(format!("{stem}{}", self.test_suffix));
        Ok(test_file.to_path(&self.tests_dir))
    }
}
