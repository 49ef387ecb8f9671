use super::tokenize::LineTokenizer;

/// Project identifier declared on the first line of a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the project tag from the first line. Only the first line is looked at.
pub fn check_preamble(first_line: Option<&str>) -> Option<ProjectId> {
    first_line
        .and_then(|line| LineTokenizer.project_id(line))
        .map(ProjectId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_found() {
        assert_eq!(
            check_preamble(Some("// @PROJECT-77")),
            Some(ProjectId::new("77"))
        );
    }

    #[test]
    fn test_preamble_missing() {
        assert_eq!(check_preamble(Some("// no tag here")), None);
        assert_eq!(check_preamble(None), None);
    }
}
