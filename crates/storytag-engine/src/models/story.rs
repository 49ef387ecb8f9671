use serde::Serialize;

/// One START/END-delimited block extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    id: String,
    content: String,
    description: String,
}

impl Story {
    /// Create an empty story for the given tag id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            description: String::new(),
        }
    }

    /// The digits following the start marker
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Captured lines, each terminated by a newline
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Append one captured line
    pub fn push_line(&mut self, line: &str) {
        self.content.push_str(line);
        self.content.push('\n');
    }

    /// Captured lines without their terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}
