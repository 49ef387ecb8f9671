use async_trait::async_trait;
use storytag_engine::Story;

use crate::generator::{GenerationError, TestGenerator};

/// Offline generator that writes a passing jest-style stub per story.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderGenerator;

impl PlaceholderGenerator {
    pub fn render(&self, story: &Story) -> String {
        let mut out = format!("test('User story {}', () => {{\n", story.id());

        if !story.description().is_empty() {
            out.push_str(&format!("    // {}\n", story.description()));
        }
        for line in story.lines().map(strip_comment_marks).filter(|l| !l.is_empty()) {
            out.push_str(&format!("    // {line}\n"));
        }

        out.push_str("    expect(true).toBe(true);\n});");
        out
    }
}

#[async_trait]
impl TestGenerator for PlaceholderGenerator {
    async fn generate(&self, story: &Story) -> Result<String, GenerationError> {
        Ok(self.render(story))
    }
}

fn strip_comment_marks(line: &str) -> &str {
    line.trim().trim_start_matches(['/', '*', '#']).trim()
}
