use regex::Regex;
use std::sync::OnceLock;

fn end_tag() -> &'static Regex {
    static END_TAG: OnceLock<Regex> = OnceLock::new();
    END_TAG.get_or_init(|| Regex::new(r"@USERSTORY-END").expect("Invalid end tag regex"))
}

fn start_tag() -> &'static Regex {
    static START_TAG: OnceLock<Regex> = OnceLock::new();
    START_TAG.get_or_init(|| Regex::new(r"@USERSTORY-(\d+)").expect("Invalid start tag regex"))
}

fn project_tag() -> &'static Regex {
    static PROJECT_TAG: OnceLock<Regex> = OnceLock::new();
    PROJECT_TAG.get_or_init(|| Regex::new(r"@PROJECT-(\d+)").expect("Invalid project tag regex"))
}

/// Classification of a single line of a scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken<'a> {
    /// The line carries an end marker.
    End,
    /// The line carries a start marker; `id` is the digit run of the first match.
    Start { id: &'a str },
    /// Anything else.
    Content,
}

/// Classifies lines without carrying any match state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineTokenizer;

impl LineTokenizer {
    /// Classify one line. The end marker is checked first, so a line holding
    /// both markers is an end tag.
    pub fn classify<'a>(&self, line: &'a str) -> LineToken<'a> {
        if end_tag().is_match(line) {
            return LineToken::End;
        }

        match start_tag().captures(line).and_then(|caps| caps.get(1)) {
            Some(id) => LineToken::Start { id: id.as_str() },
            None => LineToken::Content,
        }
    }

    /// Extract the project id from a line, if it carries a project tag.
    pub fn project_id<'a>(&self, line: &'a str) -> Option<&'a str> {
        project_tag()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str())
    }
}
