use crate::models::Story;

use super::{
    report::{Diagnostic, DiagnosticKind, ScanReport},
    tokenize::{LineToken, LineTokenizer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    LoadingStory { captured_lines: usize },
}

/// Single-pass state machine that turns classified lines into stories.
///
/// Feed lines in document order with [`TagScanner::push`], then call
/// [`TagScanner::finish`]. The last pushed story is the one receiving content
/// while a story is loading.
pub struct TagScanner {
    tokenizer: LineTokenizer,
    state: ScanState,
    stories: Vec<Story>,
    diagnostics: Vec<Diagnostic>,
}

impl TagScanner {
    pub fn new() -> Self {
        Self {
            tokenizer: LineTokenizer,
            state: ScanState::Idle,
            stories: vec![],
            diagnostics: vec![],
        }
    }

    /// Consume the line at 0-based `index`.
    pub fn push(&mut self, index: usize, line: &str) {
        let line_number = index + 1;

        match (self.tokenizer.classify(line), self.state) {
            (LineToken::End, ScanState::LoadingStory { captured_lines }) => {
                self.state = ScanState::Idle;
                if captured_lines == 0 {
                    self.record(
                        line_number,
                        DiagnosticKind::NoContent {
                            story_count: self.stories.len(),
                        },
                    );
                }
            }
            (LineToken::End, ScanState::Idle) => {
                self.record(line_number, DiagnosticKind::EndBeforeStart);
            }
            (LineToken::Start { .. }, ScanState::LoadingStory { .. }) => {
                self.record(line_number, DiagnosticKind::StartBeforeEnd);
            }
            (LineToken::Start { id }, ScanState::Idle) => {
                log::debug!("Story {id} opened on line {line_number}");
                self.stories.push(Story::new(id));
                self.state = ScanState::LoadingStory { captured_lines: 0 };
            }
            (LineToken::Content, ScanState::LoadingStory { captured_lines }) => {
                if let Some(current) = self.stories.last_mut() {
                    current.push_line(line);
                }
                self.state = ScanState::LoadingStory {
                    captured_lines: captured_lines + 1,
                };
            }
            (LineToken::Content, ScanState::Idle) => {}
        }
    }

    /// Finish the pass. A story still loading at this point is kept as-is.
    pub fn finish(self) -> (Vec<Story>, ScanReport) {
        (self.stories, ScanReport::from_diagnostics(self.diagnostics))
    }

    fn record(&mut self, line: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { line, kind });
    }
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new()
    }
}
