//! Comment runs attached to declarations.

use serde::{Deserialize, Serialize};

/// An ordered run of comment (or blank) lines preceding an element, plus an
/// optional `# ...` comment written on the element's own line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    same_line: Option<String>,
}

impl Comment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A comment made of the given lines, each trimmed.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut comment = Comment::new();
        for line in lines {
            comment.push_line(line.as_ref());
        }
        comment
    }

    /// Append one line. Surrounding whitespace is dropped; blank lines are kept as empty strings.
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.trim().to_string());
    }

    pub fn set_same_line(&mut self, text: &str) {
        let text = text.trim();
        self.same_line = (!text.is_empty()).then(|| text.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn same_line(&self) -> Option<&str> {
        self.same_line.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.same_line.is_none()
    }

    /// Move the buffered content out, leaving an empty comment behind.
    pub fn take(&mut self) -> Comment {
        std::mem::take(self)
    }
}
