//! Parse Utilities
//!
//! Source locations and spans attached to template host events, and the
//! diagnostic type used to report failures against the template.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation {
            file,
            offset,
            line,
            col,
        }
    }

    /// Return the source around the location.
    /// Up to `max_chars` or `max_lines` on each side of the location.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = self.file.content.as_bytes();
        if content.is_empty() || self.offset > content.len() {
            return None;
        }

        let mut start_offset = self.offset.min(content.len() - 1);
        let mut end_offset = start_offset;
        let mut ctx_chars = 0;
        let mut ctx_lines = 0;

        // Move backward
        while ctx_chars < max_chars && start_offset > 0 {
            start_offset -= 1;
            ctx_chars += 1;
            if content[start_offset] == b'\n' {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        // Move forward
        ctx_chars = 0;
        ctx_lines = 0;
        while ctx_chars < max_chars && end_offset < content.len() - 1 {
            end_offset += 1;
            ctx_chars += 1;
            if content[end_offset] == b'\n' {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        let text = &self.file.content;
        let before = text.get(start_offset..self.offset)?.to_string();
        let after = text.get(self.offset..=end_offset).unwrap_or_default().to_string();
        Some((before, after))
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    #[serde(default)]
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan {
            start,
            end,
            details: None,
        }
    }

    /// Span covering `[start, end)` of `file`, computing line/column numbers.
    pub fn from_offsets(file: &ParseSourceFile, start: usize, end: usize) -> Self {
        ParseSourceSpan::new(
            location_at(file, start),
            location_at(file, end.max(start)),
        )
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn text(&self) -> &str {
        self.start
            .file
            .content
            .get(self.start.offset..self.end.offset)
            .unwrap_or_default()
    }
}

fn location_at(file: &ParseSourceFile, offset: usize) -> ParseLocation {
    let offset = offset.min(file.content.len());
    let before = &file.content.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count();
    let col = match before.iter().rposition(|&b| b == b'\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    ParseLocation::new(file.clone(), offset, line, col)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

/// A diagnostic tied to a template location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    pub fn contextual_message(&self) -> String {
        if let Some((before, after)) = self.span.start.get_context(100, 3) {
            let level_str = match self.level {
                ParseErrorLevel::Warning => "WARNING",
                ParseErrorLevel::Error => "ERROR",
            };
            format!("{} (\"{}[{} ->]{}\")", self.msg, before, level_str, after)
        } else {
            self.msg.clone()
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self
            .span
            .details
            .as_ref()
            .map(|d| format!(", {}", d))
            .unwrap_or_default();
        write!(f, "{}: {}{}", self.contextual_message(), self.span.start, details)
    }
}
