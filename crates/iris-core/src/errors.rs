//! Error types for the IRIS compiler.

use std::fmt;

use thiserror::Error;

use crate::ast::Node;

/// Top-level error type for the IRIS compiler.
#[derive(Debug, Error)]
pub enum IrisError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Position of a syntax error in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// 1-based line.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
    /// Byte offset into the source.
    pub offset: usize,
    /// Width of the offending text in characters (at least 1 when rendered).
    pub len: usize,
}

impl Location {
    /// Resolve a byte offset into line and column. `len` is the byte length of
    /// the offending text starting at `offset`.
    pub fn resolve(source: &str, offset: usize, len: usize) -> Self {
        let offset = floor_char_boundary(source, offset);
        let before = &source[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() as u32 + 1;
        let column = source[line_start..offset].chars().count() as u32 + 1;

        let end = floor_char_boundary(source, offset.saturating_add(len));
        let width = source[offset..end].chars().count();

        Self {
            line,
            column,
            offset,
            len: width,
        }
    }

    /// Caret line pointing at the span, e.g. `    ^^^`.
    pub fn pointer(&self) -> String {
        let indent = " ".repeat(self.column.saturating_sub(1) as usize);
        format!("{}{}", indent, "^".repeat(self.len.max(1)))
    }
}

fn floor_char_boundary(source: &str, mut index: usize) -> usize {
    if index >= source.len() {
        return source.len();
    }
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected character {found:?}: expected {expected}")]
    UnexpectedChar { found: char, expected: String },

    #[error("Unknown element `{name}`: expected V, H, S or x<count>")]
    UnknownElement { name: String },

    #[error("Unknown property `{token}`")]
    UnknownProperty { token: String },

    #[error("Property `{token}` is not allowed on {element}")]
    PropertyNotAllowed { token: String, element: String },

    #[error("Expected {expected} after `{token}`")]
    MissingValue { token: String, expected: String },

    #[error("Expected a repeat count after `x`")]
    MissingRepeatCount,

    #[error("Invalid repeat count `{value}`: must be a positive integer")]
    InvalidRepeatCount { value: String },

    #[error("Expected `{{` after repeat count")]
    MissingRepeatBody,

    #[error("A repeat body must contain exactly one element, found {found}")]
    RepeatArity { found: usize },

    #[error("Unclosed `{delimiter}`")]
    Unclosed { delimiter: char },

    #[error("Unexpected `{delimiter}`")]
    UnexpectedClosing { delimiter: char },

    #[error("Unterminated block comment")]
    UnterminatedComment,

    #[error("Empty document: expected at least one element")]
    EmptyDocument,

    #[error("Blocks nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
}

/// A located syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    /// The full source line the error is on.
    pub source_line: String,
}

impl ParseError {
    /// Build an error for `len` bytes of `source` starting at `offset`.
    pub fn at(kind: ParseErrorKind, source: &str, offset: usize, len: usize) -> Self {
        let location = Location::resolve(source, offset, len);
        let source_line = source
            .lines()
            .nth(location.line as usize - 1)
            .unwrap_or_default()
            .to_string();
        Self {
            kind,
            location,
            source_line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Parse error at line {}, column {}:",
            self.location.line, self.location.column
        )?;
        writeln!(f, "  {}", self.source_line)?;
        writeln!(f, "  {}", self.location.pointer())?;
        write!(f, "  {}", self.kind)
    }
}

impl std::error::Error for ParseError {}

/// What a tree violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    #[error("Invalid {property} value: {value}. Must be >= 0.")]
    Negative { property: &'static str, value: f64 },

    #[error("Invalid {property} value: {value}. Must be > 0.")]
    NotPositive { property: &'static str, value: f64 },

    #[error("Invalid repeat count: {count}. Must be > 0.")]
    RepeatCountNotPositive { count: f64 },

    #[error("Invalid repeat count: {count}. Must be an integer.")]
    RepeatCountNotInteger { count: f64 },
}

/// A tree value outside its valid range, with the node that holds it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub node: Box<Node>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, node: &Node) -> Self {
        Self {
            kind,
            node: Box::new(node.clone()),
        }
    }
}

/// Errors reading markup back for re-formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Unclosed tag <{name}> opened at offset {offset}")]
    UnclosedTag { name: String, offset: usize },

    #[error("Closing tag </{found}> at offset {offset} does not match <{expected}>")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("Closing tag </{name}> at offset {offset} has no opening tag")]
    UnexpectedClosingTag { name: String, offset: usize },

    #[error("Malformed tag at offset {offset}")]
    MalformedTag { offset: usize },
}
