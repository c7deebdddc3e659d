//! Parser for the IRIS layout notation.
//!
//! ```text
//! V(g4 mb6){ x2{ H(g4){ S(w16 h16 r sh0) S(h4 w.75) } } }
//! ```
//!
//! Whitespace and `//` / `/* */` comments may appear between any two tokens.

pub mod lexer;
mod grammar;

pub use grammar::MAX_NESTING;

use iris_core::{Node, ParseError, Program};

/// Parse a document into its top-level siblings.
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    log::trace!("parsing {} bytes", input.len());
    let program = grammar::parse_program(input)?;
    log::debug!("parsed {} top-level element(s)", program.children.len());
    Ok(program)
}

/// Parse a document into a single tree. Several top-level elements are
/// wrapped in a `VStack`.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    parse_program(input).map(Program::into_node)
}
