//! IRIS: a compact notation for loading-skeleton layouts.
//!
//! ```text
//! V(g4 mb6 pb6 bb){ x2{ H(g4){ S(w16 h16 r sh0) V(g2 f1){ S(h4 w.75) S(h3 w.5) } S(h4 w16) } } }
//! ```
//!
//! compiles to nested flex `<div>`s and `<Skeleton />` elements styled with
//! Tailwind classes.
//!
//! ## Example
//!
//! ```ignore
//! use iris::{compile, CompileOptions};
//!
//! let jsx = compile("V(g4){ S(h4) S(h3 w.5) }", &CompileOptions::default())?;
//! assert!(jsx.contains("w-[50%]"));
//! ```
//!
//! Stages can also be driven one at a time: [`parse`] to a [`Node`],
//! [`validate`] it, then [`generate`] markup.

use std::fs;
use std::path::Path;

pub use iris_codegen::{
    dedupe_classes, generate, generate_markup, generate_program, render, ClassList,
    CompileOptions, Element, FormatOptions, Markup,
};
pub use iris_core::builder;
pub use iris_core::{
    AbsoluteSize, IrisError, Location, MarkupError, Node, ParseError, ParseErrorKind, Program,
    Repeat, Size, Skeleton, Stack, StackDirection, ValidationError, ValidationErrorKind,
};
pub use iris_parser::{parse, parse_program, MAX_NESTING};
pub use iris_validator::{validate, validate_program};

/// Parse a file into a single tree.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node, IrisError> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let source = fs::read_to_string(path)?;
    Ok(parse(&source)?)
}

/// Parse and generate. Several top-level elements are wrapped according to
/// `options.use_fragment`. The tree is not validated.
pub fn compile(source: &str, options: &CompileOptions) -> Result<String, IrisError> {
    let program = parse_program(source)?;
    Ok(generate_program(&program, options))
}

/// Read, parse and generate a file.
pub fn compile_file(path: impl AsRef<Path>, options: &CompileOptions) -> Result<String, IrisError> {
    let path = path.as_ref();
    log::debug!("compiling {}", path.display());
    let source = fs::read_to_string(path)?;
    compile(&source, options)
}

/// Re-format existing markup.
pub fn format(markup: &str, options: &FormatOptions) -> Result<String, IrisError> {
    Ok(iris_codegen::format(markup, options)?)
}

/// Read a tree from its JSON form.
pub fn tree_from_json(json: &str) -> Result<Node, IrisError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a tree in its JSON form.
pub fn tree_to_json(node: &Node, pretty: bool) -> Result<String, IrisError> {
    let json = if pretty {
        serde_json::to_string_pretty(node)?
    } else {
        serde_json::to_string(node)?
    };
    Ok(json)
}
