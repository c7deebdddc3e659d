//! Core types for the IRIS layout compiler.
//!
//! This crate provides the foundational types used across the other iris crates:
//! - The layout tree (`Node`, `Stack`, `Skeleton`, `Repeat`, `Program`)
//! - The styling directive table shared by validation and class generation
//! - A builder for constructing trees without going through text
//! - Error types

pub mod ast;
pub mod builder;
pub mod errors;
pub mod style;

#[cfg(feature = "serde")]
mod serde_number;

pub use ast::*;
pub use errors::*;
pub use style::*;
