//! JSX generation for IRIS layout trees.
//!
//! Stacks become flex `<div>`s and skeletons become `<Skeleton />`
//! elements, both styled with Tailwind utility classes. The generator
//! produces a [`Markup`] tree which the formatter renders pretty-printed or
//! minified.

pub mod classes;
pub mod format;
pub mod generator;
pub mod markup;
pub mod options;

pub use classes::{fraction_to_percent, ClassList};
pub use format::{dedupe_classes, format, render};
pub use generator::{generate, generate_markup, generate_program};
pub use markup::{Attribute, AttributeValue, Element, Markup};
pub use options::{CompileOptions, FormatOptions};
