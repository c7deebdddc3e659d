//! Tailwind utility classes for tree nodes.

use std::fmt;

use indexmap::IndexSet;

use iris_core::{Directive, Property, Size, Skeleton, Stack, StackDirection, Value};

/// Ordered class list. Adding a class that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(IndexSet<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, class: impl Into<String>) {
        self.0.insert(class.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Space-separated value for a `className` attribute.
    pub fn to_class_name(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_class_name())
    }
}

impl<S: Into<String>> Extend<S> for ClassList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for class in iter {
            self.push(class);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ClassList::new();
        list.extend(iter);
        list
    }
}

/// Percentage for a fractional size in (0, 1), rounded half away from zero.
pub fn fraction_to_percent(value: f64) -> Option<f64> {
    if value > 0.0 && value < 1.0 {
        Some((value * 100.0).round())
    } else {
        None
    }
}

/// Width/height class, `axis` being `w` or `h`.
pub fn size_class(axis: &str, size: &Size) -> String {
    match size {
        Size::Absolute(size) => format!("{axis}-{}", size.keyword()),
        Size::Value(value) => match fraction_to_percent(*value) {
            Some(percent) => format!("{axis}-[{percent}%]"),
            None => format!("{axis}-{value}"),
        },
    }
}

/// Utility prefix of a numeric spacing or flex property.
fn spacing_prefix(property: Property) -> &'static str {
    match property {
        Property::Gap => "gap",
        Property::Flex => "flex",
        other => other.abbreviation(),
    }
}

fn border_class(property: Property) -> &'static str {
    match property {
        Property::BorderTop => "border-t",
        Property::BorderRight => "border-r",
        Property::BorderBottom => "border-b",
        Property::BorderLeft => "border-l",
        _ => "border",
    }
}

/// Class for a single directive, or `None` when the value adds no class
/// (a cleared flag, `shrink: true`, an empty background token).
pub fn directive_class(directive: &Directive) -> Option<String> {
    let property = directive.property;
    match (&directive.value, property) {
        (Value::Size(size), Property::Width) => Some(size_class("w", size)),
        (Value::Size(size), Property::Height) => Some(size_class("h", size)),
        (Value::Flag(true), Property::Rounded) => Some("rounded-full".to_string()),
        (Value::Flag(false), Property::Shrink) => Some("shrink-0".to_string()),
        (Value::Flag(_), Property::Rounded | Property::Shrink) => None,
        (Value::Flag(true), _) => Some(border_class(property).to_string()),
        (Value::Flag(false), _) => None,
        (Value::Token(token), _) if token.is_empty() => None,
        (Value::Token(token), _) => Some(format!("bg-{token}")),
        (Value::Number(value), _) => Some(format!("{}-{value}", spacing_prefix(property))),
        (Value::Size(_), _) => None,
    }
}

/// `flex [flex-col] <directives...>` for a stack.
pub fn stack_classes(direction: StackDirection, stack: &Stack) -> ClassList {
    let mut classes = ClassList::new();
    classes.push("flex");
    if direction == StackDirection::Vertical {
        classes.push("flex-col");
    }
    classes.extend(stack.directives().iter().filter_map(directive_class));
    classes
}

pub fn skeleton_classes(skeleton: &Skeleton) -> ClassList {
    skeleton
        .directives()
        .iter()
        .filter_map(directive_class)
        .collect()
}
