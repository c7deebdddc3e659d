//! Styling directives.
//!
//! Every styling field of a stack or skeleton is described by a [`Property`].
//! A set field is exposed as a [`Directive`] (property plus value), so that
//! validation and class generation are single passes over a directive list
//! instead of field-by-field code.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::ast::{Size, Skeleton, Stack};

/// Directive list of a single node. Most nodes set only a handful.
pub type Directives = SmallVec<[Directive; 8]>;

/// A styling property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Gap,
    Margin,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    MarginX,
    MarginY,
    Padding,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    PaddingX,
    PaddingY,
    Border,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    Flex,
    Width,
    Height,
    Rounded,
    Shrink,
    Background,
}

/// Which kind of node a property applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stack,
    Skeleton,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Stack => write!(f, "stack"),
            Target::Skeleton => write!(f, "skeleton"),
        }
    }
}

/// Numeric range a property value must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `>= 0`
    NonNegative,
    /// `> 0` (numeric sizes only; named sizes always pass)
    Positive,
}

impl Bound {
    pub fn admits(self, value: f64) -> bool {
        match self {
            Bound::NonNegative => value >= 0.0,
            Bound::Positive => value > 0.0,
        }
    }
}

impl Property {
    /// Stack properties in class-list order.
    pub const STACK: [Property; 21] = [
        Property::Gap,
        Property::Margin,
        Property::MarginTop,
        Property::MarginRight,
        Property::MarginBottom,
        Property::MarginLeft,
        Property::MarginX,
        Property::MarginY,
        Property::Padding,
        Property::PaddingTop,
        Property::PaddingRight,
        Property::PaddingBottom,
        Property::PaddingLeft,
        Property::PaddingX,
        Property::PaddingY,
        Property::Border,
        Property::BorderTop,
        Property::BorderRight,
        Property::BorderBottom,
        Property::BorderLeft,
        Property::Flex,
    ];

    /// Skeleton properties in class-list order.
    pub const SKELETON: [Property; 5] = [
        Property::Width,
        Property::Height,
        Property::Rounded,
        Property::Shrink,
        Property::Background,
    ];

    /// Field name in the JSON tree format.
    pub fn field_name(self) -> &'static str {
        match self {
            Property::Gap => "gap",
            Property::Margin => "margin",
            Property::MarginTop => "marginTop",
            Property::MarginRight => "marginRight",
            Property::MarginBottom => "marginBottom",
            Property::MarginLeft => "marginLeft",
            Property::MarginX => "marginX",
            Property::MarginY => "marginY",
            Property::Padding => "padding",
            Property::PaddingTop => "paddingTop",
            Property::PaddingRight => "paddingRight",
            Property::PaddingBottom => "paddingBottom",
            Property::PaddingLeft => "paddingLeft",
            Property::PaddingX => "paddingX",
            Property::PaddingY => "paddingY",
            Property::Border => "border",
            Property::BorderTop => "borderTop",
            Property::BorderRight => "borderRight",
            Property::BorderBottom => "borderBottom",
            Property::BorderLeft => "borderLeft",
            Property::Flex => "flex",
            Property::Width => "width",
            Property::Height => "height",
            Property::Rounded => "rounded",
            Property::Shrink => "shrink",
            Property::Background => "background",
        }
    }

    /// Abbreviation used in the layout notation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Property::Gap => "g",
            Property::Margin => "m",
            Property::MarginTop => "mt",
            Property::MarginRight => "mr",
            Property::MarginBottom => "mb",
            Property::MarginLeft => "ml",
            Property::MarginX => "mx",
            Property::MarginY => "my",
            Property::Padding => "p",
            Property::PaddingTop => "pt",
            Property::PaddingRight => "pr",
            Property::PaddingBottom => "pb",
            Property::PaddingLeft => "pl",
            Property::PaddingX => "px",
            Property::PaddingY => "py",
            Property::Border => "b",
            Property::BorderTop => "bt",
            Property::BorderRight => "br",
            Property::BorderBottom => "bb",
            Property::BorderLeft => "bl",
            Property::Flex => "f",
            Property::Width => "w",
            Property::Height => "h",
            Property::Rounded => "r",
            Property::Shrink => "sh",
            Property::Background => "bg",
        }
    }

    pub fn target(self) -> Target {
        match self {
            Property::Width
            | Property::Height
            | Property::Rounded
            | Property::Shrink
            | Property::Background => Target::Skeleton,
            _ => Target::Stack,
        }
    }

    pub fn bound(self) -> Option<Bound> {
        match self {
            Property::Border
            | Property::BorderTop
            | Property::BorderRight
            | Property::BorderBottom
            | Property::BorderLeft
            | Property::Rounded
            | Property::Shrink
            | Property::Background => None,
            Property::Width | Property::Height => Some(Bound::Positive),
            _ => Some(Bound::NonNegative),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A directive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Size(Size),
    Flag(bool),
    Token(String),
}

/// One styling directive: a property and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub property: Property,
    pub value: Value,
}

impl Directive {
    pub fn new(property: Property, value: Value) -> Self {
        Self { property, value }
    }

    pub fn number(property: Property, value: f64) -> Self {
        Self::new(property, Value::Number(value))
    }

    pub fn flag(property: Property, value: bool) -> Self {
        Self::new(property, Value::Flag(value))
    }

    /// The numeric value subject to a bound, if any. Named sizes have none.
    pub fn bounded_number(&self) -> Option<(Bound, f64)> {
        let bound = self.property.bound()?;
        match self.value {
            Value::Number(value) | Value::Size(Size::Value(value)) => Some((bound, value)),
            _ => None,
        }
    }
}

/// A directive that does not fit the node it was applied to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("`{}` cannot be applied to a {target}", .directive.property.abbreviation())]
pub struct InapplicableDirective {
    pub directive: Directive,
    pub target: Target,
}

impl Stack {
    /// Value of a stack property, if set.
    pub fn get(&self, property: Property) -> Option<Value> {
        let number = |value: Option<f64>| value.map(Value::Number);
        let flag = |value: Option<bool>| value.map(Value::Flag);
        match property {
            Property::Gap => number(self.gap),
            Property::Margin => number(self.margin),
            Property::MarginTop => number(self.margin_top),
            Property::MarginRight => number(self.margin_right),
            Property::MarginBottom => number(self.margin_bottom),
            Property::MarginLeft => number(self.margin_left),
            Property::MarginX => number(self.margin_x),
            Property::MarginY => number(self.margin_y),
            Property::Padding => number(self.padding),
            Property::PaddingTop => number(self.padding_top),
            Property::PaddingRight => number(self.padding_right),
            Property::PaddingBottom => number(self.padding_bottom),
            Property::PaddingLeft => number(self.padding_left),
            Property::PaddingX => number(self.padding_x),
            Property::PaddingY => number(self.padding_y),
            Property::Border => flag(self.border),
            Property::BorderTop => flag(self.border_top),
            Property::BorderRight => flag(self.border_right),
            Property::BorderBottom => flag(self.border_bottom),
            Property::BorderLeft => flag(self.border_left),
            Property::Flex => number(self.flex),
            _ => None,
        }
    }

    /// Set fields as directives, in class-list order.
    pub fn directives(&self) -> Directives {
        Property::STACK
            .iter()
            .filter_map(|&property| self.get(property).map(|value| Directive::new(property, value)))
            .collect()
    }

    /// Set the field a directive names. A later directive for the same
    /// property replaces an earlier one.
    pub fn apply(&mut self, directive: Directive) -> Result<(), InapplicableDirective> {
        let slot_number = match directive.property {
            Property::Gap => Some(&mut self.gap),
            Property::Margin => Some(&mut self.margin),
            Property::MarginTop => Some(&mut self.margin_top),
            Property::MarginRight => Some(&mut self.margin_right),
            Property::MarginBottom => Some(&mut self.margin_bottom),
            Property::MarginLeft => Some(&mut self.margin_left),
            Property::MarginX => Some(&mut self.margin_x),
            Property::MarginY => Some(&mut self.margin_y),
            Property::Padding => Some(&mut self.padding),
            Property::PaddingTop => Some(&mut self.padding_top),
            Property::PaddingRight => Some(&mut self.padding_right),
            Property::PaddingBottom => Some(&mut self.padding_bottom),
            Property::PaddingLeft => Some(&mut self.padding_left),
            Property::PaddingX => Some(&mut self.padding_x),
            Property::PaddingY => Some(&mut self.padding_y),
            Property::Flex => Some(&mut self.flex),
            _ => None,
        };
        if let (Some(slot), Value::Number(value)) = (slot_number, &directive.value) {
            *slot = Some(*value);
            return Ok(());
        }

        let slot_flag = match directive.property {
            Property::Border => Some(&mut self.border),
            Property::BorderTop => Some(&mut self.border_top),
            Property::BorderRight => Some(&mut self.border_right),
            Property::BorderBottom => Some(&mut self.border_bottom),
            Property::BorderLeft => Some(&mut self.border_left),
            _ => None,
        };
        if let (Some(slot), Value::Flag(value)) = (slot_flag, &directive.value) {
            *slot = Some(*value);
            return Ok(());
        }

        Err(InapplicableDirective {
            directive,
            target: Target::Stack,
        })
    }
}

impl Skeleton {
    /// Value of a skeleton property, if set.
    pub fn get(&self, property: Property) -> Option<Value> {
        match property {
            Property::Width => self.width.map(Value::Size),
            Property::Height => self.height.map(Value::Size),
            Property::Rounded => self.rounded.map(Value::Flag),
            Property::Shrink => self.shrink.map(Value::Flag),
            Property::Background => self.background.clone().map(Value::Token),
            _ => None,
        }
    }

    /// Set fields as directives, in class-list order.
    pub fn directives(&self) -> Directives {
        Property::SKELETON
            .iter()
            .filter_map(|&property| self.get(property).map(|value| Directive::new(property, value)))
            .collect()
    }

    /// Set the field a directive names.
    pub fn apply(&mut self, directive: Directive) -> Result<(), InapplicableDirective> {
        match (directive.property, directive.value) {
            (Property::Width, Value::Size(size)) => self.width = Some(size),
            (Property::Height, Value::Size(size)) => self.height = Some(size),
            (Property::Rounded, Value::Flag(flag)) => self.rounded = Some(flag),
            (Property::Shrink, Value::Flag(flag)) => self.shrink = Some(flag),
            (Property::Background, Value::Token(token)) => self.background = Some(token),
            (property, value) => {
                return Err(InapplicableDirective {
                    directive: Directive::new(property, value),
                    target: Target::Skeleton,
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AbsoluteSize;

    #[test]
    fn test_property_tables_cover_every_property_once() {
        let mut all: Vec<Property> = Property::STACK.to_vec();
        all.extend(Property::SKELETON);
        assert_eq!(all.len(), 26);

        for property in Property::STACK {
            assert_eq!(property.target(), Target::Stack, "{property}");
        }
        for property in Property::SKELETON {
            assert_eq!(property.target(), Target::Skeleton, "{property}");
        }
    }

    #[test]
    fn test_stack_directives_follow_canonical_order() {
        let mut stack = Stack::default();
        stack.apply(Directive::number(Property::Flex, 1.0)).unwrap();
        stack.apply(Directive::flag(Property::BorderBottom, true)).unwrap();
        stack.apply(Directive::number(Property::Gap, 4.0)).unwrap();
        stack.apply(Directive::number(Property::MarginBottom, 6.0)).unwrap();

        let order: Vec<Property> = stack.directives().iter().map(|d| d.property).collect();
        assert_eq!(
            order,
            vec![Property::Gap, Property::MarginBottom, Property::BorderBottom, Property::Flex]
        );
    }

    #[test]
    fn test_later_directive_wins() {
        let mut stack = Stack::default();
        stack.apply(Directive::number(Property::Gap, 4.0)).unwrap();
        stack.apply(Directive::number(Property::Gap, 8.0)).unwrap();
        assert_eq!(stack.gap, Some(8.0));
    }

    #[test]
    fn test_stack_rejects_skeleton_property() {
        let mut stack = Stack::default();
        let err = stack
            .apply(Directive::new(Property::Width, Value::Size(Size::Value(16.0))))
            .unwrap_err();
        assert_eq!(err.target, Target::Stack);
        assert_eq!(err.to_string(), "`w` cannot be applied to a stack");
    }

    #[test]
    fn test_skeleton_rejects_stack_property() {
        let mut skeleton = Skeleton::default();
        let err = skeleton.apply(Directive::number(Property::Gap, 2.0)).unwrap_err();
        assert_eq!(err.to_string(), "`g` cannot be applied to a skeleton");
    }

    #[test]
    fn test_skeleton_apply_and_directives() {
        let mut skeleton = Skeleton::default();
        skeleton
            .apply(Directive::new(Property::Height, Value::Size(Size::Value(4.0))))
            .unwrap();
        skeleton
            .apply(Directive::new(Property::Width, Value::Size(Size::Absolute(AbsoluteSize::Full))))
            .unwrap();
        skeleton.apply(Directive::flag(Property::Shrink, false)).unwrap();

        let directives = skeleton.directives();
        assert_eq!(directives.len(), 3);
        assert_eq!(directives[0].property, Property::Width);
        assert_eq!(directives[1].property, Property::Height);
        assert_eq!(directives[2].value, Value::Flag(false));
    }

    #[test]
    fn test_bounded_number() {
        let gap = Directive::number(Property::Gap, -1.0);
        assert_eq!(gap.bounded_number(), Some((Bound::NonNegative, -1.0)));

        let full = Directive::new(Property::Width, Value::Size(Size::Absolute(AbsoluteSize::Full)));
        assert_eq!(full.bounded_number(), None);

        let border = Directive::flag(Property::Border, true);
        assert_eq!(border.bounded_number(), None);
    }

    #[test]
    fn test_bounds_reject_nan() {
        assert!(!Bound::NonNegative.admits(f64::NAN));
        assert!(!Bound::Positive.admits(f64::NAN));
        assert!(Bound::NonNegative.admits(0.0));
        assert!(!Bound::Positive.admits(0.0));
    }
}
