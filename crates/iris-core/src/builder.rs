//! Programmatic tree construction.
//!
//! Builders produce the same shapes the parser does, so a tree built here and
//! a tree parsed from the equivalent notation compare equal.
//!
//! ```ignore
//! use iris_core::builder::{v_stack, skeleton};
//!
//! let tree = v_stack()
//!     .gap(4)
//!     .child(skeleton().height(4))
//!     .build();
//! ```

use crate::ast::{Node, Program, Repeat, Size, Skeleton, Stack, StackDirection};

/// Start a vertical stack.
pub fn v_stack() -> StackBuilder {
    StackBuilder::new(StackDirection::Vertical)
}

/// Start a horizontal stack.
pub fn h_stack() -> StackBuilder {
    StackBuilder::new(StackDirection::Horizontal)
}

/// Start a skeleton.
pub fn skeleton() -> SkeletonBuilder {
    SkeletonBuilder::default()
}

/// Repeat `child` `count` times.
pub fn repeat(count: impl Into<f64>, child: impl Into<Node>) -> Node {
    Node::Repeat(Repeat::new(count, child.into()))
}

/// Group top-level siblings.
pub fn program<I, N>(children: I) -> Program
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Program::new(children.into_iter().map(Into::into).collect())
}

macro_rules! number_setters {
    ($($(#[$doc:meta])* $field:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $field(mut self, value: impl Into<f64>) -> Self {
                self.stack.$field = Some(value.into());
                self
            }
        )*
    };
}

macro_rules! flag_setters {
    ($($(#[$doc:meta])* $field:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $field(mut self) -> Self {
                self.stack.$field = Some(true);
                self
            }
        )*
    };
}

/// Builder for `VStack` / `HStack` nodes.
#[derive(Debug, Clone)]
pub struct StackBuilder {
    direction: StackDirection,
    stack: Stack,
}

impl StackBuilder {
    pub fn new(direction: StackDirection) -> Self {
        Self {
            direction,
            stack: Stack::default(),
        }
    }

    number_setters!(
        gap,
        margin,
        margin_top,
        margin_right,
        margin_bottom,
        margin_left,
        margin_x,
        margin_y,
        padding,
        padding_top,
        padding_right,
        padding_bottom,
        padding_left,
        padding_x,
        padding_y,
        /// Flex grow factor.
        flex,
    );

    flag_setters!(
        /// Border on every side.
        border,
        border_top,
        border_right,
        border_bottom,
        border_left,
    );

    /// Append a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.stack.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.stack.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Node {
        Node::stack(self.direction, self.stack)
    }
}

impl From<StackBuilder> for Node {
    fn from(builder: StackBuilder) -> Self {
        builder.build()
    }
}

/// Builder for `Skeleton` nodes.
#[derive(Debug, Clone, Default)]
pub struct SkeletonBuilder {
    skeleton: Skeleton,
}

impl SkeletonBuilder {
    pub fn width(mut self, width: impl Into<Size>) -> Self {
        self.skeleton.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Size>) -> Self {
        self.skeleton.height = Some(height.into());
        self
    }

    pub fn rounded(mut self) -> Self {
        self.skeleton.rounded = Some(true);
        self
    }

    /// Explicitly set whether the block may shrink.
    pub fn shrink(mut self, shrink: bool) -> Self {
        self.skeleton.shrink = Some(shrink);
        self
    }

    /// Same as `shrink(false)`, the `sh0` token.
    pub fn no_shrink(self) -> Self {
        self.shrink(false)
    }

    pub fn background(mut self, token: impl Into<String>) -> Self {
        self.skeleton.background = Some(token.into());
        self
    }

    pub fn build(self) -> Node {
        Node::Skeleton(self.skeleton)
    }
}

impl From<SkeletonBuilder> for Node {
    fn from(builder: SkeletonBuilder) -> Self {
        builder.build()
    }
}
