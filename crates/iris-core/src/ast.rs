//! Layout tree for IRIS documents.
//!
//! A tree is built once per compile (by the parser or the builder), optionally
//! validated, then consumed by the code generator. Each node owns its children.

#[cfg(feature = "serde")]
use crate::serde_number;

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node {
    /// Vertical flex container.
    VStack(Stack),
    /// Horizontal flex container.
    HStack(Stack),
    /// Sized placeholder block.
    Skeleton(Skeleton),
    /// Literal duplication of a single child.
    Repeat(Repeat),
}

impl Node {
    /// Create a stack node for the given direction.
    pub fn stack(direction: StackDirection, stack: Stack) -> Self {
        match direction {
            StackDirection::Vertical => Node::VStack(stack),
            StackDirection::Horizontal => Node::HStack(stack),
        }
    }

    /// The tag used for this node in the JSON interchange format.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::VStack(_) => "VStack",
            Node::HStack(_) => "HStack",
            Node::Skeleton(_) => "Skeleton",
            Node::Repeat(_) => "Repeat",
        }
    }

    /// Stack direction and body, if this node is a stack.
    pub fn as_stack(&self) -> Option<(StackDirection, &Stack)> {
        match self {
            Node::VStack(stack) => Some((StackDirection::Vertical, stack)),
            Node::HStack(stack) => Some((StackDirection::Horizontal, stack)),
            _ => None,
        }
    }

    /// Direct children in rendering order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::VStack(stack) | Node::HStack(stack) => &stack.children,
            Node::Skeleton(_) => &[],
            Node::Repeat(repeat) => std::slice::from_ref(repeat.child.as_ref()),
        }
    }
}

/// Main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackDirection {
    Vertical,
    Horizontal,
}

/// Flex container shared by `VStack` and `HStack`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Stack {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub gap: Option<f64>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin_top: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin_right: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin_bottom: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin_left: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin_x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub margin_y: Option<f64>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding_top: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding_right: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding_bottom: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding_left: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding_x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub padding_y: Option<f64>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub border: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub border_top: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub border_right: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub border_bottom: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub border_left: Option<bool>,

    /// Flex grow factor. The notation `f` without a number means 1.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", with = "serde_number::option"))]
    pub flex: Option<f64>,

    /// Children in rendering order.
    pub children: Vec<Node>,
}

/// Placeholder block, rendered as a loading skeleton.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Skeleton {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub width: Option<Size>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub height: Option<Size>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub rounded: Option<bool>,
    /// `None` means the block may shrink; only `Some(false)` pins it.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub shrink: Option<bool>,
    /// Raw color-scale token such as `gray-200`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub background: Option<String>,
}

/// Repetition of a single child.
///
/// `count` is kept as a plain number so that trees built by hand can carry
/// invalid counts (zero, negative, fractional) for the validator to reject.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Repeat {
    #[cfg_attr(feature = "serde", serde(with = "serde_number"))]
    pub count: f64,
    pub child: Box<Node>,
}

impl Repeat {
    pub fn new(count: impl Into<f64>, child: Node) -> Self {
        Self {
            count: count.into(),
            child: Box::new(child),
        }
    }

    /// Number of copies the generator emits. Fractions truncate and
    /// non-positive or non-finite counts produce no copies.
    pub fn copies(&self) -> usize {
        if self.count.is_finite() && self.count > 0.0 {
            self.count as usize
        } else {
            0
        }
    }
}

/// Width or height of a skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// A number: a fraction in (0, 1) or a utility scale step.
    Value(f64),
    /// A named size.
    Absolute(AbsoluteSize),
}

impl From<f64> for Size {
    fn from(value: f64) -> Self {
        Size::Value(value)
    }
}

impl From<f32> for Size {
    fn from(value: f32) -> Self {
        Size::Value(value.into())
    }
}

impl From<i32> for Size {
    fn from(value: i32) -> Self {
        Size::Value(value.into())
    }
}

impl From<u32> for Size {
    fn from(value: u32) -> Self {
        Size::Value(value.into())
    }
}

impl From<AbsoluteSize> for Size {
    fn from(value: AbsoluteSize) -> Self {
        Size::Absolute(value)
    }
}

/// Named sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AbsoluteSize {
    Full,
    Screen,
    Auto,
}

impl AbsoluteSize {
    pub const ALL: [AbsoluteSize; 3] = [AbsoluteSize::Full, AbsoluteSize::Screen, AbsoluteSize::Auto];

    pub fn keyword(self) -> &'static str {
        match self {
            AbsoluteSize::Full => "full",
            AbsoluteSize::Screen => "screen",
            AbsoluteSize::Auto => "auto",
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Size {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Size::Value(value) => serde_number::serialize(value, serializer),
            Size::Absolute(size) => serde::Serialize::serialize(size, serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Size {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Value(f64),
            Absolute(AbsoluteSize),
        }

        Ok(match <Repr as serde::Deserialize>::deserialize(deserializer)? {
            Repr::Value(value) => Size::Value(value),
            Repr::Absolute(size) => Size::Absolute(size),
        })
    }
}

/// Top-level siblings, before normalization to a single node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub children: Vec<Node>,
}

impl Program {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Collapse to a single node: one child is returned as is, several are
    /// wrapped in a `VStack`.
    pub fn into_node(mut self) -> Node {
        if self.children.len() == 1 {
            if let Some(node) = self.children.pop() {
                return node;
            }
        }
        Node::VStack(Stack {
            children: self.children,
            ..Stack::default()
        })
    }
}

impl From<Node> for Program {
    fn from(node: Node) -> Self {
        Program::new(vec![node])
    }
}
