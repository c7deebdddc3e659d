//! Structured markup.
//!
//! The generator builds [`Markup`] trees and the formatter renders them, so
//! indentation never has to be recovered from text. [`read`] goes the other
//! way for markup that only exists as a string.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, peek, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use iris_core::MarkupError;

use crate::classes::ClassList;

/// A markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(Element),
    Text(String),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Markup>,
    /// Written as `<name ... />`. Such elements have no children.
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for a bare boolean attribute.
    pub value: Option<AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A quoted string and the quote it was written with.
    Literal { value: String, quote: char },
    /// A `{...}` expression, stored without the outer braces.
    Expression(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: Some(AttributeValue::Literal {
                value: value.into(),
                quote: '"',
            }),
        });
        self
    }

    /// Add `className`, unless the list is empty.
    pub fn with_classes(self, classes: &ClassList) -> Self {
        if classes.is_empty() {
            self
        } else {
            self.with_attribute("className", classes.to_class_name())
        }
    }

    pub fn with_children(mut self, children: Vec<Markup>) -> Self {
        self.children = children;
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// String value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .and_then(|attribute| match &attribute.value {
                Some(AttributeValue::Literal { value, .. }) => Some(value.as_str()),
                _ => None,
            })
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

fn tag_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':')),
    ))(input)
}

/// Element name, or the empty name of a `<>` / `</>` fragment.
fn element_name(input: &str) -> IResult<&str, &str> {
    alt((tag_name, value("", peek(char('>')))))(input)
}

fn attribute_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))(input)
}

/// `{...}` with balanced inner braces; returns the text between the outer pair.
fn braced(input: &str) -> IResult<&str, &str> {
    let fail = || nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Char));
    if !input.starts_with('{') {
        return Err(fail());
    }

    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[i + 1..], &input[1..i]));
                }
            }
            _ => {}
        }
    }
    Err(fail())
}

fn attribute_value(input: &str) -> IResult<&str, AttributeValue> {
    alt((
        map(
            delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
            |value: &str| AttributeValue::Literal {
                value: value.to_string(),
                quote: '"',
            },
        ),
        map(
            delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
            |value: &str| AttributeValue::Literal {
                value: value.to_string(),
                quote: '\'',
            },
        ),
        map(braced, |expression: &str| {
            AttributeValue::Expression(expression.to_string())
        }),
    ))(input)
}

fn attribute(input: &str) -> IResult<&str, Attribute> {
    map(
        pair(
            attribute_name,
            opt(preceded(
                tuple((multispace0, char('='), multispace0)),
                attribute_value,
            )),
        ),
        |(name, value)| Attribute {
            name: name.to_string(),
            value,
        },
    )(input)
}

/// `<name attr...>` or `<name attr... />`.
fn opening_tag(input: &str) -> IResult<&str, Element> {
    map(
        tuple((
            char('<'),
            element_name,
            many0(preceded(multispace1, attribute)),
            multispace0,
            alt((map(tag("/>"), |_| true), map(char('>'), |_| false))),
        )),
        |(_, name, attributes, _, self_closing)| Element {
            name: name.to_string(),
            attributes,
            children: Vec::new(),
            self_closing,
        },
    )(input)
}

/// `</name>`
fn closing_tag(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("</"),
        delimited(multispace0, element_name, multispace0),
        char('>'),
    )(input)
}

fn text(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == '<')(input)
}

/// Read markup text into nodes.
pub fn read(input: &str) -> Result<Vec<Markup>, MarkupError> {
    let mut open: Vec<(Element, usize)> = Vec::new();
    let mut roots = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let offset = input.len() - rest.len();

        let node = if rest.starts_with("</") {
            let (after, name) = closing_tag(rest).map_err(|_| MarkupError::MalformedTag { offset })?;
            rest = after;

            let Some((element, _)) = open.pop() else {
                return Err(MarkupError::UnexpectedClosingTag {
                    name: name.to_string(),
                    offset,
                });
            };
            if element.name != name {
                return Err(MarkupError::MismatchedTag {
                    expected: element.name,
                    found: name.to_string(),
                    offset,
                });
            }
            Markup::Element(element)
        } else if rest.starts_with('<') {
            let (after, element) = opening_tag(rest).map_err(|_| MarkupError::MalformedTag { offset })?;
            rest = after;

            if !element.self_closing {
                open.push((element, offset));
                continue;
            }
            Markup::Element(element)
        } else {
            let (after, content) = text(rest).map_err(|_| MarkupError::MalformedTag { offset })?;
            rest = after;

            if content.trim().is_empty() {
                continue;
            }
            Markup::Text(content.trim().to_string())
        };

        match open.last_mut() {
            Some((parent, _)) => parent.children.push(node),
            None => roots.push(node),
        }
    }

    if let Some((element, offset)) = open.pop() {
        return Err(MarkupError::UnclosedTag {
            name: element.name,
            offset,
        });
    }
    Ok(roots)
}
