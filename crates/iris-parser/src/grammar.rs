//! Grammar rules for parsing IRIS documents.
//!
//! Tokens are recognized with the nom primitives in [`crate::lexer`]; nesting
//! is handled by a small recursive-descent parser that tracks its position as
//! the unconsumed tail of the source.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{map, opt, value},
    sequence::{pair, preceded},
    IResult,
};

use iris_core::{
    Directive, Node, ParseError, ParseErrorKind, Program, Property, Repeat, Skeleton, Stack,
    StackDirection, Value,
};

use crate::lexer::*;

const EXPECTED_ELEMENT: &str = "an element (V, H, S or x<count>)";
const EXPECTED_PROPERTY: &str = "a property or `)`";
const EXPECTED_NUMBER: &str = "a number";
const EXPECTED_SIZE: &str = "a number or full, screen, auto";

/// Deepest `{ ... }` nesting accepted before parsing stops with an error.
pub const MAX_NESTING: usize = 256;

/// Parse a document into its top-level siblings.
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(input);
    parser.parse_program()
}

/// One styling token, e.g. `mb6`, `w auto` or `bg-gray-200`.
fn directive(input: &str) -> IResult<&str, Directive> {
    alt((
        map(preceded(tag("bg-"), color_token), |token: &str| {
            Directive::new(Property::Background, Value::Token(token.to_string()))
        }),
        map(border_flag, |property| Directive::flag(property, true)),
        value(Directive::flag(Property::Shrink, false), tag("sh0")),
        value(Directive::flag(Property::Rounded, true), tag("r")),
        map(preceded(char('f'), opt(number)), |flex| {
            Directive::number(Property::Flex, flex.unwrap_or(1.0))
        }),
        map(
            pair(size_prefix, preceded(multispace0, size)),
            |(property, size)| Directive::new(property, Value::Size(size)),
        ),
        map(pair(numeric_prefix, number), |(property, value)| {
            Directive::number(property, value)
        }),
    ))(input)
}

fn size_prefix(input: &str) -> IResult<&str, Property> {
    alt((
        value(Property::Width, char('w')),
        value(Property::Height, char('h')),
    ))(input)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ends_token(rest: &str) -> bool {
    rest.chars().next().map_or(true, is_token_boundary)
}

/// A directive together with where it was written.
struct Spanned<'a> {
    directive: Directive,
    token: &'a str,
    offset: usize,
}

/// Stateful parser that tracks the unconsumed input.
struct Parser<'a> {
    source: &'a str,
    rest: &'a str,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            depth: 0,
        }
    }

    /// Byte offset of the next unconsumed character.
    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.rest = &self.rest[bytes..];
    }

    fn error(&self, kind: ParseErrorKind, offset: usize, len: usize) -> ParseError {
        ParseError::at(kind, self.source, offset, len)
    }

    /// Error pointing at the next character.
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(found) => self.error(
                ParseErrorKind::UnexpectedChar {
                    found,
                    expected: expected.to_string(),
                },
                self.offset(),
                found.len_utf8(),
            ),
            None => self.error(ParseErrorKind::EmptyDocument, self.offset(), 0),
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        if let Ok((rest, ())) = trivia(self.rest) {
            self.rest = rest;
        }
        if self.rest.starts_with("/*") {
            return Err(self.error(ParseErrorKind::UnterminatedComment, self.offset(), 2));
        }
        Ok(())
    }

    /// Parse the full document.
    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut children = Vec::new();

        self.skip_trivia()?;
        while !self.rest.is_empty() {
            children.push(self.parse_node()?);
            self.skip_trivia()?;
        }

        if children.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyDocument, self.offset(), 0));
        }
        Ok(Program::new(children))
    }

    /// Parse one construct. Leading trivia has already been skipped.
    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let start = self.offset();
        let Some(first) = self.peek() else {
            return Err(self.unexpected(EXPECTED_ELEMENT));
        };

        match first {
            'V' | 'H' | 'S' if !self.rest[1..].starts_with(is_identifier_char) => {
                self.advance(1);
                match first {
                    'V' => self.parse_stack(StackDirection::Vertical, "V"),
                    'H' => self.parse_stack(StackDirection::Horizontal, "H"),
                    _ => self.parse_skeleton(),
                }
            }
            'x' if self.rest[1..].starts_with(|c: char| c.is_ascii_digit()) => {
                self.parse_repeat(start)
            }
            'x' if !self.rest[1..].starts_with(is_identifier_char) => Err(self.error(
                ParseErrorKind::MissingRepeatCount,
                start,
                1,
            )),
            '}' | ')' => Err(self.error(
                ParseErrorKind::UnexpectedClosing { delimiter: first },
                start,
                1,
            )),
            c if is_identifier_char(c) => {
                let name = word(self.rest);
                Err(self.error(
                    ParseErrorKind::UnknownElement {
                        name: name.to_string(),
                    },
                    start,
                    name.len(),
                ))
            }
            _ => Err(self.unexpected(EXPECTED_ELEMENT)),
        }
    }

    /// `V` / `H` after the tag letter: optional properties, optional block.
    fn parse_stack(&mut self, direction: StackDirection, tag: &str) -> Result<Node, ParseError> {
        let mut stack = Stack::default();

        self.skip_trivia()?;
        if self.rest.starts_with('(') {
            for spanned in self.parse_properties()? {
                let Spanned {
                    directive,
                    token,
                    offset,
                } = spanned;
                stack
                    .apply(directive)
                    .map_err(|_| self.not_allowed(token, tag, offset))?;
            }
            self.skip_trivia()?;
        }

        if self.rest.starts_with('{') {
            stack.children = self.parse_block()?;
        }

        Ok(Node::stack(direction, stack))
    }

    /// `S` after the tag letter: optional properties.
    fn parse_skeleton(&mut self) -> Result<Node, ParseError> {
        let mut skeleton = Skeleton::default();

        self.skip_trivia()?;
        if self.rest.starts_with('(') {
            for spanned in self.parse_properties()? {
                let Spanned {
                    directive,
                    token,
                    offset,
                } = spanned;
                skeleton
                    .apply(directive)
                    .map_err(|_| self.not_allowed(token, "S", offset))?;
            }
        }

        Ok(Node::Skeleton(skeleton))
    }

    /// `x<N>{ node }`, positioned at the `x`.
    fn parse_repeat(&mut self, start: usize) -> Result<Node, ParseError> {
        self.advance(1);
        let (rest, digits) = count_digits(self.rest)
            .map_err(|_| self.error(ParseErrorKind::MissingRepeatCount, start, 1))?;
        self.rest = rest;

        let count = match digits.parse::<u32>() {
            Ok(count) if count > 0 => count,
            _ => {
                return Err(self.error(
                    ParseErrorKind::InvalidRepeatCount {
                        value: digits.to_string(),
                    },
                    start + 1,
                    digits.len(),
                ))
            }
        };
        let header_len = 1 + digits.len();

        self.skip_trivia()?;
        if !self.rest.starts_with('{') {
            let len = self.peek().map_or(0, char::len_utf8);
            return Err(self.error(ParseErrorKind::MissingRepeatBody, self.offset(), len));
        }

        let mut body = self.parse_block()?;
        if body.len() != 1 {
            return Err(self.error(
                ParseErrorKind::RepeatArity { found: body.len() },
                start,
                header_len,
            ));
        }

        let child = body.remove(0);
        Ok(Node::Repeat(Repeat::new(count, child)))
    }

    /// `{ node* }`, positioned at the `{`.
    fn parse_block(&mut self) -> Result<Vec<Node>, ParseError> {
        let open = self.offset();
        if self.depth == MAX_NESTING {
            return Err(self.error(
                ParseErrorKind::NestingTooDeep { limit: MAX_NESTING },
                open,
                1,
            ));
        }
        self.depth += 1;
        let children = self.parse_block_body(open);
        self.depth -= 1;
        children
    }

    fn parse_block_body(&mut self, open: usize) -> Result<Vec<Node>, ParseError> {
        self.advance(1);

        let mut children = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => {
                    return Err(self.error(ParseErrorKind::Unclosed { delimiter: '{' }, open, 1))
                }
                Some('}') => {
                    self.advance(1);
                    return Ok(children);
                }
                Some(_) => children.push(self.parse_node()?),
            }
        }
    }

    /// `( token* )`, positioned at the `(`.
    fn parse_properties(&mut self) -> Result<Vec<Spanned<'a>>, ParseError> {
        let open = self.offset();
        self.advance(1);

        let mut directives = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => {
                    return Err(self.error(ParseErrorKind::Unclosed { delimiter: '(' }, open, 1))
                }
                Some(')') => {
                    self.advance(1);
                    return Ok(directives);
                }
                Some(c) if c.is_ascii_alphanumeric() => directives.push(self.parse_directive()?),
                Some(_) => return Err(self.unexpected(EXPECTED_PROPERTY)),
            }
        }
    }

    fn parse_directive(&mut self) -> Result<Spanned<'a>, ParseError> {
        let offset = self.offset();
        let input = self.rest;

        match directive(input) {
            Ok((rest, directive)) if ends_token(rest) => {
                let token = &input[..input.len() - rest.len()];
                self.rest = rest;
                Ok(Spanned {
                    directive,
                    token,
                    offset,
                })
            }
            _ => Err(self.bad_token(input, offset)),
        }
    }

    /// Explain a token that is not a complete directive: either a known
    /// prefix with nothing after it, or an unknown word.
    fn bad_token(&self, input: &str, offset: usize) -> ParseError {
        let missing = |property: Property, expected: &str| {
            self.error(
                ParseErrorKind::MissingValue {
                    token: property.abbreviation().to_string(),
                    expected: expected.to_string(),
                },
                offset,
                property.abbreviation().len(),
            )
        };

        if let Ok((after, property)) = size_prefix(input) {
            if ends_token(after) {
                return missing(property, EXPECTED_SIZE);
            }
        }
        if let Ok((after, property)) = numeric_prefix(input) {
            if ends_token(after) {
                return missing(property, EXPECTED_NUMBER);
            }
        }

        let token = word(input);
        self.error(
            ParseErrorKind::UnknownProperty {
                token: token.to_string(),
            },
            offset,
            token.len(),
        )
    }

    fn not_allowed(&self, token: &str, element: &str, offset: usize) -> ParseError {
        self.error(
            ParseErrorKind::PropertyNotAllowed {
                token: token.to_string(),
                element: element.to_string(),
            },
            offset,
            token.len(),
        )
    }
}
