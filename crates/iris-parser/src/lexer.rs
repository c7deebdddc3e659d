//! Lexical pieces of the layout notation.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, digit1, multispace1, not_line_ending},
    combinator::{map, map_res, opt, recognize, value},
    multi::many0_count,
    sequence::{pair, tuple},
    IResult,
};

use iris_core::{AbsoluteSize, Property, Size};

/// `// ...` up to (not including) the line break.
pub fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), not_line_ending))(input)
}

/// `/* ... */`, non-nesting.
pub fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Whitespace and comments between tokens.
pub fn trivia(input: &str) -> IResult<&str, ()> {
    value((), many0_count(alt((multispace1, line_comment, block_comment))))(input)
}

/// Unsigned number: `12`, `1.5` or `.75`.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Digits of a repeat count.
pub fn count_digits(input: &str) -> IResult<&str, &str> {
    digit1(input)
}

/// A width/height value: a number or a named size.
pub fn size(input: &str) -> IResult<&str, Size> {
    alt((
        value(Size::Absolute(AbsoluteSize::Full), tag("full")),
        value(Size::Absolute(AbsoluteSize::Screen), tag("screen")),
        value(Size::Absolute(AbsoluteSize::Auto), tag("auto")),
        map(number, Size::Value),
    ))(input)
}

/// Color-scale token for backgrounds, e.g. `gray-200` or `black/50`.
pub fn color_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '/')(input)
}

/// Prefix of a numeric spacing/flex property. Longer prefixes come first so
/// that `mt` is not read as `m`.
pub fn numeric_prefix(input: &str) -> IResult<&str, Property> {
    alt((
        alt((
            value(Property::MarginTop, tag("mt")),
            value(Property::MarginRight, tag("mr")),
            value(Property::MarginBottom, tag("mb")),
            value(Property::MarginLeft, tag("ml")),
            value(Property::MarginX, tag("mx")),
            value(Property::MarginY, tag("my")),
            value(Property::Margin, tag("m")),
        )),
        alt((
            value(Property::PaddingTop, tag("pt")),
            value(Property::PaddingRight, tag("pr")),
            value(Property::PaddingBottom, tag("pb")),
            value(Property::PaddingLeft, tag("pl")),
            value(Property::PaddingX, tag("px")),
            value(Property::PaddingY, tag("py")),
            value(Property::Padding, tag("p")),
        )),
        value(Property::Gap, tag("g")),
    ))(input)
}

/// Border side flags.
pub fn border_flag(input: &str) -> IResult<&str, Property> {
    alt((
        value(Property::BorderTop, tag("bt")),
        value(Property::BorderRight, tag("br")),
        value(Property::BorderBottom, tag("bb")),
        value(Property::BorderLeft, tag("bl")),
        value(Property::Border, tag("b")),
    ))(input)
}

/// Characters that end a property token.
pub fn is_token_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | '/')
}

/// The word starting at `input`, used to name the offending text in errors.
pub fn word(input: &str) -> &str {
    let end = input
        .char_indices()
        .find(|&(_, c)| is_token_boundary(c))
        .map_or(input.len(), |(i, _)| i);
    if end == 0 {
        input.chars().next().map_or("", |c| &input[..c.len_utf8()])
    } else {
        &input[..end]
    }
}
