//! Token recognizers for the three reader states
//!
//! Each recognizer matches exactly one item at the start of its input, trying
//! alternatives in a fixed order. Termination (the whitespace rule) is left
//! to the caller, which knows what follows the match.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till, take_while, take_while1, take_while_m_n},
    character::complete::{char, digit0, digit1, none_of, one_of, satisfy},
    combinator::{map, opt, recognize, value},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

const SIMPLE_ESCAPES: &str = "abtnfre\\\"";

// ============================================================================
// Items
// ============================================================================

/// A character literal body, before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharLit<'a> {
    Raw(char),
    /// The letter after the backslash
    Simple(char),
    /// Hex digits of a `\x`, `\u` or `\U` escape
    Hex(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Whitespace,
    LineComment,
    LParen,
    StringStart { width: Option<&'a str> },
    ArrayStart { width: &'a str, base: u32 },
    RParen,
    Nil,
    Bool(bool),
    Number { width: Option<&'a str>, literal: &'a str },
    Char { width: Option<&'a str>, lit: CharLit<'a> },
    Symbol(&'a str),
    SexprComment,
}

impl Token<'_> {
    /// Whether the token must be followed by whitespace, `)` or end of line.
    pub(crate) fn is_terminated(&self) -> bool {
        matches!(
            self,
            Token::RParen
                | Token::Nil
                | Token::Bool(_)
                | Token::Number { .. }
                | Token::Char { .. }
                | Token::Symbol(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringItem<'a> {
    EndQuote,
    Raw(&'a str),
    Simple(char),
    Hex(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayItem<'a> {
    Whitespace,
    LineComment,
    RParen,
    Digits(&'a str),
}

/// Whether `rest` may directly follow a terminated token.
pub(crate) fn is_token_boundary(rest: &str) -> bool {
    match rest.chars().next() {
        None => true,
        Some(c) => is_space(c) || c == ')',
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c')
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while1(is_space)(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("# "), take_till(|c: char| c == '\n')))(input)
}

fn width_prefix(input: &str) -> IResult<&str, &str> {
    terminated(digit1, char('\''))(input)
}

fn hex_escape(input: &str) -> IResult<&str, &str> {
    let hex = |c: char| c.is_ascii_hexdigit();
    alt((
        preceded(char('x'), take_while_m_n(2, 2, hex)),
        preceded(char('u'), take_while_m_n(4, 4, hex)),
        preceded(char('U'), take_while_m_n(6, 6, hex)),
    ))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(char('-')),
        alt((
            recognize(pair(tag("0b"), take_while1(|c: char| matches!(c, '0' | '1')))),
            recognize(pair(tag("0o"), take_while1(|c: char| matches!(c, '0'..='7')))),
            recognize(pair(tag("0x"), take_while1(|c: char| c.is_ascii_hexdigit()))),
            recognize(pair(satisfy(|c: char| matches!(c, '1'..='9')), digit0)),
            tag("0"),
        )),
    ))(input)
}

fn char_literal(input: &str) -> IResult<&str, CharLit<'_>> {
    delimited(
        char('\''),
        alt((
            map(none_of("\\'"), CharLit::Raw),
            map(preceded(char('\\'), one_of(SIMPLE_ESCAPES)), CharLit::Simple),
            map(preceded(char('\\'), hex_escape), CharLit::Hex),
        )),
        char('\''),
    )(input)
}

fn int_or_word(input: &str) -> IResult<&str, Token<'_>> {
    if let Ok((rest, width)) = width_prefix(input) {
        if let Ok(found) = int_or_word_body(rest, Some(width)) {
            return Ok(found);
        }
    }
    int_or_word_body(input, None)
}

fn int_or_word_body<'a>(input: &'a str, width: Option<&'a str>) -> IResult<&'a str, Token<'a>> {
    alt((
        map(number, |literal| Token::Number { width, literal }),
        map(char_literal, |lit| Token::Char { width, lit }),
    ))(input)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(
            satisfy(|c: char| c.is_ascii_alphabetic() || "*+=<>!?/$%_".contains(c)),
            take_while(|c: char| c.is_ascii_alphanumeric() || "*+=<>!?/$%_-".contains(c)),
        )),
        tag("-"),
    ))(input)
}

// ============================================================================
// NORMAL state
// ============================================================================

fn string_start(input: &str) -> IResult<&str, Token<'_>> {
    map(pair(opt(width_prefix), char('"')), |(width, _)| {
        Token::StringStart { width }
    })(input)
}

fn array_start(input: &str) -> IResult<&str, Token<'_>> {
    map(
        tuple((
            width_prefix,
            opt(alt((tag("0b"), tag("0o"), tag("0x")))),
            char('('),
        )),
        |(width, base, _)| Token::ArrayStart {
            width,
            base: match base {
                Some("0b") => 2,
                Some("0o") => 8,
                Some(_) => 16,
                None => 10,
            },
        },
    )(input)
}

pub(crate) fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::Whitespace, whitespace),
        value(Token::LineComment, line_comment),
        value(Token::LParen, char('(')),
        string_start,
        array_start,
        value(Token::RParen, char(')')),
        value(Token::Nil, tag("@nil")),
        value(Token::Bool(true), tag("@true")),
        value(Token::Bool(false), tag("@false")),
        int_or_word,
        map(symbol, Token::Symbol),
        value(Token::SexprComment, tag("##")),
    ))(input)
}

// ============================================================================
// STRING state
// ============================================================================

pub(crate) fn string_item(input: &str) -> IResult<&str, StringItem<'_>> {
    alt((
        value(StringItem::EndQuote, char('"')),
        map(is_not("\\\""), StringItem::Raw),
        map(preceded(char('\\'), one_of(SIMPLE_ESCAPES)), StringItem::Simple),
        map(preceded(char('\\'), hex_escape), StringItem::Hex),
    ))(input)
}

// ============================================================================
// BINARRAY state
// ============================================================================

fn array_digits(input: &str, base: u32) -> IResult<&str, &str> {
    match base {
        2 => recognize(pair(opt(char('-')), take_while1(|c: char| matches!(c, '0' | '1'))))(input),
        8 => recognize(pair(opt(char('-')), take_while1(|c: char| matches!(c, '0'..='7'))))(input),
        10 => recognize(pair(
            opt(char('-')),
            alt((
                recognize(pair(satisfy(|c: char| matches!(c, '1'..='9')), digit0)),
                tag("0"),
            )),
        ))(input),
        _ => recognize(pair(
            opt(char('-')),
            take_while1(|c: char| c.is_ascii_hexdigit()),
        ))(input),
    }
}

pub(crate) fn array_item(input: &str, base: u32) -> IResult<&str, ArrayItem<'_>> {
    alt((
        value(ArrayItem::Whitespace, whitespace),
        value(ArrayItem::LineComment, line_comment),
        value(ArrayItem::RParen, char(')')),
        map(|i| array_digits(i, base), ArrayItem::Digits),
    ))(input)
}
