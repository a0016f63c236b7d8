//! Line-fed S-expression reader
//!
//! The reader is an explicit state machine (NORMAL, STRING, BINARRAY) over a
//! stack of open lists and S-expr comments. Input is fed one line at a time,
//! including its trailing newline; every call returns the top-level nodes
//! completed on that line.
//!
//! ```text
//! feed_line("(abc 12'0x123\n")  -> []
//! feed_line("  \"a\\nb\")\n")   -> [(abc 12'0x123 "a\nb")]
//! finish()                      -> Ok(())
//! ```

mod lexer;

use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use binsexpr_types::{BinArray, BinInt, BinWord};
use tracing::{debug, trace};

use crate::config::ReaderConfig;
use crate::error::{ConvertError, Error, ReadError, Result};
use crate::location::{SourcePos, SourceSpan};
use crate::nodes::{GenericListNode, GenericNode, Node};
use crate::string::unescape_char;
use crate::symbol::Symbol;

use lexer::{ArrayItem, CharLit, StringItem, Token};

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderState {
    /// Between tokens
    Normal,
    /// Inside a string or char array literal
    String,
    /// Inside a word array literal
    BinArray,
}

impl fmt::Display for ReaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "NORMAL",
            Self::String => "STRING",
            Self::BinArray => "BINARRAY",
        })
    }
}

/// An open structural context.
#[derive(Debug)]
enum Frame {
    List {
        start: SourcePos,
        items: Vec<GenericNode>,
    },
    /// `##` waiting for the value it drops
    Comment { span: SourceSpan },
}

/// A multi-token literal being accumulated.
#[derive(Debug)]
enum Literal {
    String {
        start: SourcePos,
        width: Option<u32>,
        buffer: String,
    },
    Array {
        start: SourcePos,
        base: u32,
        array: BinArray,
    },
}

// ============================================================================
// Reader
// ============================================================================

#[derive(Debug)]
pub struct Reader {
    filename: Arc<str>,
    max_depth: Option<usize>,
    stack: Vec<Frame>,
    literal: Option<Literal>,
    line: u32,
}

impl Reader {
    /// A reader tagging locations with `filename`.
    pub fn new(filename: impl Into<Arc<str>>) -> Self {
        Self {
            filename: filename.into(),
            max_depth: None,
            stack: Vec::new(),
            literal: None,
            line: 0,
        }
    }

    pub fn with_config(config: &ReaderConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            ..Self::new(config.filename.as_str())
        }
    }

    pub fn state(&self) -> ReaderState {
        match self.literal {
            None => ReaderState::Normal,
            Some(Literal::String { .. }) => ReaderState::String,
            Some(Literal::Array { .. }) => ReaderState::BinArray,
        }
    }

    /// Number of open lists and S-expr comments.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of lines fed so far.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Feed one line of input, returning the top-level nodes it completes.
    pub fn feed_line(&mut self, line: &str) -> Result<Vec<GenericNode>, ReadError> {
        self.line += 1;
        let mut out = Vec::new();
        let mut rest = line;
        let mut column = 1u32;

        while !rest.is_empty() {
            let start = self.pos(column);
            rest = match self.state() {
                ReaderState::Normal => {
                    let (remaining, token) =
                        lexer::token(rest).map_err(|_| unknown(&start, "token"))?;
                    let end = self.advance(rest, remaining, &mut column, token.is_terminated())?;
                    self.on_token(token, start, end, &mut out)?;
                    remaining
                }
                ReaderState::String => {
                    let (remaining, item) = lexer::string_item(rest)
                        .map_err(|_| unknown(&start, "escape sequence"))?;
                    let terminated = item == StringItem::EndQuote;
                    let end = self.advance(rest, remaining, &mut column, terminated)?;
                    self.on_string_item(item, start, end, &mut out)?;
                    remaining
                }
                ReaderState::BinArray => {
                    let base = match &self.literal {
                        Some(Literal::Array { base, .. }) => *base,
                        _ => 10,
                    };
                    let (remaining, item) = lexer::array_item(rest, base)
                        .map_err(|_| unknown(&start, "binarray item"))?;
                    let terminated = matches!(item, ArrayItem::RParen | ArrayItem::Digits(_));
                    let end = self.advance(rest, remaining, &mut column, terminated)?;
                    self.on_array_item(item, start, end, &mut out)?;
                    remaining
                }
            };
        }

        trace!(line = self.line, emitted = out.len(), "fed line");
        Ok(out)
    }

    /// Check that no construct is left open. Call once after the last line.
    pub fn finish(self) -> Result<(), ReadError> {
        debug!(lines = self.line, filename = %self.filename, "reader finished");
        match self.literal {
            Some(Literal::String { start, .. }) => {
                return Err(ReadError::UnexpectedEof {
                    state: ReaderState::String,
                    start,
                })
            }
            Some(Literal::Array { start, .. }) => {
                return Err(ReadError::UnexpectedEof {
                    state: ReaderState::BinArray,
                    start,
                })
            }
            None => {}
        }
        match self.stack.last() {
            None => Ok(()),
            Some(Frame::List { start, .. }) => Err(ReadError::UnmatchedOpen { pos: start.clone() }),
            Some(Frame::Comment { span }) => Err(ReadError::UnclosedComment { span: span.clone() }),
        }
    }

    // ------------------------------------------------------------------------
    // Token handling
    // ------------------------------------------------------------------------

    fn on_token(
        &mut self,
        token: Token<'_>,
        start: SourcePos,
        end: SourcePos,
        out: &mut Vec<GenericNode>,
    ) -> Result<(), ReadError> {
        let span = &start - &end;
        match token {
            Token::Whitespace | Token::LineComment => {}
            Token::LParen => self.push_frame(
                Frame::List {
                    start: start.clone(),
                    items: Vec::new(),
                },
                &start,
            )?,
            Token::RParen => match self.stack.pop() {
                None => return Err(ReadError::UnmatchedClose { span }),
                Some(Frame::Comment { span }) => return Err(ReadError::UnclosedComment { span }),
                Some(Frame::List { start, items }) => {
                    let list = GenericListNode::located(items, &start - &end);
                    self.emit(GenericNode::List(list), out);
                }
            },
            Token::SexprComment => self.push_frame(Frame::Comment { span }, &start)?,
            Token::Nil => self.emit(GenericNode::from(()).with_location(span), out),
            Token::Bool(value) => self.emit(GenericNode::from(value).with_location(span), out),
            Token::Symbol(name) => {
                let symbol = Symbol::new(name).map_err(|_| unknown(&start, "token"))?;
                self.emit(GenericNode::from(symbol).with_location(span), out);
            }
            Token::Number { width, literal } => {
                let value = BinInt::parse_literal(literal).ok_or_else(|| unknown(&start, "token"))?;
                let node = self.int_or_word(value, width, span)?;
                self.emit(node, out);
            }
            Token::Char { width, lit } => {
                let code = match lit {
                    CharLit::Raw(c) => u32::from(c),
                    CharLit::Simple(letter) => {
                        u32::from(unescape_char(letter).ok_or_else(|| unknown(&start, "token"))?)
                    }
                    CharLit::Hex(digits) => u32::from(decode_hex(digits, &span)?),
                };
                let node = self.int_or_word(BinInt::from(code), width, span)?;
                self.emit(node, out);
            }
            Token::StringStart { width } => {
                let width = width.map(|w| parse_width(w, &span)).transpose()?;
                self.literal = Some(Literal::String {
                    start,
                    width,
                    buffer: String::new(),
                });
            }
            Token::ArrayStart { width, base } => {
                let width = parse_width(width, &span)?;
                self.literal = Some(Literal::Array {
                    start,
                    base,
                    array: BinArray::new(width),
                });
            }
        }
        Ok(())
    }

    fn on_string_item(
        &mut self,
        item: StringItem<'_>,
        start: SourcePos,
        end: SourcePos,
        out: &mut Vec<GenericNode>,
    ) -> Result<(), ReadError> {
        let Some(Literal::String { buffer, .. }) = &mut self.literal else {
            return Ok(());
        };
        match item {
            StringItem::Raw(text) => buffer.push_str(text),
            StringItem::Simple(letter) => {
                buffer.push(unescape_char(letter).ok_or_else(|| unknown(&start, "escape sequence"))?)
            }
            StringItem::Hex(digits) => buffer.push(decode_hex(digits, &(&start - &end))?),
            StringItem::EndQuote => {
                let Some(Literal::String {
                    start: literal_start,
                    width,
                    buffer,
                }) = self.literal.take()
                else {
                    return Ok(());
                };
                let span = &literal_start - &end;
                let node = match width {
                    None => GenericNode::from(buffer),
                    Some(width) => {
                        let words = buffer
                            .chars()
                            .map(|c| BinWord::new(width, u32::from(c)))
                            .collect::<Result<Vec<_>, _>>()
                            .map_err(|_| ReadError::CharOutOfRange { span: span.clone() })?;
                        let array = BinArray::from_words(width, words)
                            .map_err(|_| ReadError::CharOutOfRange { span: span.clone() })?;
                        GenericNode::from(array)
                    }
                };
                self.emit(node.with_location(span), out);
            }
        }
        Ok(())
    }

    fn on_array_item(
        &mut self,
        item: ArrayItem<'_>,
        start: SourcePos,
        end: SourcePos,
        out: &mut Vec<GenericNode>,
    ) -> Result<(), ReadError> {
        match item {
            ArrayItem::Whitespace | ArrayItem::LineComment => {}
            ArrayItem::Digits(digits) => {
                let Some(Literal::Array { base, array, .. }) = &mut self.literal else {
                    return Ok(());
                };
                let span = &start - &end;
                let value = BinInt::parse_digits(digits, *base)
                    .ok_or_else(|| unknown(&start, "binarray item"))?;
                let word = BinWord::from_signed(array.width(), value.as_bigint())
                    .map_err(|_| ReadError::WordOutOfRange { span: span.clone() })?;
                array
                    .push(word)
                    .map_err(|_| ReadError::WordOutOfRange { span })?;
            }
            ArrayItem::RParen => {
                let Some(Literal::Array {
                    start: literal_start,
                    array,
                    ..
                }) = self.literal.take()
                else {
                    return Ok(());
                };
                let span = &literal_start - &end;
                self.emit(GenericNode::from(array).with_location(span), out);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn pos(&self, column: u32) -> SourcePos {
        SourcePos {
            filename: Arc::clone(&self.filename),
            line: self.line,
            column,
        }
    }

    /// Move `column` past the matched text and enforce the whitespace rule.
    fn advance(
        &self,
        before: &str,
        remaining: &str,
        column: &mut u32,
        terminated: bool,
    ) -> Result<SourcePos, ReadError> {
        let matched = &before[..before.len() - remaining.len()];
        *column += matched.chars().count() as u32;
        let end = self.pos(*column);
        if terminated && !lexer::is_token_boundary(remaining) {
            return Err(ReadError::NoWhitespace { pos: end });
        }
        Ok(end)
    }

    fn push_frame(&mut self, frame: Frame, start: &SourcePos) -> Result<(), ReadError> {
        if let Some(max_depth) = self.max_depth {
            if self.stack.len() >= max_depth {
                return Err(ReadError::TooDeep {
                    pos: start.clone(),
                    max_depth,
                });
            }
        }
        self.stack.push(frame);
        Ok(())
    }

    /// Hand a completed value to the enclosing list, the output, or the
    /// pending S-expr comment that swallows it.
    fn emit(&mut self, node: GenericNode, out: &mut Vec<GenericNode>) {
        match self.stack.last_mut() {
            None => out.push(node),
            Some(Frame::List { items, .. }) => items.push(node),
            Some(Frame::Comment { .. }) => {
                self.stack.pop();
            }
        }
    }

    fn int_or_word(
        &self,
        value: BinInt,
        width: Option<&str>,
        span: SourceSpan,
    ) -> Result<GenericNode, ReadError> {
        let node = match width {
            None => GenericNode::from(value),
            Some(width) => {
                let width = parse_width(width, &span)?;
                let word = BinWord::from_signed(width, value.as_bigint())
                    .map_err(|_| ReadError::WordOutOfRange { span: span.clone() })?;
                GenericNode::from(word)
            }
        };
        Ok(node.with_location(span))
    }
}

fn unknown(pos: &SourcePos, item: &'static str) -> ReadError {
    ReadError::UnknownItem {
        pos: pos.clone(),
        item,
    }
}

fn parse_width(digits: &str, span: &SourceSpan) -> Result<u32, ReadError> {
    digits
        .parse()
        .map_err(|_| ReadError::InvalidWidth { span: span.clone() })
}

fn decode_hex(digits: &str, span: &SourceSpan) -> Result<char, ReadError> {
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| ReadError::InvalidCodepoint { span: span.clone() })
}

// ============================================================================
// Convenience entry points
// ============================================================================

/// Read every top-level node of `text`.
pub fn read_str(text: &str, filename: &str) -> Result<Vec<GenericNode>, ReadError> {
    let mut reader = Reader::new(filename);
    let mut nodes = Vec::new();
    for line in text.split_inclusive('\n') {
        nodes.extend(reader.feed_line(line)?);
    }
    reader.finish()?;
    Ok(nodes)
}

/// Read every top-level node from a buffered source.
pub fn read_from(input: impl BufRead, filename: &str) -> Result<Vec<GenericNode>> {
    read_lines(input, Reader::new(filename), Path::new(filename))
}

/// Read every top-level node of a file, tagging locations with its path.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<GenericNode>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = Reader::new(path.display().to_string());
    read_lines(std::io::BufReader::new(file), reader, path)
}

/// Read `text` and convert every top-level node to `N`.
pub fn read_typed<N: Node>(text: &str, filename: &str) -> Result<Vec<N>> {
    let nodes = read_str(text, filename)?;
    let typed = nodes
        .into_iter()
        .map(N::convert)
        .collect::<Result<Vec<_>, ConvertError>>()?;
    Ok(typed)
}

fn read_lines(mut input: impl BufRead, mut reader: Reader, path: &Path) -> Result<Vec<GenericNode>> {
    let mut nodes = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        let n = input.read_line(&mut line).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        nodes.extend(reader.feed_line(&line)?);
    }
    reader.finish()?;
    Ok(nodes)
}
