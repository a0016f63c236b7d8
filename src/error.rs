//! Error types
//!
//! Three families, matching when each can happen:
//! - [`ReadError`]: lexical and structural problems found by the reader
//! - [`ConvertError`]: a value whose shape does not match the target node type
//! - [`DefinitionError`]: a malformed form schema or alternatives policy,
//!   or a form constructed from inconsistent named arguments

use std::path::PathBuf;

use thiserror::Error;

use crate::location::{SourcePos, SourceSpan};
use crate::nodes::AtomType;
use crate::reader::ReaderState;
use crate::symbol::{Symbol, SymbolError};

// ============================================================================
// Reader errors
// ============================================================================

/// A problem noticed by the reader. The reader must be discarded afterwards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("{pos}: unknown {item}")]
    UnknownItem { pos: SourcePos, item: &'static str },

    #[error("{pos}: no whitespace after token")]
    NoWhitespace { pos: SourcePos },

    #[error("{span}: unmatched closing paren")]
    UnmatchedClose { span: SourceSpan },

    #[error("{pos}: unmatched opening paren")]
    UnmatchedOpen { pos: SourcePos },

    #[error("{span}: unclosed S-expr comment")]
    UnclosedComment { span: SourceSpan },

    #[error("{start}: EOF while in {state} state")]
    UnexpectedEof { state: ReaderState, start: SourcePos },

    #[error("{span}: word value out of range")]
    WordOutOfRange { span: SourceSpan },

    #[error("{span}: character code out of range")]
    CharOutOfRange { span: SourceSpan },

    #[error("{span}: not a valid unicode codepoint")]
    InvalidCodepoint { span: SourceSpan },

    #[error("{span}: invalid word width")]
    InvalidWidth { span: SourceSpan },

    #[error("{pos}: nesting too deep (limit {max_depth})")]
    TooDeep { pos: SourcePos, max_depth: usize },
}

impl ReadError {
    /// Where the offending construct starts.
    pub fn start(&self) -> SourcePos {
        match self {
            Self::UnknownItem { pos, .. }
            | Self::NoWhitespace { pos }
            | Self::UnmatchedOpen { pos }
            | Self::TooDeep { pos, .. } => pos.clone(),
            Self::UnexpectedEof { start, .. } => start.clone(),
            Self::UnmatchedClose { span }
            | Self::UnclosedComment { span }
            | Self::WordOutOfRange { span }
            | Self::CharOutOfRange { span }
            | Self::InvalidCodepoint { span }
            | Self::InvalidWidth { span } => span.start(),
        }
    }
}

// ============================================================================
// Conversion errors
// ============================================================================

/// A value could not be converted to the requested node type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}{kind}", location_prefix(.location))]
pub struct ConvertError {
    pub location: Option<SourceSpan>,
    pub kind: ConvertErrorKind,
}

fn location_prefix(location: &Option<SourceSpan>) -> String {
    match location {
        Some(span) => format!("{span}: "),
        None => String::new(),
    }
}

impl ConvertError {
    pub fn new(kind: ConvertErrorKind, location: Option<SourceSpan>) -> Self {
        Self { location, kind }
    }
}

impl From<DefinitionError> for ConvertError {
    fn from(err: DefinitionError) -> Self {
        Self::new(ConvertErrorKind::Definition(err), None)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertErrorKind {
    #[error("expected {expected}, got {found}")]
    Expected {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a list")]
    ExpectedList,

    #[error("empty form")]
    EmptyForm,

    #[error("form must start with a symbol")]
    FormWithoutSymbol,

    #[error("expected form ({expected})")]
    WrongForm { expected: Symbol },

    #[error("too few arguments to form {symbol}")]
    TooFewArguments { symbol: Symbol },

    #[error("too many arguments to form {symbol}")]
    TooManyArguments { symbol: Symbol },

    #[error("{found} not allowed")]
    NotAllowed { found: &'static str },

    #[error("unknown form {symbol} (available forms: {available})")]
    UnknownForm { symbol: Symbol, available: String },

    #[error("{what} is not representable as a node")]
    NotRepresentable { what: String },

    #[error(transparent)]
    Definition(DefinitionError),
}

// ============================================================================
// Definition errors
// ============================================================================

/// A schema author mistake, or inconsistent named form arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error("duplicate argument {name} in form {form}")]
    DuplicateSlot { form: Symbol, name: String },

    #[error("required arg after optional arg ({name} in form {form})")]
    RequiredAfterOptional { form: Symbol, name: String },

    #[error("rest argument must be last ({name} in form {form})")]
    RestNotLast { form: Symbol, name: String },

    #[error("unknown field {name}")]
    UnknownField { name: String },

    #[error("multiple values for {name}")]
    DuplicateArgument { name: String },

    #[error("no value for {name}")]
    MissingArgument { name: String },

    #[error("passing argument after a missing argument ({name})")]
    ArgumentAfterMissing { name: String },

    #[error("rest argument {name} must be a list")]
    RestNotList { name: String },

    #[error("alternatives {policy} used before definition")]
    Undefined { policy: &'static str },

    #[error("alternatives {policy} already defined")]
    AlreadyDefined { policy: &'static str },

    #[error("{candidate} cannot be an alternative of {policy}")]
    GenericCandidate {
        policy: &'static str,
        candidate: &'static str,
    },

    #[error("duplicate {atom} alternative in {policy}")]
    DuplicateAtom { policy: &'static str, atom: AtomType },

    #[error("duplicate list alternative in {policy}")]
    DuplicateList { policy: &'static str },

    #[error("duplicate form {symbol} in {policy}")]
    DuplicateForm { policy: &'static str, symbol: Symbol },

    #[error("list and form alternatives are mutually exclusive in {policy}")]
    ListAndForm { policy: &'static str },
}

// ============================================================================
// Crate-level error
// ============================================================================

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
