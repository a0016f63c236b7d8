//! Atom nodes
//!
//! [`AtomNode<T>`] wraps one payload of type `T`; the aliases name the seven
//! payload kinds the reader produces.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use binsexpr_types::{BinArray, BinInt, BinWord};
use serde::{Deserialize, Serialize};

use super::{GenericNode, Node, NodeShape};
use crate::error::{ConvertError, ConvertErrorKind};
use crate::location::SourceSpan;
use crate::string::escape_string;
use crate::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AtomType {
    Symbol,
    Nil,
    Bool,
    Int,
    Word,
    Array,
    String,
}

impl AtomType {
    pub fn node_name(self) -> &'static str {
        match self {
            Self::Symbol => "SymbolNode",
            Self::Nil => "NilNode",
            Self::Bool => "BoolNode",
            Self::Int => "IntNode",
            Self::Word => "WordNode",
            Self::Array => "ArrayNode",
            Self::String => "StringNode",
        }
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_name())
    }
}

/// A payload type that can live in an [`AtomNode`].
pub trait AtomValue: Clone + fmt::Debug + Eq + Ord + Hash + 'static {
    const ATOM: AtomType;

    fn into_generic(node: AtomNode<Self>) -> GenericNode;

    /// Unwrap the matching generic case, handing back anything else.
    fn from_generic(node: GenericNode) -> Result<AtomNode<Self>, GenericNode>;

    /// Write the canonical text form.
    fn fmt_sexpr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

fn fmt_display<T: fmt::Display>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{value}")
}

fn fmt_nil(_: &(), f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("@nil")
}

fn fmt_bool(value: &bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(if *value { "@true" } else { "@false" })
}

fn fmt_string(value: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&escape_string(value))
}

macro_rules! atom_value {
    ($ty:ty, $variant:ident, $fmt:expr) => {
        impl AtomValue for $ty {
            const ATOM: AtomType = AtomType::$variant;

            fn into_generic(node: AtomNode<Self>) -> GenericNode {
                GenericNode::$variant(node)
            }

            fn from_generic(node: GenericNode) -> Result<AtomNode<Self>, GenericNode> {
                match node {
                    GenericNode::$variant(node) => Ok(node),
                    other => Err(other),
                }
            }

            fn fmt_sexpr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                $fmt(self, f)
            }
        }
    };
}

atom_value!(Symbol, Symbol, fmt_display);
atom_value!((), Nil, fmt_nil);
atom_value!(bool, Bool, fmt_bool);
atom_value!(BinInt, Int, fmt_display);
atom_value!(BinWord, Word, fmt_display);
atom_value!(BinArray, Array, fmt_display);
atom_value!(String, String, fmt_string);

pub type SymbolNode = AtomNode<Symbol>;
pub type NilNode = AtomNode<()>;
pub type BoolNode = AtomNode<bool>;
pub type IntNode = AtomNode<BinInt>;
pub type WordNode = AtomNode<BinWord>;
pub type ArrayNode = AtomNode<BinArray>;
pub type StringNode = AtomNode<String>;

/// A single payload value with an optional location.
///
/// Equality, ordering and hashing look at the value only.
#[derive(Clone, Debug)]
pub struct AtomNode<T: AtomValue> {
    value: T,
    location: Option<SourceSpan>,
}

impl<T: AtomValue> AtomNode<T> {
    pub fn new(value: impl Into<T>) -> Self {
        Self {
            value: value.into(),
            location: None,
        }
    }

    pub fn located(value: impl Into<T>, location: SourceSpan) -> Self {
        Self {
            value: value.into(),
            location: Some(location),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn with_location(self, location: impl Into<Option<SourceSpan>>) -> Self {
        Self {
            location: location.into(),
            ..self
        }
    }
}

impl NilNode {
    pub fn nil() -> Self {
        Self::new(())
    }
}

impl<T: AtomValue> Node for AtomNode<T> {
    fn convert(node: GenericNode) -> Result<Self, ConvertError> {
        T::from_generic(node).map_err(|other| {
            ConvertError::new(
                ConvertErrorKind::Expected {
                    expected: T::ATOM.node_name(),
                    found: other.kind_name(),
                },
                other.location().cloned(),
            )
        })
    }

    fn to_generic(&self) -> GenericNode {
        T::into_generic(self.clone())
    }

    fn location(&self) -> Option<&SourceSpan> {
        self.location.as_ref()
    }

    fn shape() -> NodeShape {
        NodeShape::Atom(T::ATOM)
    }
}

impl<T: AtomValue> fmt::Display for AtomNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt_sexpr(f)
    }
}

impl<T: AtomValue> PartialEq for AtomNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: AtomValue> Eq for AtomNode<T> {}

impl<T: AtomValue> PartialOrd for AtomNode<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: AtomValue> Ord for AtomNode<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: AtomValue> Hash for AtomNode<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
