//! The untyped node tree
//!
//! [`GenericNode`] is what the reader emits and what every typed node
//! converts from and back to. Host values become generic nodes through the
//! `From` impls (sequences recursively); JSON values through `TryFrom`.

use std::fmt;

use binsexpr_types::{BinArray, BinInt, BinWord};
use serde_json::Value;

use super::atom::AtomValue;
use super::{
    ArrayNode, AtomNode, AtomType, BoolNode, GenericListNode, IntNode, ListNode, NilNode, Node,
    NodeShape, StringNode, SymbolNode, WordNode,
};
use crate::error::{ConvertError, ConvertErrorKind};
use crate::location::SourceSpan;
use crate::symbol::Symbol;

/// One case per atom payload type, plus lists.
///
/// Ordering compares the case first, then the value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenericNode {
    Symbol(SymbolNode),
    Nil(NilNode),
    Bool(BoolNode),
    Int(IntNode),
    Word(WordNode),
    Array(ArrayNode),
    String(StringNode),
    List(GenericListNode),
}

impl GenericNode {
    pub fn location(&self) -> Option<&SourceSpan> {
        match self {
            Self::Symbol(n) => n.location(),
            Self::Nil(n) => n.location(),
            Self::Bool(n) => n.location(),
            Self::Int(n) => n.location(),
            Self::Word(n) => n.location(),
            Self::Array(n) => n.location(),
            Self::String(n) => n.location(),
            Self::List(n) => n.location(),
        }
    }

    pub fn with_location(self, location: impl Into<Option<SourceSpan>>) -> Self {
        let location = location.into();
        match self {
            Self::Symbol(n) => Self::Symbol(n.with_location(location)),
            Self::Nil(n) => Self::Nil(n.with_location(location)),
            Self::Bool(n) => Self::Bool(n.with_location(location)),
            Self::Int(n) => Self::Int(n.with_location(location)),
            Self::Word(n) => Self::Word(n.with_location(location)),
            Self::Array(n) => Self::Array(n.with_location(location)),
            Self::String(n) => Self::String(n.with_location(location)),
            Self::List(n) => Self::List(n.with_location(location)),
        }
    }

    /// The payload type, or `None` for a list.
    pub fn atom_type(&self) -> Option<AtomType> {
        Some(match self {
            Self::Symbol(_) => AtomType::Symbol,
            Self::Nil(_) => AtomType::Nil,
            Self::Bool(_) => AtomType::Bool,
            Self::Int(_) => AtomType::Int,
            Self::Word(_) => AtomType::Word,
            Self::Array(_) => AtomType::Array,
            Self::String(_) => AtomType::String,
            Self::List(_) => return None,
        })
    }

    /// Name of the node case, as used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self.atom_type() {
            Some(atom) => atom.node_name(),
            None => "ListNode",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn as_list(&self) -> Option<&GenericListNode> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(node) => Some(node.value()),
            _ => None,
        }
    }
}

impl Node for GenericNode {
    fn convert(node: GenericNode) -> Result<Self, ConvertError> {
        Ok(node)
    }

    fn to_generic(&self) -> GenericNode {
        self.clone()
    }

    fn location(&self) -> Option<&SourceSpan> {
        GenericNode::location(self)
    }

    fn shape() -> NodeShape {
        NodeShape::Any
    }
}

impl fmt::Display for GenericNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(n) => fmt::Display::fmt(n, f),
            Self::Nil(n) => fmt::Display::fmt(n, f),
            Self::Bool(n) => fmt::Display::fmt(n, f),
            Self::Int(n) => fmt::Display::fmt(n, f),
            Self::Word(n) => fmt::Display::fmt(n, f),
            Self::Array(n) => fmt::Display::fmt(n, f),
            Self::String(n) => fmt::Display::fmt(n, f),
            Self::List(n) => fmt::Display::fmt(n, f),
        }
    }
}

// ============================================================================
// Host values
// ============================================================================

impl<T: AtomValue> From<AtomNode<T>> for GenericNode {
    fn from(node: AtomNode<T>) -> Self {
        T::into_generic(node)
    }
}

impl From<GenericListNode> for GenericNode {
    fn from(list: GenericListNode) -> Self {
        Self::List(list)
    }
}

impl<T: Into<GenericNode>> From<Vec<T>> for GenericNode {
    fn from(items: Vec<T>) -> Self {
        Self::List(ListNode::new(items.into_iter().map(Into::into).collect()))
    }
}

macro_rules! generic_from_payload {
    ($($ty:ty => $node:ident),* $(,)?) => {
        $(
            impl From<$ty> for GenericNode {
                fn from(value: $ty) -> Self {
                    $node::new(value).into()
                }
            }
        )*
    };
}

generic_from_payload! {
    Symbol => SymbolNode,
    () => NilNode,
    bool => BoolNode,
    BinInt => IntNode,
    BinWord => WordNode,
    BinArray => ArrayNode,
    String => StringNode,
    &str => StringNode,
    i8 => IntNode,
    i16 => IntNode,
    i32 => IntNode,
    i64 => IntNode,
    i128 => IntNode,
    u8 => IntNode,
    u16 => IntNode,
    u32 => IntNode,
    u64 => IntNode,
    u128 => IntNode,
    usize => IntNode,
}

impl TryFrom<&Value> for GenericNode {
    type Error = ConvertError;

    /// `null` is nil, arrays are lists; floats and objects have no node form.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let not_representable = |what: String| {
            ConvertError::new(ConvertErrorKind::NotRepresentable { what }, None)
        };
        match value {
            Value::Null => Ok(().into()),
            Value::Bool(b) => Ok((*b).into()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i.into())
                } else if let Some(u) = n.as_u64() {
                    Ok(u.into())
                } else {
                    Err(not_representable(format!("number {n}")))
                }
            }
            Value::String(s) => Ok(s.as_str().into()),
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(GenericNode::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(items.into())
            }
            Value::Object(_) => Err(not_representable("object".to_string())),
        }
    }
}

impl TryFrom<Value> for GenericNode {
    type Error = ConvertError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        GenericNode::try_from(&value)
    }
}
