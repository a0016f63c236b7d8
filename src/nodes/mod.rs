//! Typed node tree
//!
//! Every node type implements [`Node`]: it can be converted from the generic
//! tree the reader produces, and converted back to it. The closed family:
//! - [`GenericNode`]: the untyped tree itself
//! - [`AtomNode`]: one case per payload type ([`IntNode`], [`SymbolNode`], ...)
//! - [`ListNode`]: a list whose items all convert to one node type
//! - forms declared with [`form_node!`](crate::form_node), bound to a [`FormSchema`]
//! - alternatives declared with [`alternatives_node!`](crate::alternatives_node),
//!   dispatching to one of several candidates by shape

pub mod alternatives;
pub mod atom;
pub mod form;
pub mod generic;
pub mod list;

use std::fmt;

pub use alternatives::{Alternatives, Candidate};
pub use atom::{
    ArrayNode, AtomNode, AtomType, AtomValue, BoolNode, IntNode, NilNode, StringNode, SymbolNode,
    WordNode,
};
pub use form::{FormNode, FormParts, FormSchema, FormSchemaBuilder};
pub use generic::GenericNode;
pub use list::{GenericListNode, ListNode};

use crate::error::{ConvertError, DefinitionError};
use crate::location::SourceSpan;
use crate::symbol::Symbol;

/// What a node type accepts, used to keep alternatives unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// Anything (the generic tree)
    Any,
    Atom(AtomType),
    List,
    /// A list starting with this symbol
    Form(Symbol),
    /// One of several shapes; only valid once flattened
    Alternatives,
}

pub trait Node: Clone + fmt::Debug + fmt::Display + 'static {
    /// Convert a generic node, keeping its location.
    fn convert(node: GenericNode) -> Result<Self, ConvertError>;

    fn to_generic(&self) -> GenericNode;

    fn location(&self) -> Option<&SourceSpan>;

    fn shape() -> NodeShape;

    /// Convert any representable host value.
    fn from_value(value: impl Into<GenericNode>) -> Result<Self, ConvertError> {
        Self::convert(value.into())
    }

    /// Convert from another node type through the generic tree.
    fn from_node<N: Node>(node: &N) -> Result<Self, ConvertError> {
        Self::convert(node.to_generic())
    }

    /// The candidates this type contributes to an alternatives policy,
    /// each wrapping its result with `wrap`.
    fn candidates<T: 'static>(wrap: fn(Self) -> T) -> Result<Vec<Candidate<T>>, DefinitionError> {
        Ok(vec![Candidate::new(wrap)])
    }
}
