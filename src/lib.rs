//! binsexpr - S-expressions for binary data
//!
//! A small textual notation: lists, symbols, `@nil`/`@true`/`@false`,
//! arbitrary-precision integers, fixed-width words (`12'0x123`), word arrays
//! (`12'0x(123 456)`) and strings, with source locations on every node.
//!
//! ## Layers
//! - [`reader`]: line-fed state machine producing [`GenericNode`] trees
//! - [`nodes`]: typed views over the generic tree (atoms, lists, forms,
//!   alternatives) and conversion back
//!
//! ## Quick Start
//!
//! ```rust
//! use binsexpr::read_str;
//!
//! let nodes = read_str("(abc 12'0x123 \"a\\nb\")\n", "<string>").unwrap();
//! assert_eq!(nodes[0].to_string(), "(abc 12'0x123 \"a\\nb\")");
//! ```

pub mod config;
pub mod error;
pub mod location;
pub mod nodes;
pub mod reader;
pub mod string;
pub mod symbol;

pub use binsexpr_types::{BinArray, BinInt, BinWord, TypesError};

pub use config::ReaderConfig;
pub use error::{ConvertError, ConvertErrorKind, DefinitionError, Error, ReadError, Result};
pub use location::{SourcePos, SourceSpan};
pub use nodes::{
    Alternatives, ArrayNode, AtomNode, AtomType, BoolNode, Candidate, FormNode, FormSchema,
    GenericListNode, GenericNode, IntNode, ListNode, NilNode, Node, NodeShape, StringNode,
    SymbolNode, WordNode,
};
pub use reader::{read_file, read_from, read_str, read_typed, Reader, ReaderState};
pub use symbol::{Symbol, SymbolError};
