//! Alternatives: one value, several possible node types
//!
//! A policy holds mutually exclusive candidates, each identified by the
//! shape it accepts. Conversion dispatches atoms on payload type and lists
//! on the leading symbol (or to the single list candidate). Candidates are
//! registered once with [`Alternatives::define`]; nested policies are
//! flattened into the outer one.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::{AtomType, GenericNode, Node, NodeShape};
use crate::error::{ConvertError, ConvertErrorKind, DefinitionError};
use crate::symbol::Symbol;

type ConvertFn<T> = Arc<dyn Fn(GenericNode) -> Result<T, ConvertError> + Send + Sync>;

/// One node type a policy may produce, with its result wrapper.
pub struct Candidate<T> {
    shape: NodeShape,
    type_id: TypeId,
    type_name: &'static str,
    convert: ConvertFn<T>,
}

impl<T: 'static> Candidate<T> {
    pub fn new<N: Node>(wrap: fn(N) -> T) -> Self {
        Self {
            shape: N::shape(),
            type_id: TypeId::of::<N>(),
            type_name: std::any::type_name::<N>(),
            convert: Arc::new(move |node| N::convert(node).map(wrap)),
        }
    }

    /// Rewrap the result. Shape and node type are kept.
    pub fn map<U: 'static>(self, wrap: fn(T) -> U) -> Candidate<U> {
        let convert = self.convert;
        Candidate {
            shape: self.shape,
            type_id: self.type_id,
            type_name: self.type_name,
            convert: Arc::new(move |node| convert(node).map(wrap)),
        }
    }

    pub fn shape(&self) -> &NodeShape {
        &self.shape
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn convert(&self, node: GenericNode) -> Result<T, ConvertError> {
        (self.convert)(node)
    }
}

impl<T> Clone for Candidate<T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            type_id: self.type_id,
            type_name: self.type_name,
            convert: Arc::clone(&self.convert),
        }
    }
}

impl<T> fmt::Debug for Candidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("shape", &self.shape)
            .field("type_name", &self.type_name)
            .finish()
    }
}

struct Table<T> {
    candidates: Vec<Candidate<T>>,
    atoms: HashMap<AtomType, usize>,
    list: Option<usize>,
    forms: BTreeMap<Symbol, usize>,
}

impl<T> Table<T> {
    fn build(policy: &'static str, candidates: Vec<Candidate<T>>) -> Result<Self, DefinitionError> {
        let mut atoms = HashMap::new();
        let mut list = None;
        let mut forms = BTreeMap::new();

        for (index, candidate) in candidates.iter().enumerate() {
            match &candidate.shape {
                NodeShape::Any | NodeShape::Alternatives => {
                    return Err(DefinitionError::GenericCandidate {
                        policy,
                        candidate: candidate.type_name,
                    })
                }
                NodeShape::Atom(atom) => {
                    if atoms.insert(*atom, index).is_some() {
                        return Err(DefinitionError::DuplicateAtom { policy, atom: *atom });
                    }
                }
                NodeShape::List => {
                    if list.replace(index).is_some() {
                        return Err(DefinitionError::DuplicateList { policy });
                    }
                }
                NodeShape::Form(symbol) => {
                    if forms.insert(symbol.clone(), index).is_some() {
                        return Err(DefinitionError::DuplicateForm {
                            policy,
                            symbol: symbol.clone(),
                        });
                    }
                }
            }
        }
        if list.is_some() && !forms.is_empty() {
            return Err(DefinitionError::ListAndForm { policy });
        }

        Ok(Self {
            candidates,
            atoms,
            list,
            forms,
        })
    }

    fn select(&self, node: &GenericNode) -> Result<usize, ConvertError> {
        let fail = |kind| ConvertError::new(kind, node.location().cloned());
        let items = match node {
            GenericNode::List(list) => list.items(),
            atom => {
                let found = atom.kind_name();
                return atom
                    .atom_type()
                    .and_then(|t| self.atoms.get(&t).copied())
                    .ok_or_else(|| fail(ConvertErrorKind::NotAllowed { found }));
            }
        };
        if let Some(index) = self.list {
            return Ok(index);
        }
        if self.forms.is_empty() {
            return Err(fail(ConvertErrorKind::NotAllowed { found: "ListNode" }));
        }
        let symbol = match items.first() {
            None => return Err(fail(ConvertErrorKind::EmptyForm)),
            Some(GenericNode::Symbol(head)) => head.value(),
            Some(_) => return Err(fail(ConvertErrorKind::FormWithoutSymbol)),
        };
        self.forms.get(symbol).copied().ok_or_else(|| {
            let available = self
                .forms
                .keys()
                .map(Symbol::name)
                .collect::<Vec<_>>()
                .join(", ");
            fail(ConvertErrorKind::UnknownForm {
                symbol: symbol.clone(),
                available,
            })
        })
    }
}

/// A named resolution policy producing `T`.
pub struct Alternatives<T> {
    name: &'static str,
    table: OnceLock<Table<T>>,
}

impl<T: 'static> Alternatives<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            table: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register the candidate set. Only the first call succeeds.
    pub fn define(&self, candidates: Vec<Candidate<T>>) -> Result<(), DefinitionError> {
        let already = DefinitionError::AlreadyDefined { policy: self.name };
        if self.is_defined() {
            return Err(already);
        }
        let table = Table::build(self.name, candidates)?;
        let count = table.candidates.len();
        self.table.set(table).map_err(|_| already)?;
        debug!(policy = self.name, candidates = count, "Alternatives defined");
        Ok(())
    }

    pub fn is_defined(&self) -> bool {
        self.table.get().is_some()
    }

    fn table(&self) -> Result<&Table<T>, DefinitionError> {
        self.table
            .get()
            .ok_or(DefinitionError::Undefined { policy: self.name })
    }

    pub fn convert(&self, node: GenericNode) -> Result<T, ConvertError> {
        let table = self.table()?;
        let index = table.select(&node)?;
        table.candidates[index].convert(node)
    }

    /// The candidates rewrapped for an enclosing policy.
    pub fn flatten<U: 'static>(&self, wrap: fn(T) -> U) -> Result<Vec<Candidate<U>>, DefinitionError> {
        Ok(self
            .table()?
            .candidates
            .iter()
            .map(|candidate| candidate.clone().map(wrap))
            .collect())
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        self.table
            .get()
            .map(|table| table.candidates.as_slice())
            .unwrap_or_default()
    }

    /// Whether `N` is one of the (flattened) candidate types.
    pub fn contains<N: Node>(&self) -> bool {
        let id = TypeId::of::<N>();
        self.candidates().iter().any(|c| c.type_id == id)
    }

    pub fn is_instance(&self, value: &dyn Any) -> bool {
        let id = value.type_id();
        self.candidates().iter().any(|c| c.type_id == id)
    }

    /// Form symbols in sorted order.
    pub fn form_symbols(&self) -> Vec<Symbol> {
        self.table
            .get()
            .map(|table| table.forms.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl<T> fmt::Debug for Alternatives<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alternatives")
            .field("name", &self.name)
            .field("defined", &self.table.get().is_some())
            .finish()
    }
}

/// Declare an enum over several node types, with a static policy.
///
/// ```ignore
/// alternatives_node! {
///     pub enum Value {
///         Int(IntNode),
///         Call(CallForm),
///     }
/// }
/// Value::register()?;
/// let value = Value::from_value(123)?;
/// ```
///
/// `register` must run once before conversion, after any nested
/// alternatives have been registered.
#[macro_export]
macro_rules! alternatives_node {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident ( $ty:ty ) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $( $variant($ty), )+
        }

        #[allow(dead_code)]
        impl $name {
            pub fn policy() -> &'static $crate::nodes::Alternatives<$name> {
                static POLICY: $crate::nodes::Alternatives<$name> =
                    $crate::nodes::Alternatives::new(stringify!($name));
                &POLICY
            }

            /// Define the policy from the variant types.
            pub fn register() -> ::std::result::Result<(), $crate::error::DefinitionError> {
                let mut candidates = ::std::vec::Vec::new();
                $(
                    candidates.extend(<$ty as $crate::nodes::Node>::candidates::<$name>($name::$variant)?);
                )+
                Self::policy().define(candidates)
            }
        }

        impl $crate::nodes::Node for $name {
            fn convert(
                node: $crate::nodes::GenericNode,
            ) -> ::std::result::Result<Self, $crate::error::ConvertError> {
                Self::policy().convert(node)
            }

            fn to_generic(&self) -> $crate::nodes::GenericNode {
                match self {
                    $( Self::$variant(inner) => $crate::nodes::Node::to_generic(inner), )+
                }
            }

            fn location(&self) -> ::std::option::Option<&$crate::location::SourceSpan> {
                match self {
                    $( Self::$variant(inner) => $crate::nodes::Node::location(inner), )+
                }
            }

            fn shape() -> $crate::nodes::NodeShape {
                $crate::nodes::NodeShape::Alternatives
            }

            fn candidates<T: 'static>(
                wrap: fn(Self) -> T,
            ) -> ::std::result::Result<
                ::std::vec::Vec<$crate::nodes::Candidate<T>>,
                $crate::error::DefinitionError,
            > {
                Self::policy().flatten(wrap)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $( Self::$variant(inner) => ::std::fmt::Display::fmt(inner, f), )+
                }
            }
        }
    };
}
