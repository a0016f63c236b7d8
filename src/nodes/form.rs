//! Forms: symbol-tagged lists with named argument slots
//!
//! A [`FormSchema`] is declared once with [`FormSchema::builder`]: required
//! slots, then optional slots, then at most one rest slot. [`FormNode`] is a
//! schema-bound instance over generic values; the [`form_node!`](crate::form_node)
//! macro declares a typed struct on top of it.
//!
//! ```text
//! (my-form 123 @true "abc" 12'0x123)
//!  ^^^^^^^ ^^^ ^^^^^ ^^^^^ ^^^^^^^^
//!  symbol  req req   opt   rest...
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::{GenericListNode, GenericNode, Node, SymbolNode};
use crate::error::{ConvertError, ConvertErrorKind, DefinitionError};
use crate::location::SourceSpan;
use crate::symbol::{Symbol, SymbolError};

// ============================================================================
// Schema
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    Required,
    Optional,
    Rest,
}

/// The validated slot layout of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    symbol: Symbol,
    required: Vec<String>,
    optional: Vec<String>,
    rest: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormSchemaBuilder {
    symbol: Result<Symbol, SymbolError>,
    slots: Vec<(SlotKind, String)>,
}

impl FormSchema {
    pub fn builder(symbol: &str) -> FormSchemaBuilder {
        FormSchemaBuilder {
            symbol: Symbol::new(symbol),
            slots: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn optional(&self) -> &[String] {
        &self.optional
    }

    pub fn rest(&self) -> Option<&str> {
        self.rest.as_deref()
    }

    /// Number of positional slots (required and optional).
    pub fn positional_len(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.required
            .iter()
            .chain(&self.optional)
            .position(|slot| slot == name)
    }
}

impl FormSchemaBuilder {
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.slots.push((SlotKind::Required, name.into()));
        self
    }

    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.slots.push((SlotKind::Optional, name.into()));
        self
    }

    pub fn rest(mut self, name: impl Into<String>) -> Self {
        self.slots.push((SlotKind::Rest, name.into()));
        self
    }

    /// Validate the declaration and freeze it.
    pub fn finish(self) -> Result<FormSchema, DefinitionError> {
        let symbol = self.symbol?;
        let mut schema = FormSchema {
            symbol,
            required: Vec::new(),
            optional: Vec::new(),
            rest: None,
        };
        let mut seen = HashSet::new();
        for (kind, name) in self.slots {
            if !seen.insert(name.clone()) {
                return Err(DefinitionError::DuplicateSlot {
                    form: schema.symbol,
                    name,
                });
            }
            if let Some(rest) = schema.rest.take() {
                return Err(DefinitionError::RestNotLast {
                    form: schema.symbol,
                    name: rest,
                });
            }
            match kind {
                SlotKind::Required if !schema.optional.is_empty() => {
                    return Err(DefinitionError::RequiredAfterOptional {
                        form: schema.symbol,
                        name,
                    });
                }
                SlotKind::Required => schema.required.push(name),
                SlotKind::Optional => schema.optional.push(name),
                SlotKind::Rest => schema.rest = Some(name),
            }
        }
        Ok(schema)
    }
}

// ============================================================================
// Instances
// ============================================================================

/// A form instance over generic values, bound to its schema.
///
/// Present optional arguments are always contiguous: no argument follows a
/// missing one.
#[derive(Debug, Clone)]
pub struct FormNode {
    schema: Arc<FormSchema>,
    /// Required then optional slots
    args: Vec<Option<GenericNode>>,
    rest: Vec<GenericNode>,
    location: Option<SourceSpan>,
    symbol_location: Option<SourceSpan>,
}

/// The pieces of a [`FormNode`], for typed wrappers to convert.
#[derive(Debug, Clone)]
pub struct FormParts {
    pub location: Option<SourceSpan>,
    pub symbol_location: Option<SourceSpan>,
    pub required: Vec<GenericNode>,
    pub optional: Vec<Option<GenericNode>>,
    pub rest: Vec<GenericNode>,
}

impl FormNode {
    /// Bind the items of a list positionally: the leading symbol, then
    /// required, optional and rest slots in order.
    pub fn from_list(schema: &Arc<FormSchema>, node: GenericNode) -> Result<Self, ConvertError> {
        let list = match node {
            GenericNode::List(list) => list,
            other => {
                return Err(ConvertError::new(
                    ConvertErrorKind::ExpectedList,
                    other.location().cloned(),
                ))
            }
        };
        let location = list.location().cloned();
        let fail = |kind| ConvertError::new(kind, location.clone());

        let mut items = list.into_items().into_iter();
        let symbol_node = match items.next() {
            None => return Err(fail(ConvertErrorKind::EmptyForm)),
            Some(GenericNode::Symbol(node)) => node,
            Some(_) => return Err(fail(ConvertErrorKind::FormWithoutSymbol)),
        };
        if symbol_node.value() != &schema.symbol {
            return Err(fail(ConvertErrorKind::WrongForm {
                expected: schema.symbol.clone(),
            }));
        }

        let values: Vec<GenericNode> = items.collect();
        if values.len() < schema.required.len() {
            return Err(fail(ConvertErrorKind::TooFewArguments {
                symbol: schema.symbol.clone(),
            }));
        }
        if values.len() > schema.positional_len() && schema.rest.is_none() {
            return Err(fail(ConvertErrorKind::TooManyArguments {
                symbol: schema.symbol.clone(),
            }));
        }

        let mut values = values.into_iter();
        let mut args: Vec<Option<GenericNode>> =
            values.by_ref().take(schema.positional_len()).map(Some).collect();
        args.resize(schema.positional_len(), None);

        Ok(Self {
            schema: Arc::clone(schema),
            args,
            rest: values.collect(),
            location,
            symbol_location: symbol_node.location().cloned(),
        })
    }

    /// Build from named arguments. The rest slot takes a list value.
    pub fn from_named<'a, I>(schema: &Arc<FormSchema>, named: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = (&'a str, GenericNode)>,
    {
        let mut args: Vec<Option<GenericNode>> = vec![None; schema.positional_len()];
        let mut rest: Option<Vec<GenericNode>> = None;

        for (name, value) in named {
            if schema.rest() == Some(name) {
                if rest.is_some() {
                    return Err(DefinitionError::DuplicateArgument { name: name.to_string() });
                }
                match value {
                    GenericNode::List(list) => rest = Some(list.into_items()),
                    _ => return Err(DefinitionError::RestNotList { name: name.to_string() }),
                }
                continue;
            }
            let index = schema
                .position(name)
                .ok_or_else(|| DefinitionError::UnknownField { name: name.to_string() })?;
            if args[index].replace(value).is_some() {
                return Err(DefinitionError::DuplicateArgument { name: name.to_string() });
            }
        }

        for (name, arg) in schema.required.iter().zip(&args) {
            if arg.is_none() {
                return Err(DefinitionError::MissingArgument { name: name.clone() });
            }
        }
        let rest = rest.unwrap_or_default();
        check_no_gap(
            schema
                .optional
                .iter()
                .zip(&args[schema.required.len()..])
                .map(|(name, arg)| (name.as_str(), arg.is_some())),
            schema.rest().map(|name| (name, !rest.is_empty())),
        )?;

        Ok(Self {
            schema: Arc::clone(schema),
            args,
            rest,
            location: None,
            symbol_location: None,
        })
    }

    pub fn with_locations(
        mut self,
        location: Option<SourceSpan>,
        symbol_location: Option<SourceSpan>,
    ) -> Self {
        self.location = location;
        self.symbol_location = symbol_location;
        self
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    pub fn symbol(&self) -> &Symbol {
        &self.schema.symbol
    }

    pub fn location(&self) -> Option<&SourceSpan> {
        self.location.as_ref()
    }

    pub fn symbol_location(&self) -> Option<&SourceSpan> {
        self.symbol_location.as_ref()
    }

    /// The value of a required or optional slot, if present.
    pub fn arg(&self, name: &str) -> Option<&GenericNode> {
        self.schema
            .position(name)
            .and_then(|index| self.args[index].as_ref())
    }

    pub fn rest_items(&self) -> &[GenericNode] {
        &self.rest
    }

    /// The canonical list: the symbol at its recorded location, present
    /// arguments in slot order, then the rest values.
    pub fn to_list(&self) -> GenericListNode {
        let items = form_items(
            self.symbol(),
            self.symbol_location.clone(),
            self.args.iter().flatten().cloned().chain(self.rest.iter().cloned()),
        );
        GenericListNode::new(items).with_location(self.location.clone())
    }

    pub fn to_generic(&self) -> GenericNode {
        GenericNode::List(self.to_list())
    }

    pub fn into_parts(self) -> FormParts {
        let mut args = self.args;
        let optional = args.split_off(self.schema.required.len());
        FormParts {
            location: self.location,
            symbol_location: self.symbol_location,
            required: args.into_iter().flatten().collect(),
            optional,
            rest: self.rest,
        }
    }
}

impl PartialEq for FormNode {
    fn eq(&self, other: &Self) -> bool {
        self.schema.symbol == other.schema.symbol
            && self.args == other.args
            && self.rest == other.rest
    }
}

impl fmt::Display for FormNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_list())
    }
}

// ============================================================================
// Helpers shared with the form_node! macro
// ============================================================================

/// Fail if any optional slot (or a non-empty rest) follows a missing one.
#[doc(hidden)]
pub fn check_no_gap<'a>(
    optional: impl IntoIterator<Item = (&'a str, bool)>,
    rest: Option<(&'a str, bool)>,
) -> Result<(), DefinitionError> {
    let mut missing = false;
    for (name, present) in optional.into_iter().chain(rest) {
        if !present {
            missing = true;
        } else if missing {
            return Err(DefinitionError::ArgumentAfterMissing { name: name.to_string() });
        }
    }
    Ok(())
}

/// The generic items of a form: its symbol followed by `args`.
#[doc(hidden)]
pub fn form_items(
    symbol: &Symbol,
    symbol_location: Option<SourceSpan>,
    args: impl IntoIterator<Item = GenericNode>,
) -> Vec<GenericNode> {
    let head = SymbolNode::new(symbol.clone()).with_location(symbol_location);
    std::iter::once(GenericNode::Symbol(head)).chain(args).collect()
}

/// Take the next bound required value.
#[doc(hidden)]
pub fn next_required(
    values: &mut impl Iterator<Item = GenericNode>,
    schema: &FormSchema,
) -> Result<GenericNode, ConvertError> {
    values.next().ok_or_else(|| {
        ConvertError::new(
            ConvertErrorKind::TooFewArguments {
                symbol: schema.symbol.clone(),
            },
            None,
        )
    })
}

/// Declare a typed form.
///
/// ```ignore
/// form_node! {
///     pub struct MyForm("my-form") {
///         required { arg1: IntNode, arg2: BoolNode }
///         optional { arg3: StringNode }
///         rest { rest: WordNode }
///     }
/// }
/// ```
///
/// Sections are optional but must appear in this order. The struct gets
/// accessors per slot, `new` (rejecting an argument after a missing one),
/// `with_locations`, `schema`, `define`, and implementations of `Node`,
/// `Display` and location-free `PartialEq`.
///
/// The schema is built on first use. Call `define()` at startup to surface
/// a bad symbol or slot layout before any instance exists. Registering an
/// `alternatives_node!` policy does this for every form it contains.
#[macro_export]
macro_rules! form_node {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($symbol:literal) {
            $(required { $($req:ident : $req_ty:ty),* $(,)? })?
            $(optional { $($opt:ident : $opt_ty:ty),* $(,)? })?
            $(rest { $rest:ident : $rest_ty:ty $(,)? })?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name {
            $($( $req: $req_ty, )*)?
            $($( $opt: ::std::option::Option<$opt_ty>, )*)?
            $( $rest: ::std::vec::Vec<$rest_ty>, )?
            symbol: $crate::symbol::Symbol,
            location: ::std::option::Option<$crate::location::SourceSpan>,
            symbol_location: ::std::option::Option<$crate::location::SourceSpan>,
        }

        #[allow(dead_code)]
        impl $name {
            /// The validated schema of this form.
            pub fn schema() -> ::std::result::Result<
                &'static ::std::sync::Arc<$crate::nodes::FormSchema>,
                $crate::error::DefinitionError,
            > {
                static SCHEMA: ::std::sync::LazyLock<
                    ::std::result::Result<
                        ::std::sync::Arc<$crate::nodes::FormSchema>,
                        $crate::error::DefinitionError,
                    >,
                > = ::std::sync::LazyLock::new(|| {
                    $crate::nodes::FormSchema::builder($symbol)
                        $($( .required(stringify!($req)) )*)?
                        $($( .optional(stringify!($opt)) )*)?
                        $( .rest(stringify!($rest)) )?
                        .finish()
                        .map(::std::sync::Arc::new)
                });
                SCHEMA.as_ref().map_err(::std::clone::Clone::clone)
            }

            /// Validate the schema now instead of at first use.
            pub fn define() -> ::std::result::Result<(), $crate::error::DefinitionError> {
                Self::schema().map(|_| ())
            }

            pub fn new(
                $($( $req: $req_ty, )*)?
                $($( $opt: ::std::option::Option<$opt_ty>, )*)?
                $( $rest: ::std::vec::Vec<$rest_ty>, )?
            ) -> ::std::result::Result<Self, $crate::error::DefinitionError> {
                let schema = Self::schema()?;
                let optional: &[(&str, bool)] = &[$($( (stringify!($opt), $opt.is_some()), )*)?];
                let rest: ::std::option::Option<(&str, bool)> = None
                    $( .or(Some((stringify!($rest), !$rest.is_empty()))) )?;
                $crate::nodes::form::check_no_gap(optional.iter().copied(), rest)?;
                Ok(Self {
                    $($( $req, )*)?
                    $($( $opt, )*)?
                    $( $rest, )?
                    symbol: schema.symbol().clone(),
                    location: None,
                    symbol_location: None,
                })
            }

            pub fn with_locations(
                mut self,
                location: ::std::option::Option<$crate::location::SourceSpan>,
                symbol_location: ::std::option::Option<$crate::location::SourceSpan>,
            ) -> Self {
                self.location = location;
                self.symbol_location = symbol_location;
                self
            }

            pub fn symbol(&self) -> &$crate::symbol::Symbol {
                &self.symbol
            }

            pub fn symbol_location(&self) -> ::std::option::Option<&$crate::location::SourceSpan> {
                self.symbol_location.as_ref()
            }

            $($(
                pub fn $req(&self) -> &$req_ty {
                    &self.$req
                }
            )*)?

            $($(
                pub fn $opt(&self) -> ::std::option::Option<&$opt_ty> {
                    self.$opt.as_ref()
                }
            )*)?

            $(
                pub fn $rest(&self) -> &[$rest_ty] {
                    &self.$rest
                }
            )?
        }

        impl $crate::nodes::Node for $name {
            #[allow(unused_mut, unused_variables)]
            fn convert(
                node: $crate::nodes::GenericNode,
            ) -> ::std::result::Result<Self, $crate::error::ConvertError> {
                let schema = Self::schema()?;
                let parts = $crate::nodes::FormNode::from_list(schema, node)?.into_parts();
                let mut required = parts.required.into_iter();
                let mut optional = parts.optional.into_iter();
                Ok(Self {
                    $($(
                        $req: <$req_ty as $crate::nodes::Node>::convert(
                            $crate::nodes::form::next_required(&mut required, schema)?,
                        )?,
                    )*)?
                    $($(
                        $opt: optional
                            .next()
                            .flatten()
                            .map(<$opt_ty as $crate::nodes::Node>::convert)
                            .transpose()?,
                    )*)?
                    $(
                        $rest: parts
                            .rest
                            .into_iter()
                            .map(<$rest_ty as $crate::nodes::Node>::convert)
                            .collect::<::std::result::Result<::std::vec::Vec<_>, _>>()?,
                    )?
                    symbol: schema.symbol().clone(),
                    location: parts.location,
                    symbol_location: parts.symbol_location,
                })
            }

            #[allow(unused_mut)]
            fn to_generic(&self) -> $crate::nodes::GenericNode {
                let mut args: ::std::vec::Vec<$crate::nodes::GenericNode> = ::std::vec::Vec::new();
                $($( args.push($crate::nodes::Node::to_generic(&self.$req)); )*)?
                $($( args.extend(self.$opt.as_ref().map($crate::nodes::Node::to_generic)); )*)?
                $( args.extend(self.$rest.iter().map($crate::nodes::Node::to_generic)); )?
                let items =
                    $crate::nodes::form::form_items(&self.symbol, self.symbol_location.clone(), args);
                $crate::nodes::GenericNode::List(
                    $crate::nodes::GenericListNode::new(items).with_location(self.location.clone()),
                )
            }

            fn location(&self) -> ::std::option::Option<&$crate::location::SourceSpan> {
                self.location.as_ref()
            }

            fn shape() -> $crate::nodes::NodeShape {
                match Self::schema() {
                    Ok(schema) => $crate::nodes::NodeShape::Form(schema.symbol().clone()),
                    Err(_) => $crate::nodes::NodeShape::Any,
                }
            }

            fn candidates<T: 'static>(
                wrap: fn(Self) -> T,
            ) -> ::std::result::Result<
                ::std::vec::Vec<$crate::nodes::Candidate<T>>,
                $crate::error::DefinitionError,
            > {
                Self::schema()?;
                Ok(vec![$crate::nodes::Candidate::new(wrap)])
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&$crate::nodes::Node::to_generic(self), f)
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                true $($( && self.$req == other.$req )*)?
                    $($( && self.$opt == other.$opt )*)?
                    $( && self.$rest == other.$rest )?
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{IntNode, Node};
    use pretty_assertions::assert_eq;

    fn schema() -> Arc<FormSchema> {
        Arc::new(
            FormSchema::builder("my-form")
                .required("arg1")
                .required("arg2")
                .optional("arg3")
                .rest("rest")
                .finish()
                .unwrap(),
        )
    }

    fn sym(name: &str) -> GenericNode {
        GenericNode::from(Symbol::new(name).unwrap())
    }

    fn g(value: impl Into<GenericNode>) -> GenericNode {
        value.into()
    }

    #[test]
    fn test_schema_ordering_errors() {
        let err = FormSchema::builder("b")
            .optional("a")
            .required("b")
            .finish()
            .unwrap_err();
        assert!(err.to_string().contains("required arg after optional arg"));

        let err = FormSchema::builder("a").rest("a").rest("b").finish().unwrap_err();
        assert!(err.to_string().contains("rest argument must be last"));

        let err = FormSchema::builder("a").rest("r").optional("o").finish().unwrap_err();
        assert!(matches!(err, DefinitionError::RestNotLast { .. }));

        let err = FormSchema::builder("a").required("x").optional("x").finish().unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateSlot { .. }));

        let err = FormSchema::builder("1bad").finish().unwrap_err();
        assert!(matches!(err, DefinitionError::Symbol(_)));
    }

    #[test]
    fn test_from_list_binds_slots() {
        let schema = schema();
        let node = GenericNode::from(vec![sym("my-form"), 1.into(), true.into(), "s".into(), 5.into(), 6.into()]);
        let form = FormNode::from_list(&schema, node).unwrap();
        assert_eq!(form.arg("arg1"), Some(&GenericNode::from(1)));
        assert_eq!(form.arg("arg3"), Some(&GenericNode::from("s")));
        assert_eq!(form.rest_items(), &[GenericNode::from(5), GenericNode::from(6)]);
        assert_eq!(form.to_string(), "(my-form 1 @true \"s\" 5 6)");

        let short = GenericNode::from(vec![sym("my-form"), 1.into(), true.into()]);
        let form = FormNode::from_list(&schema, short).unwrap();
        assert_eq!(form.arg("arg3"), None);
        assert_eq!(form.to_string(), "(my-form 1 @true)");
    }

    #[test]
    fn test_from_list_errors() {
        let schema = schema();
        let err = |node: GenericNode| FormNode::from_list(&schema, node).unwrap_err().to_string();
        assert_eq!(err(123.into()), "expected a list");
        assert_eq!(err(Vec::<GenericNode>::new().into()), "empty form");
        assert_eq!(err(vec![123].into()), "form must start with a symbol");
        assert_eq!(err(vec![sym("not-my-form")].into()), "expected form (my-form)");
        assert_eq!(err(vec![sym("my-form")].into()), "too few arguments to form my-form");

        let bare = Arc::new(FormSchema::builder("my-other-form").finish().unwrap());
        let err = FormNode::from_list(&bare, vec![sym("my-other-form"), 123.into()].into()).unwrap_err();
        assert_eq!(err.to_string(), "too many arguments to form my-other-form");
    }

    #[test]
    fn test_from_named() {
        let schema = schema();
        let form = FormNode::from_named(&schema, [("arg1", g(456)), ("arg2", g(false))]).unwrap();
        let listed =
            FormNode::from_list(&schema, vec![sym("my-form"), 456.into(), false.into()].into()).unwrap();
        assert_eq!(form, listed);

        let err = FormNode::from_named(&schema, Vec::<(&str, GenericNode)>::new()).unwrap_err();
        assert_eq!(err.to_string(), "no value for arg1");

        let err = FormNode::from_named(
            &schema,
            [("arg1", g(1)), ("arg2", g(true)), ("rest", g(vec![1]))],
        )
        .unwrap_err();
        assert!(err.to_string().contains("passing argument after a missing argument"));

        let err =
            FormNode::from_named(&schema, [("arg1", g(1)), ("arg2", g(true)), ("meh", g(true))])
                .unwrap_err();
        assert_eq!(err.to_string(), "unknown field meh");

        let err = FormNode::from_named(&schema, [("arg1", g(1)), ("arg1", g(2))]).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateArgument { .. }));

        let err = FormNode::from_named(
            &schema,
            [("arg1", g(1)), ("arg2", g(true)), ("arg3", g("x")), ("rest", g(1))],
        )
        .unwrap_err();
        assert!(matches!(err, DefinitionError::RestNotList { .. }));
    }

    #[test]
    fn test_locations_round_trip() {
        let schema = schema();
        let loc = SourceSpan::new("abc", 1, 2, 3, 4);
        let loc2 = SourceSpan::new("def", 5, 6, 7, 8);
        let head = GenericNode::from(Symbol::new("my-form").unwrap()).with_location(loc.clone());
        let node = GenericNode::from(vec![head, 1.into(), true.into()]).with_location(loc2.clone());
        let form = FormNode::from_list(&schema, node).unwrap();
        assert_eq!(form.location(), Some(&loc2));
        assert_eq!(form.symbol_location(), Some(&loc));
        assert_eq!(form.to_list().items()[0].location(), Some(&loc));
        assert_eq!(form.to_list().location(), Some(&loc2));
    }

    #[test]
    fn test_into_parts() {
        let schema = schema();
        let node: GenericNode = vec![sym("my-form"), 1.into(), true.into(), "s".into(), 9.into()].into();
        let parts = FormNode::from_list(&schema, node).unwrap().into_parts();
        assert_eq!(parts.required, vec![GenericNode::from(1), GenericNode::from(true)]);
        assert_eq!(parts.optional, vec![Some(GenericNode::from("s"))]);
        assert_eq!(parts.rest, vec![GenericNode::from(9)]);
        assert_eq!(IntNode::convert(parts.rest[0].clone()).unwrap(), IntNode::new(9));
    }
}
