//! Uniformly typed lists

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{GenericNode, Node, NodeShape};
use crate::error::{ConvertError, ConvertErrorKind};
use crate::location::SourceSpan;

/// The list case of the generic tree.
pub type GenericListNode = ListNode<GenericNode>;

/// A list whose every item converts to `T`.
#[derive(Clone, Debug)]
pub struct ListNode<T> {
    items: Vec<T>,
    location: Option<SourceSpan>,
}

impl<T> ListNode<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            location: None,
        }
    }

    pub fn located(items: Vec<T>, location: SourceSpan) -> Self {
        Self {
            items,
            location: Some(location),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn with_location(self, location: impl Into<Option<SourceSpan>>) -> Self {
        Self {
            location: location.into(),
            ..self
        }
    }
}

impl<T: Node> ListNode<T> {
    /// Convert each value through `T`.
    pub fn from_values<I, V>(values: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = V>,
        V: Into<GenericNode>,
    {
        let items = values
            .into_iter()
            .map(|v| T::convert(v.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items))
    }
}

impl<T: Node> Node for ListNode<T> {
    fn convert(node: GenericNode) -> Result<Self, ConvertError> {
        match node {
            GenericNode::List(list) => {
                let location = list.location;
                let items = list
                    .items
                    .into_iter()
                    .map(T::convert)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self { items, location })
            }
            other => Err(ConvertError::new(
                ConvertErrorKind::ExpectedList,
                other.location().cloned(),
            )),
        }
    }

    fn to_generic(&self) -> GenericNode {
        GenericNode::List(ListNode {
            items: self.items.iter().map(Node::to_generic).collect(),
            location: self.location.clone(),
        })
    }

    fn location(&self) -> Option<&SourceSpan> {
        self.location.as_ref()
    }

    fn shape() -> NodeShape {
        NodeShape::List
    }
}

impl<T: fmt::Display> fmt::Display for ListNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str(")")
    }
}

impl<T: PartialEq> PartialEq for ListNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for ListNode<T> {}

impl<T: Ord> PartialOrd for ListNode<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for ListNode<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.items.cmp(&other.items)
    }
}

impl<T: Hash> Hash for ListNode<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BoolNode, IntNode, NilNode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generic_list() {
        let a = GenericListNode::new(vec![
            NilNode::nil().into(),
            BoolNode::new(true).into(),
            GenericListNode::new(vec![]).into(),
            IntNode::new(123).into(),
        ]);
        assert_eq!(a.to_string(), "(@nil @true () 123)");
        let b = GenericNode::from(vec![
            GenericNode::from(()),
            GenericNode::from(true),
            GenericNode::from(Vec::<GenericNode>::new()),
            GenericNode::from(123),
        ]);
        assert_eq!(GenericNode::List(a), b);
    }

    #[test]
    fn test_typed_list() {
        let list = ListNode::<IntNode>::from_values([1, 2, 3]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[1], IntNode::new(2));
        assert_eq!(list.to_string(), "(1 2 3)");
        assert!(ListNode::<IntNode>::from_values([GenericNode::from(true)]).is_err());
    }

    #[test]
    fn test_non_list_rejected() {
        let err = GenericListNode::from_value("abc").unwrap_err();
        assert_eq!(err.kind, ConvertErrorKind::ExpectedList);
        assert!(GenericListNode::from_value(123).is_err());
        assert!(GenericListNode::from_value(()).is_err());
    }

    #[test]
    fn test_convert_keeps_location() {
        let span = SourceSpan::new("f", 1, 1, 1, 5);
        let generic = GenericNode::from(vec![1, 2]).with_location(span.clone());
        let list = ListNode::<IntNode>::convert(generic).unwrap();
        assert_eq!(list.location(), Some(&span));
        assert_eq!(list.to_generic().location(), Some(&span));
    }
}
