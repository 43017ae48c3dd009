//! Defines the nodes of an ID3 tree.
//! Nodes live in an arena owned by the tree
//! and refer to each other by [`NodeId`].
use serde::{Serialize, Deserialize};

use std::fmt;


/// A handle to a node in the arena of a tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub(crate) usize);


impl NodeId {
    /// Returns the position of the node in the arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}


impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


/// The training statistics shared by both kinds of node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    // Indices of the training examples reaching this node.
    pub(crate) chosen_ones: Vec<usize>,
    // Class histogram over `chosen_ones`.
    pub(crate) distribution: Vec<usize>,
    pub(crate) entropy: f64,
    // `None` only for the root.
    pub(crate) parent: Option<NodeId>,
}


/// A node that splits on one attribute.
/// It has one child per value of that attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalNode {
    pub(crate) stats: NodeStats,
    pub(crate) attribute: usize,
    pub(crate) children: Vec<NodeId>,
}


/// A node that predicts a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(crate) stats: NodeStats,
    pub(crate) class: usize,
}


impl InternalNode {
    /// Returns the attribute this node splits on.
    #[inline]
    pub fn attribute(&self) -> usize {
        self.attribute
    }


    /// Returns the children, indexed by domain value.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children[..]
    }
}


impl LeafNode {
    /// Returns the predicted class index.
    #[inline]
    pub fn class(&self) -> usize {
        self.class
    }
}


/// Enumeration of `InternalNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that has children.
    Internal(InternalNode),


    /// A node that has no child.
    Leaf(LeafNode),
}


impl Node {
    /// Construct a leaf node.
    #[inline]
    pub(crate) fn leaf(stats: NodeStats, class: usize) -> Self {
        Self::Leaf(LeafNode { stats, class })
    }


    /// Construct an internal node whose children are not attached yet.
    #[inline]
    pub(crate) fn internal(
        stats: NodeStats,
        attribute: usize,
        domain_size: usize,
    ) -> Self
    {
        let children = Vec::with_capacity(domain_size);
        Self::Internal(InternalNode { stats, attribute, children })
    }


    /// Returns the training statistics of this node.
    #[inline]
    pub fn stats(&self) -> &NodeStats {
        match self {
            Self::Internal(node) => &node.stats,
            Self::Leaf(node) => &node.stats,
        }
    }


    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }


    /// Returns the parent, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.stats().parent
    }


    #[inline]
    pub fn entropy(&self) -> f64 {
        self.stats().entropy
    }


    /// Returns the class histogram of the examples reaching this node.
    #[inline]
    pub fn distribution(&self) -> &[usize] {
        &self.stats().distribution[..]
    }


    /// Returns the indices of the examples reaching this node.
    #[inline]
    pub fn chosen_ones(&self) -> &[usize] {
        &self.stats().chosen_ones[..]
    }


    /// Returns the children, or an empty slice for a leaf.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Internal(node) => node.children(),
            Self::Leaf(_) => &[],
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stats(chosen_ones: Vec<usize>, distribution: Vec<usize>) -> NodeStats {
        NodeStats {
            chosen_ones,
            distribution,
            entropy: 0.0,
            parent: Some(NodeId(0)),
        }
    }

    #[test]
    fn test_leaf_accessors() {
        let node = Node::leaf(stats(vec![1, 4], vec![0, 2]), 1);
        assert!(node.is_leaf());
        assert_eq!(node.chosen_ones(), &[1, 4]);
        assert_eq!(node.distribution(), &[0, 2]);
        assert_eq!(node.parent(), Some(NodeId(0)));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_internal_starts_without_children() {
        let node = Node::internal(stats(vec![0, 1], vec![1, 1]), 2, 3);
        assert!(!node.is_leaf());
        assert!(node.children().is_empty());
        match node {
            Node::Internal(inner) => {
                assert_eq!(inner.attribute(), 2);
                assert!(inner.children.capacity() >= 3);
            },
            Node::Leaf(_) => panic!("expected an internal node"),
        }
    }
}
