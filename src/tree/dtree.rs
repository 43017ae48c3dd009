//! Defines the decision tree produced by ID3.
use serde::{Serialize, Deserialize};

use std::path::Path;
use std::fs;

use crate::Classifier;
use crate::error::{Id3Error, Result};
use crate::sample::Schema;
use super::node::*;


/// A finished ID3 tree.
/// The tree owns its nodes and a copy of the schema it was built over,
/// and is never modified after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    schema: Schema,
    nodes: Vec<Node>,
}


impl DecisionTree {
    /// The root is the first node of the arena.
    #[inline]
    pub(crate) fn from_raw(schema: Schema, nodes: Vec<Node>) -> Self {
        Self { schema, nodes }
    }


    /// Returns the schema this tree was built over.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }


    /// Returns the handle of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }


    /// Returns the node behind `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }


    /// Returns the children of `id`, indexed by domain value.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }


    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }


    /// A tree always has a root, so this is always `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }


    /// Iterates over the nodes in the order they were created.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }


    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| node.is_leaf())
            .count()
    }


    /// Returns the number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self.root(), 0_usize)];
        while let Some((id, d)) = stack.pop() {
            depth = depth.max(d);
            for &child in self.children(id) {
                stack.push((child, d + 1));
            }
        }
        depth
    }


    /// Returns the class index predicted for `attributes`.
    ///
    /// # Panics
    /// Panics if `attributes` is shorter than the attribute count,
    /// or routes through a value outside an attribute's domain.
    /// See [`DecisionTree::try_classify`] for a checked version.
    #[inline]
    pub fn classify(&self, attributes: &[usize]) -> usize {
        self.try_classify(attributes)
            .unwrap_or_else(|err| panic!("{err}"))
    }


    /// Returns the class index predicted for `attributes`,
    /// or an error if the vector cannot be routed through the tree.
    pub fn try_classify(&self, attributes: &[usize]) -> Result<usize> {
        let expected = self.schema.n_attributes();
        let got = attributes.len();
        if got < expected {
            return Err(Id3Error::VectorLength { expected, got });
        }

        let mut id = self.root();
        loop {
            match self.node(id) {
                Node::Leaf(leaf) => return Ok(leaf.class),
                Node::Internal(node) => {
                    let attribute = node.attribute;
                    let value = attributes[attribute];
                    let size = node.children.len();
                    id = *node.children.get(value)
                        .ok_or(Id3Error::OutOfDomain { attribute, value, size })?;
                },
            }
        }
    }


    /// Serializes the tree, schema included, to JSON.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json)
    }


    /// Restores a tree saved by [`DecisionTree::to_json`].
    /// The node links are checked before the tree is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let tree = serde_json::from_str::<Self>(json)?;
        tree.check_links()?;
        Ok(tree)
    }


    /// Writes the JSON form of the tree to `path`.
    pub fn to_json_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(|source| {
                let path = path.to_path_buf();
                Id3Error::Io { path, source }
            })
    }


    /// Reads a tree written by [`DecisionTree::to_json_file`].
    pub fn from_json_file<P>(path: P) -> Result<Self>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|source| {
                let path = path.to_path_buf();
                Id3Error::Io { path, source }
            })?;
        Self::from_json(&json)
    }


    /// Checks that every node counts each class of the schema,
    /// that every leaf predicts a known class,
    /// and that every internal node has one distinct in-range child
    /// per domain value pointing back to it.
    fn check_links(&self) -> Result<()> {
        let corrupted = |node: usize, reason: String| -> Result<()> {
            Err(Id3Error::CorruptedNode { node, reason })
        };

        if self.nodes.is_empty() {
            return corrupted(0, "the tree has no root".to_string());
        }
        if self.nodes[0].parent().is_some() {
            return corrupted(0, "the root has a parent".to_string());
        }

        let n_classes = self.schema.n_classes();
        let mut linked = vec![false; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if node.distribution().len() != n_classes {
                let reason = format!(
                    "has {} class counts for {n_classes} classes",
                    node.distribution().len()
                );
                return corrupted(i, reason);
            }

            let inner = match node {
                Node::Leaf(leaf) if leaf.class >= n_classes => {
                    let reason = format!("predicts class #{}", leaf.class);
                    return corrupted(i, reason);
                },
                Node::Leaf(_) => continue,
                Node::Internal(inner) => inner,
            };

            let n_attributes = self.schema.n_attributes();
            if inner.attribute >= n_attributes {
                let reason = format!("splits on attribute #{}", inner.attribute);
                return corrupted(i, reason);
            }
            let size = self.schema.domain_size(inner.attribute);
            if inner.children.len() != size {
                let reason = format!(
                    "has {} children for a domain of {size}",
                    inner.children.len()
                );
                return corrupted(i, reason);
            }
            for child in inner.children.iter() {
                let parent = self.nodes.get(child.0)
                    .and_then(Node::parent);
                if child.0 <= i || parent != Some(NodeId(i)) {
                    let reason = format!("has a dangling child {child:?}");
                    return corrupted(i, reason);
                }
                if std::mem::replace(&mut linked[child.0], true) {
                    let reason = format!("shares the child {child:?}");
                    return corrupted(i, reason);
                }
            }
        }
        Ok(())
    }
}


impl Classifier for DecisionTree {
    #[inline]
    fn predict(&self, attributes: &[usize]) -> usize {
        self.classify(attributes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Id3Builder, TrainingTable};

    fn tree() -> DecisionTree {
        let schema = Schema::car();
        let rows = vec![
            vec![3, 0, 0, 2, 0, 0, 3],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![2, 1, 1, 1, 1, 1, 1],
        ];
        let table = TrainingTable::new(&schema, rows).unwrap();
        Id3Builder::new(&schema, &table).build().unwrap()
    }

    #[test]
    fn test_try_classify_errors() {
        let tree = tree();
        let res = tree.try_classify(&[0, 0]);
        assert!(matches!(
            res,
            Err(Id3Error::VectorLength { expected: 6, got: 2 })
        ));

        let res = tree.try_classify(&[9, 0, 0, 0, 0, 0]);
        assert!(matches!(res, Err(Id3Error::OutOfDomain { value: 9, .. })));
    }

    #[test]
    #[should_panic]
    fn test_classify_panics_out_of_domain() {
        tree().classify(&[9, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shape() {
        let tree = tree();
        // The root splits on `buying`; three of its four children are pure,
        // the fourth is empty.
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.n_leaves(), 4);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.children(tree.root()).len(), 4);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let tree = tree();
        let json = tree.to_json().unwrap();
        let restored = DecisionTree::from_json(&json).unwrap();
        assert_eq!(tree, restored);
    }

    #[test]
    fn test_reject_dangling_child() {
        let mut tree = tree();
        if let Node::Internal(root) = &mut tree.nodes[0] {
            root.children[1] = NodeId(42);
        }
        let json = tree.to_json().unwrap();
        let res = DecisionTree::from_json(&json);
        assert!(matches!(res, Err(Id3Error::CorruptedNode { node: 0, .. })));
    }

    #[test]
    fn test_reject_shared_child() {
        let mut tree = tree();
        if let Node::Internal(root) = &mut tree.nodes[0] {
            root.children[0] = root.children[3];
        }
        let json = tree.to_json().unwrap();
        let res = DecisionTree::from_json(&json);
        assert!(matches!(res, Err(Id3Error::CorruptedNode { node: 0, .. })));
    }

    #[test]
    fn test_reject_unknown_class() {
        let mut tree = tree();
        if let Node::Leaf(leaf) = &mut tree.nodes[1] {
            leaf.class = 99;
        }
        let json = tree.to_json().unwrap();
        let res = DecisionTree::from_json(&json);
        assert!(matches!(res, Err(Id3Error::CorruptedNode { node: 1, .. })));

        // The XML export reports the same node instead of panicking.
        let err = tree.to_xml().unwrap_err();
        assert!(matches!(err, Id3Error::CorruptedNode { node: 1, .. }));
    }

    #[test]
    fn test_reject_short_distribution() {
        let mut tree = tree();
        match &mut tree.nodes[2] {
            Node::Leaf(leaf) => leaf.stats.distribution = vec![0],
            Node::Internal(node) => node.stats.distribution = vec![0],
        }
        let json = tree.to_json().unwrap();
        let res = DecisionTree::from_json(&json);
        assert!(matches!(res, Err(Id3Error::CorruptedNode { node: 2, .. })));
    }
}
