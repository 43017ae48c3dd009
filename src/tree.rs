//! The ID3 decision tree:
//! entropy and gain, the node arena, the builder,
//! classification, and the XML export.

/// Entropy and information gain.
pub mod entropy;
/// Defines the nodes of the tree.
pub mod node;
/// Defines the tree and its classification.
pub mod dtree;

mod builder;
mod xml;
mod consistency;


pub use builder::Id3Builder;
pub use consistency::Consistency;
pub use dtree::DecisionTree;
pub use entropy::{entropy, Evaluator};
pub use node::{InternalNode, LeafNode, Node, NodeId, NodeStats};
