//! Top-down induction of an ID3 tree.
use rayon::prelude::*;

use std::collections::VecDeque;

use crate::error::{Id3Error, Result};
use crate::sample::{Schema, TrainingTable};
use super::dtree::DecisionTree;
use super::entropy::{entropy, Evaluator};
use super::node::*;


/// A struct that builds a [`DecisionTree`] with the ID3 algorithm.
/// `Id3Builder` keeps the training data and the parameters.
///
/// # Example
///
/// ```
/// use id3tree::{Id3Builder, Schema, TrainingTable};
///
/// let schema = Schema::car();
/// let rows = vec![
///     vec![3, 0, 0, 2, 0, 0, 3],
///     vec![0, 0, 0, 0, 0, 0, 0],
/// ];
/// let table = TrainingTable::new(&schema, rows).unwrap();
/// let tree = Id3Builder::new(&schema, &table)
///     .parallel(false)
///     .build()
///     .unwrap();
/// assert_eq!(tree.classify(&[3, 0, 0, 2, 0, 0]), 3);
/// ```
#[derive(Clone)]
pub struct Id3Builder<'a> {
    schema: &'a Schema,
    table: &'a TrainingTable,
    parallel: bool,
}


impl<'a> Id3Builder<'a> {
    /// Construct a new instance of [`Id3Builder`].
    /// Gains are evaluated in parallel by default.
    pub fn new(schema: &'a Schema, table: &'a TrainingTable) -> Self {
        Self { schema, table, parallel: true, }
    }


    /// Set whether the per-attribute gains are evaluated in parallel.
    /// The resulting tree does not depend on this flag.
    #[inline]
    pub fn parallel(mut self, flag: bool) -> Self {
        self.parallel = flag;
        self
    }


    /// Grow the tree until every leaf is pure.
    /// This method consumes `self`.
    ///
    /// Fails if the table is empty, if a row does not fit the schema
    /// (the table may have been built over another one),
    /// or if some node cannot be split any further.
    pub fn build(self) -> Result<DecisionTree> {
        if self.table.is_empty() { return Err(Id3Error::EmptyTable); }
        self.table.fits(self.schema)?;

        let id3 = Id3 {
            schema: self.schema,
            table: self.table,
            eval: Evaluator::new(self.schema, self.table),
            parallel: self.parallel,
        };
        let nodes = id3.grow()?;
        let tree = DecisionTree::from_raw(self.schema.clone(), nodes);

        tracing::info!(
            "grew a tree of {} nodes ({} leaves, depth {})",
            tree.len(), tree.n_leaves(), tree.depth()
        );
        Ok(tree)
    }
}


struct Id3<'a> {
    schema: &'a Schema,
    table: &'a TrainingTable,
    eval: Evaluator<'a>,
    parallel: bool,
}


impl Id3<'_> {
    /// Breadth-first construction over a work queue.
    /// Returns the arena; the root sits at index `0`.
    fn grow(&self) -> Result<Vec<Node>> {
        let all = (0..self.table.len()).collect::<Vec<usize>>();
        let root = self.node_with_most_gain(all, None, 0);

        let mut nodes = vec![root];
        let mut queue = VecDeque::from([NodeId(0)]);

        while let Some(id) = queue.pop_front() {
            // Leaves are finished.
            let Node::Internal(current) = &nodes[id.0] else { continue; };

            let attribute = current.attribute;
            let size = current.stats.chosen_ones.len();
            let buckets = self.eval.partition_by_attribute(
                &current.stats.chosen_ones[..], attribute
            );
            if buckets.iter().any(|bucket| bucket.len() == size) {
                return Err(Id3Error::Inseparable { attribute, size });
            }
            let fallback = majority(&current.stats.distribution[..]);

            let mut children = Vec::with_capacity(buckets.len());
            for bucket in buckets {
                let child = self.node_with_most_gain(bucket, Some(id), fallback);
                let child_id = NodeId(nodes.len());
                nodes.push(child);
                queue.push_back(child_id);
                children.push(child_id);
            }

            if let Node::Internal(current) = &mut nodes[id.0] {
                current.children = children;
            }
        }

        Ok(nodes)
    }


    /// Returns a leaf if `chosen_ones` is pure (or empty),
    /// otherwise an internal node splitting on the attribute
    /// with the most information gain.
    /// An empty subset predicts `fallback`.
    fn node_with_most_gain(
        &self,
        chosen_ones: Vec<usize>,
        parent: Option<NodeId>,
        fallback: usize,
    ) -> Node
    {
        let distribution = self.eval.class_distribution(&chosen_ones[..]);

        if chosen_ones.is_empty() {
            let stats = NodeStats {
                chosen_ones, distribution, entropy: 0.0, parent,
            };
            return Node::leaf(stats, fallback);
        }

        let entropy = entropy(&distribution[..], chosen_ones.len());
        if entropy == 0.0 {
            // Every example shares one class.
            let class = self.table.class_of(chosen_ones[0]);
            let stats = NodeStats { chosen_ones, distribution, entropy, parent };
            return Node::leaf(stats, class);
        }

        let (attribute, gain) = self.best_attribute(&chosen_ones[..], entropy);
        tracing::debug!(
            "split {} examples (entropy {entropy}) on attribute #{attribute} \
            (gain {gain})",
            chosen_ones.len(),
        );

        let domain_size = self.schema.domain_size(attribute);
        let stats = NodeStats { chosen_ones, distribution, entropy, parent };
        Node::internal(stats, attribute, domain_size)
    }


    /// Returns the first attribute with the strictly greatest gain.
    /// Falls back to attribute `0` if no gain is positive.
    fn best_attribute(&self, chosen_ones: &[usize], entropy: f64)
        -> (usize, f64)
    {
        let n_attributes = self.schema.n_attributes();
        let gain = |attribute| {
            self.eval.information_gain(chosen_ones, attribute, entropy)
        };
        let gains = if self.parallel {
            (0..n_attributes).into_par_iter()
                .map(gain)
                .collect::<Vec<f64>>()
        } else {
            (0..n_attributes).map(gain)
                .collect::<Vec<f64>>()
        };

        let mut best = 0;
        let mut best_gain = 0.0;
        for (attribute, gain) in gains.into_iter().enumerate() {
            if gain > best_gain {
                best = attribute;
                best_gain = gain;
            }
        }
        (best, best_gain)
    }
}


/// Returns the most frequent class, the lowest index on ties.
fn majority(distribution: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in distribution.iter().enumerate() {
        if count > distribution[best] { best = class; }
    }
    best
}
