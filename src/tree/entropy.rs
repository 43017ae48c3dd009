//! Entropy and information gain over index subsets of a training table.
use crate::sample::{Schema, TrainingTable};


/// Returns the entropy of a class distribution whose counts sum to `total`,
/// normalized by the logarithm of the number of classes
/// so that the result lies in `[0, 1]`.
/// The number of classes is `distribution.len()`.
///
/// `total` must be positive.
#[inline]
pub fn entropy(distribution: &[usize], total: usize) -> f64 {
    debug_assert!(total > 0, "entropy of an empty subset is undefined");

    let n_classes = distribution.len();
    // A single class makes every subset pure.
    if n_classes <= 1 { return 0.0; }

    let base = (n_classes as f64).ln();
    let mut result = 0.0;
    for &count in distribution {
        let p = count as f64 / total as f64;
        if p != 0.0 {
            result -= p * p.ln() / base;
        }
    }
    result
}


/// Computes class distributions, entropy, and information gain
/// for subsets of a training table.
#[derive(Clone, Copy)]
pub struct Evaluator<'a> {
    schema: &'a Schema,
    table: &'a TrainingTable,
}


impl<'a> Evaluator<'a> {
    /// Construct a new evaluator over `table`.
    #[inline]
    pub fn new(schema: &'a Schema, table: &'a TrainingTable) -> Self {
        Self { schema, table }
    }


    /// Returns the histogram of class indices over `subset`.
    pub fn class_distribution(&self, subset: &[usize]) -> Vec<usize> {
        let mut distribution = vec![0_usize; self.schema.n_classes()];
        for &i in subset {
            distribution[self.table.class_of(i)] += 1;
        }
        distribution
    }


    /// Returns the entropy of the examples in `subset`.
    #[inline]
    pub fn entropy_of(&self, subset: &[usize]) -> f64 {
        let distribution = self.class_distribution(subset);
        entropy(&distribution[..], subset.len())
    }


    /// Separates `subset` by the value of `attribute`.
    /// The `v`'th bucket holds the examples taking the `v`'th value,
    /// in their original order. Buckets may be empty.
    pub fn partition_by_attribute(&self, subset: &[usize], attribute: usize)
        -> Vec<Vec<usize>>
    {
        let mut buckets = vec![Vec::new(); self.schema.domain_size(attribute)];
        for &i in subset {
            buckets[self.table.value(i, attribute)].push(i);
        }
        buckets
    }


    /// Returns the information gain of splitting `subset` on `attribute`.
    /// `entropy_of_subset` must be the entropy of `subset`.
    pub fn information_gain(
        &self,
        subset: &[usize],
        attribute: usize,
        entropy_of_subset: f64,
    ) -> f64
    {
        let size = subset.len() as f64;
        let mut gain = entropy_of_subset;
        for bucket in self.partition_by_attribute(subset, attribute) {
            // An empty bucket carries no weight.
            if bucket.is_empty() { continue; }

            let weight = bucket.len() as f64 / size;
            gain -= weight * self.entropy_of(&bucket[..]);
        }
        gain
    }
}
