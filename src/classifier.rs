//! The prediction interface shared by trained models.
use crate::sample::TrainingTable;


/// A trait that defines the behavior of a classifier
/// over discrete attribute vectors.
/// You only need to implement `predict` method.
pub trait Classifier {
    /// Predicts the class index of the given attribute vector.
    fn predict(&self, attributes: &[usize]) -> usize;


    /// Predicts the class index of every example in `table`.
    fn predict_all(&self, table: &TrainingTable) -> Vec<usize> {
        (0..table.len()).map(|i| self.predict(table.attributes_of(i)))
            .collect::<Vec<_>>()
    }
}
