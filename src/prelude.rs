//! Exports the data types, the builder, and the traits.
//!
pub use crate::sample::{
    // Training data ----------------------------
    Schema,
    TrainingTable,
    DataReader,
};


pub use crate::tree::{
    // ID3 --------------------------------------
    Id3Builder,
    DecisionTree,
    Consistency,
};


pub use crate::classifier::Classifier;
pub use crate::error::Id3Error;
