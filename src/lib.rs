//!
//! A crate that builds decision trees with the ID3 algorithm.
//!
//! ID3 grows a tree top-down over discrete attributes.
//! Each node holds the training examples that reach it;
//! a node whose examples share one class becomes a leaf,
//! any other node splits on the attribute with the most
//! information gain, with one child per attribute value.
//!
//! - [`Schema`] and [`TrainingTable`] describe the training data.
//!     [`DataReader`] loads a C4.5 style `.data` file.
//! - [`Id3Builder`] grows a [`DecisionTree`].
//! - [`DecisionTree`] classifies attribute vectors
//!     and exports itself as XML or JSON.
//!
//! ```
//! use id3tree::prelude::*;
//!
//! let schema = Schema::car();
//! let rows = vec![
//!     vec![3, 0, 0, 2, 0, 0, 3], // low, vhigh, 2, more, small, low -> vgood
//!     vec![0, 0, 0, 0, 0, 0, 0], // vhigh, vhigh, 2, 2, small, low -> unacc
//! ];
//! let table = TrainingTable::new(&schema, rows).unwrap();
//! let tree = Id3Builder::new(&schema, &table).build().unwrap();
//!
//! assert_eq!(tree.predict(&[3, 0, 0, 2, 0, 0]), 3);
//! assert!(tree.check(&table).is_consistent());
//! let xml = tree.to_xml().unwrap();
//! assert!(xml.ends_with("</tree>"));
//! ```

pub mod error;
pub mod sample;
pub mod tree;
pub mod classifier;
pub mod prelude;


pub use error::{Id3Error, Result};

pub use sample::{
    Attribute,
    DataReader,
    Schema,
    TrainingTable,
};

pub use tree::{
    Consistency,
    DecisionTree,
    Id3Builder,
    Node,
    NodeId,
};

pub use classifier::Classifier;
