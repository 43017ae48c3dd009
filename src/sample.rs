//! The data a tree learns from:
//! the class set, the attribute domains, and the integer training table.

// Provides the class set and attribute domains.
pub(crate) mod schema;
// Provides the validated training table.
pub(crate) mod table;

// Provides a struct that reads a `.data` file.
pub(crate) mod reader;


pub use schema::{Attribute, Schema};
pub use table::TrainingTable;
pub use reader::DataReader;
