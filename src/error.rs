//! Errors reported while building, loading, or exporting a tree.
use std::path::PathBuf;
use thiserror::Error;


/// A shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Id3Error>;


/// Every failure this crate can report.
#[derive(Debug, Error)]
pub enum Id3Error {
    /// The schema has no class label.
    #[error("The schema must have at least one class")]
    NoClass,

    /// The schema has no attribute.
    #[error("The schema must have at least one attribute")]
    NoAttribute,

    /// An attribute has no domain value.
    #[error("Attribute #{attribute} has an empty domain")]
    EmptyDomain { attribute: usize },

    /// A value appears twice in one domain.
    #[error("Attribute #{attribute} lists the value \"{value}\" twice")]
    DuplicateValue { attribute: usize, value: String },

    /// A class label appears twice.
    #[error("The class \"{label}\" is listed twice")]
    DuplicateClass { label: String },

    /// The number of attribute names does not match the schema.
    #[error("Expected {expected} attribute names, got {got}")]
    NameCount { expected: usize, got: usize },

    /// A training row has the wrong number of columns.
    #[error("Row {row} has {got} columns, expected {expected}")]
    RowShape { row: usize, expected: usize, got: usize },

    /// A training row holds an index outside its domain.
    #[error("Row {row}, column {column}: index {value} is out of range (size {size})")]
    RowValue { row: usize, column: usize, value: usize, size: usize },

    /// A line of a `.data` file cannot be mapped onto the schema.
    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// Reading or writing a file failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading from a non-file source failed.
    #[error(transparent)]
    Read(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// There is nothing to learn from.
    #[error("The training table is empty")]
    EmptyTable,

    /// The split chosen at a node sends every example down one branch,
    /// so growing the tree would not terminate.
    #[error(
        "The split on attribute #{attribute} leaves all {size} examples \
        in one branch"
    )]
    Inseparable { attribute: usize, size: usize },

    /// A node's class distribution disagrees with its subset.
    #[error("Node #{node} is corrupted: {reason}")]
    CorruptedNode { node: usize, reason: String },

    /// The XML export needs attribute names.
    #[error("The schema has no attribute names; XML export needs them")]
    MissingAttributeNames,

    /// An attribute vector is shorter than the attribute count.
    #[error("Expected {expected} attribute values, got {got}")]
    VectorLength { expected: usize, got: usize },

    /// An attribute vector cannot be routed through the tree.
    #[error("Attribute #{attribute} has no value index {value} (size {size})")]
    OutOfDomain { attribute: usize, value: usize, size: usize },
}
