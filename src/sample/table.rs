use crate::error::{Id3Error, Result};
use super::schema::Schema;


/// A rectangular table of training examples.
/// Each row holds one domain value index per attribute,
/// followed by the class index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingTable {
    rows: Vec<Vec<usize>>,
    n_attributes: usize,
}


impl TrainingTable {
    /// Construct a new table after checking every row against `schema`.
    pub fn new(schema: &Schema, rows: Vec<Vec<usize>>) -> Result<Self> {
        check_rows(schema, &rows[..])?;
        let n_attributes = schema.n_attributes();
        Ok(Self { rows, n_attributes })
    }


    /// Checks that every row fits `schema`:
    /// one in-domain value per attribute and a known class.
    /// A table built over one schema may not fit another.
    pub fn fits(&self, schema: &Schema) -> Result<()> {
        check_rows(schema, &self.rows[..])
    }


    /// Returns the number of examples.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Returns `true` if the table has no example.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }


    /// Returns the number of attribute columns.
    #[inline]
    pub fn n_attributes(&self) -> usize {
        self.n_attributes
    }


    /// Returns the `i`'th row, class column included.
    #[inline]
    pub fn row(&self, i: usize) -> &[usize] {
        &self.rows[i][..]
    }


    /// Returns the attribute values of the `i`'th example.
    #[inline]
    pub fn attributes_of(&self, i: usize) -> &[usize] {
        &self.rows[i][..self.n_attributes]
    }


    /// Returns the value of `attribute` for the `i`'th example.
    #[inline]
    pub fn value(&self, i: usize, attribute: usize) -> usize {
        self.rows[i][attribute]
    }


    /// Returns the class index of the `i`'th example.
    #[inline]
    pub fn class_of(&self, i: usize) -> usize {
        self.rows[i][self.n_attributes]
    }


    /// Iterates over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.rows.iter().map(|row| &row[..])
    }
}


/// Returns the first row that does not fit `schema`, as an error.
fn check_rows(schema: &Schema, rows: &[Vec<usize>]) -> Result<()> {
    let n_attributes = schema.n_attributes();
    let expected = n_attributes + 1;

    for (row, example) in rows.iter().enumerate() {
        if example.len() != expected {
            let got = example.len();
            return Err(Id3Error::RowShape { row, expected, got });
        }

        let (values, class) = example.split_at(n_attributes);
        for (column, &value) in values.iter().enumerate() {
            let size = schema.domain_size(column);
            if value >= size {
                return Err(Id3Error::RowValue { row, column, value, size });
            }
        }

        let size = schema.n_classes();
        if class[0] >= size {
            let value = class[0];
            return Err(Id3Error::RowValue {
                row, column: n_attributes, value, size,
            });
        }
    }

    Ok(())
}
