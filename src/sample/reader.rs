use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::{Id3Error, Result};
use super::schema::Schema;
use super::table::TrainingTable;


/// A struct that reads a C4.5 style `.data` file into a [`TrainingTable`].
/// Each line holds the attribute values as category strings,
/// followed by the class label, separated by commas.
///
/// # Example
/// ```no_run
/// use id3tree::{DataReader, Schema};
/// let schema = Schema::car();
/// let table = DataReader::default()
///     .file("car.data")
///     .read(&schema)
///     .unwrap();
/// ```
#[derive(Default)]
pub struct DataReader<P> {
    file: Option<P>,
    skip_malformed: bool,
}


impl<P> DataReader<P> {
    /// Set the flag whether malformed lines are skipped or rejected.
    /// Default is `false`, so a malformed line fails the read.
    pub fn skip_malformed(mut self, flag: bool) -> Self {
        self.skip_malformed = flag;
        self
    }


    /// Reads every line of `reader`.
    pub fn read_from<R>(&self, reader: R, schema: &Schema)
        -> Result<TrainingTable>
        where R: BufRead,
    {
        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }

            match parse_line(&line, schema) {
                Ok(row) => { rows.push(row); },
                Err(reason) if self.skip_malformed => {
                    tracing::warn!("skipping line {}: {reason}", i + 1);
                },
                Err(reason) => {
                    return Err(Id3Error::MalformedLine { line: i + 1, reason });
                },
            }
        }

        tracing::debug!("read {} examples", rows.len());
        TrainingTable::new(schema, rows)
    }
}


impl<P> DataReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file set by [`DataReader::file`].
    pub fn read(&self, schema: &Schema) -> Result<TrainingTable> {
        let path: &Path = self.file.as_ref()
            .expect("The file name for the `.data` file is not set")
            .as_ref();

        let file = File::open(path)
            .map_err(|source| {
                let path = path.to_path_buf();
                Id3Error::Io { path, source }
            })?;
        self.read_from(BufReader::new(file), schema)
    }
}


/// Maps one line onto domain value indices and a trailing class index.
fn parse_line(line: &str, schema: &Schema)
    -> std::result::Result<Vec<usize>, String>
{
    let keys = line.split(',')
        .map(str::trim)
        .collect::<Vec<_>>();

    let n_attributes = schema.n_attributes();
    if keys.len() != n_attributes + 1 {
        return Err(format!(
            "expected {} fields, got {}", n_attributes + 1, keys.len()
        ));
    }

    let mut row = Vec::with_capacity(keys.len());
    for (attribute, key) in keys[..n_attributes].iter().enumerate() {
        let value = schema.value_index(attribute, key)
            .ok_or_else(|| {
                format!("unknown value \"{key}\" for attribute #{attribute}")
            })?;
        row.push(value);
    }

    let label = keys[n_attributes];
    let class = schema.class_index(label)
        .ok_or_else(|| format!("unknown class \"{label}\""))?;
    row.push(class);

    Ok(row)
}
