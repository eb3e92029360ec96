//! Master table
//!
//! Append-only table of extracted rows persisted as CSV. All values are
//! untyped text. The column set starts with the fixed layout columns;
//! columns from a previous run that are not part of that set are kept
//! after them in their original order.

use crate::error::Result;
use ro_harvest_common::ExtractedRow;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MasterTable {
    /// Empty table with just the fixed columns
    pub fn new(fixed_columns: &[&str]) -> Self {
        Self {
            columns: fixed_columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Loads `path` if it exists, otherwise starts empty
    pub fn load_or_new(path: &Path, fixed_columns: &[&str]) -> Result<Self> {
        if path.exists() {
            let file = std::fs::File::open(path)?;
            Self::from_reader(file, fixed_columns)
        } else {
            Ok(Self::new(fixed_columns))
        }
    }

    /// Reads a CSV with a header row and brings its columns into fixed order.
    ///
    /// Fixed columns missing from the file are added empty for every
    /// existing row. Every other file column is kept by position, with
    /// empty or repeated header names made unique.
    pub fn from_reader<R: Read>(reader: R, fixed_columns: &[&str]) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = unique_names(csv_reader.headers()?.iter());

        // fixed columns first, then every other file column in file order;
        // each output column remembers its position in the file
        let mut columns: Vec<String> = fixed_columns.iter().map(|c| c.to_string()).collect();
        let mut sources: Vec<Option<usize>> = columns
            .iter()
            .map(|c| header.iter().position(|h| h == c))
            .collect();
        for (index, name) in header.iter().enumerate() {
            if !sources.contains(&Some(index)) {
                columns.push(name.clone());
                sources.push(Some(index));
            }
        }

        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            if record.len() > header.len() {
                tracing::warn!(
                    "master table row {} has {} fields, header has {}; extra fields dropped",
                    line + 2,
                    record.len(),
                    header.len()
                );
            }
            let row = sources
                .iter()
                .map(|src| {
                    src.and_then(|i| record.get(i))
                        .unwrap_or_default()
                        .to_string()
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `index`
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(index)?.get(col).map(String::as_str)
    }

    /// Appends one row; columns the row does not provide stay empty and
    /// fields without a column are ignored
    pub fn append(&mut self, extracted: &ExtractedRow) {
        let mut row = vec![String::new(); self.columns.len()];
        for (name, value) in extracted.iter() {
            if let Some(col) = self.columns.iter().position(|c| c == name) {
                row[col] = value.as_str().to_string();
            }
        }
        self.rows.push(row);
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Overwrites `path` with the whole table
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}

/// Header names made unique the way pandas reads them back: an empty
/// name becomes `Unnamed: <position>`, a repeat becomes `<name>.1`, `<name>.2`...
fn unique_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (index, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}
