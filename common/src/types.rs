//! Extracted data types
//!
//! - FieldValue: one extracted value, or the empty marker with a reason
//! - ExtractedRow: all values extracted from one report file

use crate::layout::Stage;
use serde::Serialize;
use std::fmt;

/// Why a field came out empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissReason {
    /// The reports do not expose this field
    Unsourced,
    /// The sheet is missing or the file could not be read
    SheetUnavailable,
    /// The cell address does not resolve
    InvalidAddress,
    /// The cell lies outside the sheet's populated area
    OutOfRange,
    /// The cell exists but holds nothing
    BlankCell,
    /// No power consumption row on "Process Data"
    MarkerNotFound,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MissReason::Unsourced => "not sourced from any cell",
            MissReason::SheetUnavailable => "sheet unavailable",
            MissReason::InvalidAddress => "invalid cell address",
            MissReason::OutOfRange => "cell outside populated range",
            MissReason::BlankCell => "blank cell",
            MissReason::MarkerNotFound => "power consumption row not found",
        };
        f.write_str(label)
    }
}

/// A single extracted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldValue {
    Text(String),
    Missing(MissReason),
}

impl FieldValue {
    /// Rendered form written to the master table; every miss renders as ""
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Missing(_) => "",
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing(_))
    }

    pub fn miss_reason(&self) -> Option<MissReason> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Missing(reason) => Some(*reason),
        }
    }
}

impl From<Option<String>> for FieldValue {
    /// `None` and empty strings both become a blank cell
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) if !s.is_empty() => FieldValue::Text(s),
            _ => FieldValue::Missing(MissReason::BlankCell),
        }
    }
}

/// Values extracted from one report, in layout order
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedRow {
    stage: Stage,
    values: Vec<(String, FieldValue)>,
}

impl ExtractedRow {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            values: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Sets a field; a repeated name overwrites the earlier value in place
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|(_, v)| v.is_missing()).count()
    }
}
