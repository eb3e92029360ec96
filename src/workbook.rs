//! Workbook access
//!
//! Sheets are read through calamine (`.xls` via the BIFF reader, `.xlsx`
//! via the OOXML reader, chosen by extension) and exposed as an unlabeled
//! grid addressed by absolute zero-based `(row, column)`.

use crate::error::{HarvestError, Result};
use calamine::{open_workbook, open_workbook_auto, Data, Range, Reader, Sheets, Xls, Xlsx};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Source of sheet grids for one report file
pub trait SheetSource {
    /// Label used in diagnostics (usually the file path)
    fn label(&self) -> String;

    /// Returns the named sheet, or why it cannot be read
    fn sheet(&mut self, name: &str) -> Result<&Range<Data>>;
}

/// A report file on disk with a per-file cache of parsed sheets.
///
/// Each first access to a sheet opens the file, parses that sheet and drops
/// the handle. Failures are cached too, so a missing sheet is only looked up
/// once per file.
pub struct WorkbookFile {
    path: PathBuf,
    sheets: HashMap<String, std::result::Result<Range<Data>, String>>,
}

impl WorkbookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheets: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path, name: &str) -> std::result::Result<Range<Data>, String> {
        let mut workbook = open_report(path)?;
        workbook.worksheet_range(name).map_err(|e| e.to_string())
    }
}

impl SheetSource for WorkbookFile {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn sheet(&mut self, name: &str) -> Result<&Range<Data>> {
        let path = &self.path;
        let entry = self
            .sheets
            .entry(name.to_string())
            .or_insert_with(|| Self::load(path, name));

        entry.as_ref().map_err(|reason| HarvestError::SheetUnavailable {
            sheet: name.to_string(),
            reason: reason.clone(),
        })
    }
}

/// Opens a workbook, picking the decoder from the extension in any letter case
fn open_report(path: &Path) -> std::result::Result<Sheets<BufReader<File>>, String> {
    // file name suffix rather than `extension()`, so `.xlsx` itself is decoded
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if name.ends_with(".xls") {
        open_workbook::<Xls<_>, _>(path)
            .map(Sheets::Xls)
            .map_err(|e| e.to_string())
    } else if name.ends_with(".xlsx") {
        open_workbook::<Xlsx<_>, _>(path)
            .map(Sheets::Xlsx)
            .map_err(|e| e.to_string())
    } else {
        open_workbook_auto(path).map_err(|e| e.to_string())
    }
}

/// In-memory sheets, for callers that already hold parsed grids
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    name: String,
    sheets: HashMap<String, Range<Data>>,
}

impl MemoryWorkbook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheets: HashMap::new(),
        }
    }

    /// Adds a sheet built from `(A1 address, value)` pairs
    pub fn with_cells(mut self, sheet: &str, cells: &[(&str, Data)]) -> Result<Self> {
        let mut range = Range::new((0, 0), (0, 0));
        for (address, value) in cells {
            let cell: ro_harvest_common::CellRef = address.parse()?;
            range.set_value(cell.position(), value.clone());
        }
        self.sheets.insert(sheet.to_string(), range);
        Ok(self)
    }
}

impl SheetSource for MemoryWorkbook {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn sheet(&mut self, name: &str) -> Result<&Range<Data>> {
        self.sheets
            .get(name)
            .ok_or_else(|| HarvestError::SheetUnavailable {
                sheet: name.to_string(),
                reason: "no such sheet".into(),
            })
    }
}

/// Raw cell content as text; `None` for blank cells
pub fn render_cell(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(render_float(*f)),
        Data::Bool(true) => Some("True".into()),
        Data::Bool(false) => Some("False".into()),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => render_float(dt.as_f64()),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(e.to_string()),
    }
}

/// Integral values print without a fractional part ("3", not "3.0")
fn render_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Reads one cell from a grid as text, trimmed of surrounding whitespace
pub fn cell_text(range: &Range<Data>, position: (u32, u32)) -> Option<String> {
    range
        .get_value(position)
        .and_then(render_cell)
        .map(|s| s.trim().to_string())
}
