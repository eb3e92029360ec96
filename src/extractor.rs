//! Field extraction
//!
//! Every failure is absorbed into the empty marker for that one field;
//! extracting a file never fails as a whole.

use crate::workbook::{cell_text, render_cell, SheetSource};
use calamine::Data;
use ro_harvest_common::layout::{
    Extraction, FieldMapping, LayoutMapping, POWER_SCAN_LABEL, POWER_SCAN_LABEL_COL,
    POWER_SCAN_ROWS, POWER_SCAN_VALUE_COL, PROCESS_DATA,
};
use ro_harvest_common::{cell_to_index, ExtractedRow, FieldValue, MissReason};

/// Extracts one value per field of `layout` from `source`
pub fn extract_fields(source: &mut dyn SheetSource, layout: &LayoutMapping) -> ExtractedRow {
    let label = source.label();
    let mut row = ExtractedRow::new(layout.stage());

    for mapping in layout.entries() {
        let value = extract_field(source, mapping);
        if let FieldValue::Missing(reason) = &value {
            tracing::debug!("{}: {} empty ({})", label, mapping.field, reason);
        }
        row.insert(mapping.field, value);
    }

    row
}

/// Extracts a single field
pub fn extract_field(source: &mut dyn SheetSource, mapping: &FieldMapping) -> FieldValue {
    match mapping.extraction {
        Extraction::PowerScan => specific_energy(source),
        Extraction::Unsourced => FieldValue::Missing(MissReason::Unsourced),
        Extraction::Cell => match (mapping.sheet, mapping.cell.as_deref()) {
            (Some(sheet), Some(cell)) => read_cell(source, sheet, cell),
            _ => FieldValue::Missing(MissReason::Unsourced),
        },
    }
}

fn read_cell(source: &mut dyn SheetSource, sheet: &str, cell: &str) -> FieldValue {
    let range = match source.sheet(sheet) {
        Ok(range) => range,
        Err(_) => return FieldValue::Missing(MissReason::SheetUnavailable),
    };
    let (row, col) = match cell_to_index(cell) {
        Some(position) => position,
        None => return FieldValue::Missing(MissReason::InvalidAddress),
    };

    match range.get_value((row, col)) {
        None => FieldValue::Missing(MissReason::OutOfRange),
        Some(data) => FieldValue::from(render_cell(data)),
    }
}

/// Finds "Total Power Consumption" in column A of rows 47, 53 or 59 of
/// "Process Data" and returns column E of the first matching row
fn specific_energy(source: &mut dyn SheetSource) -> FieldValue {
    let range = match source.sheet(PROCESS_DATA) {
        Ok(range) => range,
        Err(_) => return FieldValue::Missing(MissReason::SheetUnavailable),
    };

    for row_number in POWER_SCAN_ROWS {
        let row = row_number - 1;
        if cell_text(range, (row, POWER_SCAN_LABEL_COL)).as_deref() == Some(POWER_SCAN_LABEL) {
            let value = range
                .get_value((row, POWER_SCAN_VALUE_COL))
                .unwrap_or(&Data::Empty);
            return FieldValue::from(render_cell(value));
        }
    }

    FieldValue::Missing(MissReason::MarkerNotFound)
}
