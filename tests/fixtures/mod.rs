//! Fixture report workbooks
//!
//! Builds .xlsx files shaped like simulation exports: a "Results Summary"
//! sheet with the stage table at A23.., plus "Process Data" and
//! "Input Data Summary".

#![allow(dead_code)]

use ro_harvest_common::layout::{
    Extraction, LayoutMapping, Stage, INPUT_DATA_SUMMARY, PROCESS_DATA, RESULTS_SUMMARY,
};
use ro_harvest_common::CellRef;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Value written to `field` in a report of `stage`
pub fn expected_value(stage: Stage, field: &str) -> String {
    match field {
        "Pass Stage" => "1".to_string(),
        _ => format!("s{} {}", stage.number(), field),
    }
}

/// Specific energy written to row 53 of "Process Data"
pub fn expected_energy(stage: Stage) -> String {
    format!("0.{}5", stage.number())
}

fn put(sheet: &mut Worksheet, address: &str, value: &str) {
    let cell: CellRef = address.parse().unwrap();
    sheet.write_string(cell.row, cell.col as u16, value).unwrap();
}

fn put_number(sheet: &mut Worksheet, address: &str, value: f64) {
    let cell: CellRef = address.parse().unwrap();
    sheet.write_number(cell.row, cell.col as u16, value).unwrap();
}

/// Writes a complete report for `stage` with every mapped cell filled
pub fn write_report(path: &Path, stage: Stage) {
    let layout = LayoutMapping::for_stage(stage);
    let mut workbook = Workbook::new();

    for sheet_name in [RESULTS_SUMMARY, PROCESS_DATA, INPUT_DATA_SUMMARY] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();

        for entry in layout.entries() {
            if entry.extraction != Extraction::Cell || entry.sheet != Some(sheet_name) {
                continue;
            }
            let address = entry.cell.as_deref().unwrap();
            put(sheet, address, &expected_value(stage, entry.field));
        }

        if sheet_name == RESULTS_SUMMARY {
            // stage table: one numbered row per stage
            for n in 1..=stage.number() {
                put_number(sheet, &format!("A{}", 22 + u32::from(n)), f64::from(n));
            }
        }

        if sheet_name == PROCESS_DATA {
            put(sheet, "A47", "High Pressure Pump");
            put(sheet, "A53", "Total Power Consumption");
            put(sheet, "E53", &expected_energy(stage));
        }
    }

    workbook.save(path).unwrap();
}

/// Writes a workbook whose stage table holds no recognizable marker
pub fn write_unmarked_report(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(RESULTS_SUMMARY).unwrap();
    put(sheet, "C5", "120");
    put(sheet, "A23", "Stage");
    put(sheet, "A24", "x");
    workbook.save(path).unwrap();
}

/// Writes a workbook whose only sheet has an unrelated name
pub fn write_wrong_sheet_report(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary").unwrap();
    put_number(sheet, "A25", 3.0);
    workbook.save(path).unwrap();
}
