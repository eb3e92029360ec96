//! Stage layout registry
//!
//! Every report carries the same 84 fields. Which cell holds a field depends
//! on the number of stages in the simulation: the stage table on
//! "Results Summary" grows by one row per stage, pushing everything below it
//! down. Fields above the table (and those on other sheets) never move.
//!
//! Layouts are generated from a single base table (the stage 1 addresses)
//! plus that row shift, so the three variants cannot drift apart.

use crate::cell_ref::CellRef;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

pub const RESULTS_SUMMARY: &str = "Results Summary";
pub const PROCESS_DATA: &str = "Process Data";
pub const INPUT_DATA_SUMMARY: &str = "Input Data Summary";

/// Field filled by scanning "Process Data" instead of a fixed cell
pub const SPECIFIC_ENERGY_FIELD: &str = "Specific Energy(kwh/m3)";

/// Where the power consumption total may appear on "Process Data"
pub const POWER_SCAN_ROWS: [u32; 3] = [47, 53, 59];
pub const POWER_SCAN_LABEL: &str = "Total Power Consumption";
/// Zero-based column holding the label (A)
pub const POWER_SCAN_LABEL_COL: u32 = 0;
/// Zero-based column holding the value (E)
pub const POWER_SCAN_VALUE_COL: u32 = 4;

/// Number of passes in the simulated RO system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    One,
    Two,
    Three,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::One, Stage::Two, Stage::Three];

    /// Check order for detection: the highest stage wins
    pub const DETECTION_ORDER: [Stage; 3] = [Stage::Three, Stage::Two, Stage::One];

    pub fn number(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
            Stage::Three => 3,
        }
    }

    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            1 => Ok(Stage::One),
            2 => Ok(Stage::Two),
            3 => Ok(Stage::Three),
            other => Err(Error::InvalidStage(other)),
        }
    }

    /// Cell on "Results Summary" that holds the stage number for this variant
    pub fn marker_address(self) -> &'static str {
        match self {
            Stage::One => "A23",
            Stage::Two => "A24",
            Stage::Three => "A25",
        }
    }

    /// Text expected in the marker cell
    pub fn marker_text(self) -> &'static str {
        match self {
            Stage::One => "1",
            Stage::Two => "2",
            Stage::Three => "3",
        }
    }

    /// Rows added below the stage table relative to a single-stage report
    pub fn row_shift(self) -> u32 {
        u32::from(self.number()) - 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage {}", self.number())
    }
}

/// Logical group of a field (output order follows this grouping)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGroup {
    Process,
    FeedWater,
    Permeate,
    Concentrate,
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldGroup::Process => "process",
            FieldGroup::FeedWater => "feed water",
            FieldGroup::Permeate => "permeate",
            FieldGroup::Concentrate => "concentrate",
        };
        f.write_str(label)
    }
}

/// How a field's value is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extraction {
    /// Read one cell from a named sheet
    Cell,
    /// Scan "Process Data" for the power consumption total
    PowerScan,
    /// Not exposed by the reports; always empty
    Unsourced,
}

#[derive(Debug, Clone, Copy)]
enum Origin {
    Fixed(&'static str, &'static str),
    Shifted(&'static str, &'static str),
    PowerScan,
    Unsourced,
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    group: FieldGroup,
    origin: Origin,
}

const fn fixed(sheet: &'static str, cell: &'static str, name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        group: FieldGroup::Process,
        origin: Origin::Fixed(sheet, cell),
    }
}

const fn shifted(group: FieldGroup, cell: &'static str, name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        group,
        origin: Origin::Shifted(RESULTS_SUMMARY, cell),
    }
}

const fn unsourced(group: FieldGroup, name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        group,
        origin: Origin::Unsourced,
    }
}

use FieldGroup::{Concentrate as C, FeedWater as FW, Permeate as P, Process as PR};

/// Base table: stage 1 addresses
static FIELDS: &[FieldSpec] = &[
    fixed(RESULTS_SUMMARY, "C5", "Feed Flow (m3/hr)"),
    fixed(PROCESS_DATA, "E34", "Feed Pressure(bar)"),
    fixed(RESULTS_SUMMARY, "D10", "Feed Temperature"),
    shifted(PR, "C41", "Feed water pH"),
    FieldSpec {
        name: SPECIFIC_ENERGY_FIELD,
        group: PR,
        origin: Origin::PowerScan,
    },
    fixed(RESULTS_SUMMARY, "B14", "Flux(lmh)"),
    fixed(RESULTS_SUMMARY, "A23", "Pass Stage"),
    shifted(PR, "B24", "Pressure Vessel"),
    fixed(INPUT_DATA_SUMMARY, "C44", "Elements"),
    fixed(INPUT_DATA_SUMMARY, "E44", "Element age(years)"),
    fixed(RESULTS_SUMMARY, "B19", "Recovery(%)"),
    // feed water
    shifted(FW, "C31", "Ca_FW"),
    shifted(FW, "C32", "Mg_FW"),
    shifted(FW, "C33", "Na_FW"),
    shifted(FW, "C34", "K_FW"),
    shifted(FW, "C35", "NH4_FW"),
    shifted(FW, "C36", "Ba_FW"),
    shifted(FW, "C37", "Sr_FW"),
    shifted(FW, "H39", "H_FW"),
    shifted(FW, "H42", "CO3_FW"),
    shifted(FW, "H40", "HCO3_FW"),
    shifted(FW, "H31", "SO4_FW"),
    shifted(FW, "H32", "Cl_FW"),
    shifted(FW, "H33", "F_FW"),
    shifted(FW, "H34", "NO3_FW"),
    shifted(FW, "H36", "PO4_FW"),
    unsourced(FW, "OH_FW"),
    shifted(FW, "H38", "SiO2_FW"),
    shifted(FW, "H37", "B_FW"),
    shifted(FW, "H41", "CO2_FW"),
    unsourced(FW, "NH3_FW"),
    shifted(FW, "C40", "Feed Water TDS"),
    shifted(FW, "C45", "CaSO4 / ksp * 100, %_FW"),
    shifted(FW, "C46", "SrSO4 / ksp * 100, %_FW"),
    shifted(FW, "C44", "BaSO4 / ksp * 100, %_FW"),
    shifted(FW, "H45", "SiO2 saturation, %_FW"),
    shifted(FW, "H44", "CaF2 / ksp * 100, %_FW"),
    // permeate
    shifted(P, "B31", "Ca_P"),
    shifted(P, "B32", "Mg_P"),
    shifted(P, "B33", "Na_P"),
    shifted(P, "B34", "K_P"),
    shifted(P, "B35", "NH4_P"),
    shifted(P, "B36", "Ba_P"),
    shifted(P, "B37", "Sr_P"),
    shifted(P, "G39", "H_P"),
    shifted(P, "G42", "CO3_P"),
    shifted(P, "G40", "HCO3_P"),
    shifted(P, "G31", "SO4_P"),
    shifted(P, "G32", "Cl_P"),
    shifted(P, "G33", "F_P"),
    shifted(P, "G34", "NO3_P"),
    shifted(P, "G36", "PO4_P"),
    unsourced(P, "OH_P"),
    shifted(P, "G38", "SiO2_P"),
    shifted(P, "G37", "B_P"),
    shifted(P, "G41", "CO2_P"),
    unsourced(P, "NH3_P"),
    shifted(P, "B40", "Permeate TDS"),
    // concentrate
    shifted(C, "D31", "Ca_C"),
    shifted(C, "D32", "Mg_C"),
    shifted(C, "D33", "Na_C"),
    shifted(C, "D34", "K_C"),
    shifted(C, "D35", "NH4_C"),
    shifted(C, "D36", "Ba_C"),
    shifted(C, "D37", "Sr_C"),
    shifted(C, "I39", "H_C"),
    shifted(C, "I42", "CO3_C"),
    shifted(C, "I40", "HCO3_C"),
    shifted(C, "I31", "SO4_C"),
    shifted(C, "I32", "Cl_C"),
    shifted(C, "I33", "F_C"),
    shifted(C, "I34", "NO3_C"),
    shifted(C, "I36", "PO4_C"),
    unsourced(C, "OH_C"),
    shifted(C, "I38", "SiO2_C"),
    shifted(C, "I37", "B_C"),
    shifted(C, "I41", "CO2_C"),
    unsourced(C, "NH3_C"),
    shifted(C, "D40", "Concentrate TDS"),
    shifted(C, "D45", "CaSO4 / ksp * 100, %_C"),
    shifted(C, "D46", "SrSO4 / ksp * 100, %_C"),
    shifted(C, "D44", "BaSO4 / ksp * 100, %_C"),
    shifted(C, "I45", "SiO2 saturation, %_C"),
    shifted(C, "I44", "CaF2 / ksp * 100, %_C"),
];

/// One entry of a stage layout: (sheet, cell address, field name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    pub sheet: Option<&'static str>,
    pub cell: Option<String>,
    pub field: &'static str,
    pub group: FieldGroup,
    pub extraction: Extraction,
}

/// Ordered field mappings for one stage variant
#[derive(Debug, Clone, Serialize)]
pub struct LayoutMapping {
    stage: Stage,
    entries: Vec<FieldMapping>,
}

lazy_static::lazy_static! {
    static ref LAYOUTS: [LayoutMapping; 3] = [
        LayoutMapping::build(Stage::One),
        LayoutMapping::build(Stage::Two),
        LayoutMapping::build(Stage::Three),
    ];
}

impl LayoutMapping {
    /// Static layout for a stage
    pub fn for_stage(stage: Stage) -> &'static LayoutMapping {
        match stage {
            Stage::One => &LAYOUTS[0],
            Stage::Two => &LAYOUTS[1],
            Stage::Three => &LAYOUTS[2],
        }
    }

    fn build(stage: Stage) -> Self {
        let entries = FIELDS
            .iter()
            .map(|spec| {
                let (sheet, cell, extraction) = match spec.origin {
                    Origin::Fixed(sheet, cell) => {
                        (Some(sheet), Some(cell.to_string()), Extraction::Cell)
                    }
                    Origin::Shifted(sheet, cell) => (
                        Some(sheet),
                        Some(shift_address(cell, stage.row_shift())),
                        Extraction::Cell,
                    ),
                    Origin::PowerScan => (None, None, Extraction::PowerScan),
                    Origin::Unsourced => (None, None, Extraction::Unsourced),
                };
                FieldMapping {
                    sheet,
                    cell,
                    field: spec.name,
                    group: spec.group,
                    extraction,
                }
            })
            .collect();

        Self { stage, entries }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn entries(&self) -> &[FieldMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldMapping> {
        self.entries.iter().find(|e| e.field == field)
    }
}

/// Moves an address `delta` rows down; addresses that do not resolve are kept as-is
fn shift_address(address: &str, delta: u32) -> String {
    match address.parse::<CellRef>() {
        Ok(cell) => cell.shifted_down(delta).to_string(),
        Err(_) => address.to_string(),
    }
}

/// Output column order: first-seen field names across the stage 1, 2 and 3
/// layouts, in that order, without duplicates
pub fn column_order() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = Vec::new();
    for stage in Stage::ALL {
        for name in LayoutMapping::for_stage(stage).field_names() {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }
    columns
}
