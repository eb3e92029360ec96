//! Stage detection
//!
//! The "Results Summary" stage table lists one row per stage starting at
//! A23, so the last stage number sits at A23, A24 or A25. The highest
//! matching marker wins.

use crate::error::{HarvestError, Result};
use crate::workbook::{cell_text, SheetSource};
use ro_harvest_common::layout::{LayoutMapping, Stage, RESULTS_SUMMARY};
use ro_harvest_common::CellRef;
use std::path::PathBuf;

/// Determines which stage layout a report uses.
///
/// Checks A25 = "3", then A24 = "2", then A23 = "1", stopping at the first
/// match. A marker cell that cannot be read counts as a miss; detection fails only
/// when the sheet is unreadable or all three markers miss.
pub fn detect_stage(source: &mut dyn SheetSource) -> Result<Stage> {
    let label = source.label();
    let sheet = source.sheet(RESULTS_SUMMARY).map_err(|e| {
        tracing::debug!("{}: {}", label, e);
        HarvestError::StageUndetected(PathBuf::from(&label))
    })?;

    for stage in Stage::DETECTION_ORDER {
        let marker = match stage.marker_address().parse::<CellRef>() {
            Ok(cell) => cell,
            Err(_) => continue,
        };
        let text = cell_text(sheet, marker.position());
        if text.as_deref() == Some(stage.marker_text()) {
            return Ok(stage);
        }
        tracing::debug!(
            "{}: {} is {:?}, not {}",
            label,
            stage.marker_address(),
            text.unwrap_or_default(),
            stage
        );
    }

    Err(HarvestError::StageUndetected(PathBuf::from(label)))
}

/// Detects the stage and returns its layout
pub fn detect_layout(source: &mut dyn SheetSource) -> Result<&'static LayoutMapping> {
    detect_stage(source).map(LayoutMapping::for_stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::MemoryWorkbook;
    use calamine::Data;

    fn book(cells: &[(&str, Data)]) -> MemoryWorkbook {
        MemoryWorkbook::new("report.xlsx")
            .with_cells(RESULTS_SUMMARY, cells)
            .unwrap()
    }

    #[test]
    fn test_detect_each_stage() {
        let mut one = book(&[("A23", Data::String("1".into()))]);
        assert_eq!(detect_stage(&mut one).unwrap(), Stage::One);

        let mut two = book(&[("A23", Data::Float(1.0)), ("A24", Data::Float(2.0))]);
        assert_eq!(detect_stage(&mut two).unwrap(), Stage::Two);

        let mut three = book(&[("A25", Data::Int(3))]);
        assert_eq!(detect_stage(&mut three).unwrap(), Stage::Three);
    }

    #[test]
    fn test_highest_stage_wins() {
        let mut both = book(&[
            ("A23", Data::Float(1.0)),
            ("A24", Data::String("2".into())),
            ("A25", Data::String("3".into())),
        ]);
        assert_eq!(detect_stage(&mut both).unwrap(), Stage::Three);
    }

    #[test]
    fn test_marker_text_is_trimmed() {
        let mut padded = book(&[("A24", Data::String(" 2 ".into()))]);
        assert_eq!(detect_stage(&mut padded).unwrap(), Stage::Two);
    }

    #[test]
    fn test_wrong_marker_values() {
        let mut wrong = book(&[
            ("A23", Data::String("2".into())),
            ("A24", Data::String("3".into())),
            ("A25", Data::String("1".into())),
        ]);
        let err = detect_stage(&mut wrong).unwrap_err();
        assert!(matches!(err, HarvestError::StageUndetected(_)));
    }

    #[test]
    fn test_markers_out_of_range() {
        let mut short = book(&[("A1", Data::String("Results".into()))]);
        assert!(matches!(
            detect_stage(&mut short),
            Err(HarvestError::StageUndetected(_))
        ));
    }

    #[test]
    fn test_missing_sheet() {
        let mut other = MemoryWorkbook::new("report.xlsx")
            .with_cells("Process Data", &[("A25", Data::Float(3.0))])
            .unwrap();
        let err = detect_stage(&mut other).unwrap_err();
        assert!(err.to_string().contains("report.xlsx"));
    }

    #[test]
    fn test_detect_layout() {
        let mut two = book(&[("A24", Data::Float(2.0))]);
        let layout = detect_layout(&mut two).unwrap();
        assert_eq!(layout.stage(), Stage::Two);
    }
}
