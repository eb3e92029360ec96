use crate::error::{HarvestError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const REPORT_SUFFIXES: &[&str] = &[".xls", ".xlsx"];

/// Collects report workbooks below `folder` (recursively), sorted by full path
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(HarvestError::FolderNotFound(folder.display().to_string()));
    }

    let mut reports: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|e| e.ok())
        // follows file symlinks; linked directories are not descended into
        .filter(|e| e.path().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_report_file(p))
        .collect();

    // plain string order of the full path
    reports.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    Ok(reports)
}

/// True for `.xls` / `.xlsx` in any letter case
pub fn is_report_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy().to_ascii_lowercase();
            REPORT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
        .unwrap_or(false)
}
