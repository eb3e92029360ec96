use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("No input folder configured. Pass one to `ro-harvest run FOLDER` or set it with `ro-harvest config --set-input-dir DIR`")]
    MissingInputDir,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Cannot read sheet '{sheet}': {reason}")]
    SheetUnavailable { sheet: String, reason: String },

    #[error("Stage not detected in {} (A25 != 3, A24 != 2, A23 != 1)", .0.display())]
    StageUndetected(PathBuf),

    #[error("Master table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ro_harvest_common::Error),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
