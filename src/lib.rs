//! RO Harvest
//!
//! Pulls fixed-location values out of reverse-osmosis simulation report
//! workbooks and appends them, one row per report, to a master CSV.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod master;
pub mod scanner;
pub mod workbook;

pub use aggregator::{run_batch, BatchSummary};
pub use error::{HarvestError, Result};
