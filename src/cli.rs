use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ro-harvest")]
#[command(about = "Collects RO simulation report values into a master CSV", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print per-field diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a folder of reports and append one row per report to the master CSV
    Run {
        /// Report folder (default: configured input folder)
        folder: Option<PathBuf>,

        /// Master CSV (default: configured output path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect the stage of one report and show the values it yields
    Inspect {
        /// Report workbook (.xls/.xlsx)
        #[arg(required = true)]
        file: PathBuf,

        /// Print the row as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the master CSV's fixed columns
    Columns,

    /// Show or edit the saved configuration
    Config {
        /// Set the report folder
        #[arg(long)]
        set_input_dir: Option<PathBuf>,

        /// Set the master CSV path
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// Show the configuration
        #[arg(long)]
        show: bool,
    },
}
