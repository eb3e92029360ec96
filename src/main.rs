use anyhow::Context;
use clap::Parser;
use ro_harvest::{aggregator, cli, config, detector, error, extractor, logging, workbook};
use ro_harvest_common::{column_order, LayoutMapping, Stage};
use cli::{Cli, Commands};
use config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("failed to load configuration")?;

    match cli.command {
        Commands::Run { folder, output } => {
            println!("💧 ro-harvest - batch\n");

            let input_dir = config.resolve_input_dir(folder)?;
            let output_path = config.resolve_output_path(output);
            println!("- Input:  {}", input_dir.display());
            println!("- Output: {}\n", output_path.display());

            let summary = aggregator::run_batch(&input_dir, &output_path)
                .with_context(|| format!("batch over {} failed", input_dir.display()))?;

            println!(
                "  {} scanned, {} appended, {} skipped, {} rows total ({})",
                summary.scanned,
                summary.appended,
                summary.skipped.len(),
                summary.total_rows,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            for skipped in &summary.skipped {
                println!("  ✖ {}", skipped.path.display());
            }
        }

        Commands::Inspect { file, json } => {
            if !file.is_file() {
                return Err(error::HarvestError::FileNotFound(file.display().to_string()).into());
            }

            let mut book = workbook::WorkbookFile::new(&file);
            let layout = detector::detect_layout(&mut book)?;
            let row = extractor::extract_fields(&mut book, layout);

            if json {
                let values: serde_json::Map<String, serde_json::Value> = row
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.as_str().into()))
                    .collect();
                let doc = serde_json::json!({
                    "file": file.display().to_string(),
                    "stage": row.stage().number(),
                    "values": values,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}: {}\n", file.display(), row.stage());
                for (name, value) in row.iter() {
                    match value.miss_reason() {
                        Some(reason) if cli.verbose => println!("  {:<28} (empty: {})", name, reason),
                        _ => println!("  {:<28} {}", name, value.as_str()),
                    }
                }
                println!("\n  {} of {} fields empty", row.missing_count(), row.len());
            }
        }

        Commands::Columns => {
            let layout = LayoutMapping::for_stage(Stage::One);
            for (i, name) in column_order().iter().enumerate() {
                let group = layout
                    .get(name)
                    .map(|entry| entry.group.to_string())
                    .unwrap_or_default();
                println!("{:>3}  {:<28} {}", i + 1, name, group);
            }
        }

        Commands::Config { set_input_dir, set_output, show } => {
            let mut config = config;
            let changed = set_input_dir.is_some() || set_output.is_some();

            if let Some(dir) = set_input_dir {
                config.input_dir = Some(dir);
            }
            if let Some(path) = set_output {
                config.output_path = path;
            }
            if changed {
                config.save().context("failed to save configuration")?;
                println!("✔ Configuration saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Configuration:");
                println!(
                    "  Input folder: {}",
                    config
                        .input_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(not set)".into())
                );
                println!("  Master CSV:   {}", config.output_path.display());
            }
        }
    }

    Ok(())
}
