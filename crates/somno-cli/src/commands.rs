//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use comfy_table::Table;
use tracing::info;

use somno_core::{load_sleep_monitor_folder, load_sleep_monitor_folder_split};
use somno_ingest::load_sleep_summary;
use somno_model::{Biosignal, SleepTable, TimezoneSpec};
use somno_output::{SleepEndpoints, save_sleep_data, save_sleep_endpoints};
use somno_transform::GapNightSplitter;

use crate::cli::{ConvertArgs, SummaryArgs};
use crate::summary::apply_table_style;

pub fn run_signals() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Signal", "Unit", "Raw file"]);
    apply_table_style(&mut table);
    for signal in Biosignal::ALL {
        table.add_row(vec![
            signal.column_name().to_string(),
            signal.unit().to_string(),
            format!("raw_sleep-monitor_{}.csv", signal.file_suffix()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let timezone = TimezoneSpec::parse(&args.timezone).context("parse timezone")?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.folder.join("output"));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let mut table = Table::new();
    table.set_header(vec!["Output", "Rows", "Signals"]);
    apply_table_style(&mut table);

    if args.split_nights {
        let splitter = GapNightSplitter::new(Duration::hours(args.night_gap_hours));
        let nights = load_sleep_monitor_folder_split(&args.folder, timezone, &splitter)
            .context("load export folder")?;
        for (index, night) in nights.iter().enumerate() {
            let path = output_dir.join(format!("sleep_data_night_{index}.csv"));
            save_sleep_data(&path, night).context("save night segment")?;
            table.add_row(summary_row(&path, night));
        }
        info!(nights = nights.len(), output_dir = %output_dir.display(), "conversion complete");
    } else {
        let merged =
            load_sleep_monitor_folder(&args.folder, timezone).context("load export folder")?;
        let path = output_dir.join("sleep_data.csv");
        save_sleep_data(&path, &merged).context("save merged table")?;
        table.add_row(summary_row(&path, &merged));
        info!(rows = merged.height(), output_dir = %output_dir.display(), "conversion complete");
    }

    println!("{table}");
    Ok(())
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let nights = load_sleep_summary(&args.file).context("load sleep summary")?;
    if let Some(path) = &args.output {
        save_sleep_endpoints(path, &SleepEndpoints::Summary(nights.clone()))
            .context("save endpoints")?;
        info!(path = %path.display(), nights = nights.len(), "wrote endpoint rows");
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Night",
        "Sleep onset",
        "Wake onset",
        "Total sleep (min)",
        "WASO (min)",
        "Wake bouts",
    ]);
    apply_table_style(&mut table);
    for (index, night) in nights.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            night.sleep_onset.to_rfc3339(),
            night.wake_onset.to_rfc3339(),
            night.total_sleep_duration.to_string(),
            night.wake_after_sleep_onset.to_string(),
            night.num_wake_bouts.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn summary_row(path: &Path, table: &SleepTable) -> Vec<String> {
    vec![
        display_name(path),
        table.height().to_string(),
        table
            .biosignals()
            .iter()
            .map(|signal| signal.column_name())
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

fn display_name(path: &Path) -> String {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_string(),
        None => path.display().to_string(),
    }
}
