//! List command: prints stored evaluations with their progress

use std::path::PathBuf;

use accreditor_core::{EvaluationStore, EvaluationSummary, SqliteEvaluationStore};
use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// SQLite database file (defaults to the configured one)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let database = match args.database {
        Some(path) => path,
        None => ConfigLoader::load()?.storage.database,
    };

    if !database.exists() {
        println!("No database at {}", database.display());
        println!();
        println!("Run `accreditor serve` and create an evaluation first.");
        return Ok(());
    }

    let store = SqliteEvaluationStore::open(&database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;
    let evaluations = store.list_evaluations()?;

    if evaluations.is_empty() {
        println!("No evaluations yet.");
        return Ok(());
    }

    println!("{}", render_table(&evaluations));
    Ok(())
}

fn render_table(evaluations: &[EvaluationSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Program").fg(Color::Cyan),
        Cell::new("University").fg(Color::Cyan),
        Cell::new("Progress").fg(Color::Cyan),
        Cell::new("Updated").fg(Color::Cyan),
    ]);

    for summary in evaluations {
        let evaluation = &summary.evaluation;
        table.add_row(vec![
            Cell::new(evaluation.id),
            Cell::new(&evaluation.program_name),
            Cell::new(&evaluation.university_name),
            Cell::new(format_progress(
                summary.completed_criteria,
                summary.total_criteria,
            )),
            Cell::new(evaluation.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    table
}

fn format_progress(completed: u32, total: u32) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{}/{} ({}%)", completed, total, completed * 100 / total)
}
