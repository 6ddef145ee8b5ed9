//! Template command: validates a criteria template and summarizes it

use std::path::PathBuf;

use accreditor_core::CriteriaTemplate;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::config::ConfigLoader;

#[derive(Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Parse a template and print its criteria
    Check {
        /// Template file (defaults to the configured one)
        path: Option<PathBuf>,
    },
}

pub fn run(args: TemplateArgs) -> Result<()> {
    match args.command {
        TemplateCommands::Check { path } => check(path),
    }
}

fn check(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => ConfigLoader::load()?.template.path,
    };

    let template = CriteriaTemplate::load(&path)
        .with_context(|| format!("Invalid criteria template {}", path.display()))?;

    if template.is_empty() {
        println!("{} contains no criteria.", path.display());
        return Ok(());
    }

    println!("{}", render_table(&template));
    println!(
        "{} criteria, {} sub-criteria, {} questions",
        template.len(),
        template.sub_criterion_count(),
        total_questions(&template)
    );
    Ok(())
}

fn render_table(template: &CriteriaTemplate) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Criterion").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Sub-criteria").fg(Color::Cyan),
        Cell::new("Questions").fg(Color::Cyan),
    ]);

    for (index, criterion) in template.criteria().iter().enumerate() {
        let questions: usize = criterion
            .sub_criteria
            .iter()
            .map(|sub| sub.questions.len())
            .sum();
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&criterion.title),
            Cell::new(criterion.strictness.as_str()),
            Cell::new(criterion.sub_criteria.len()),
            Cell::new(questions),
        ]);
    }

    table
}

fn total_questions(template: &CriteriaTemplate) -> usize {
    template
        .criteria()
        .iter()
        .flat_map(|criterion| &criterion.sub_criteria)
        .map(|sub| sub.questions.len())
        .sum()
}
