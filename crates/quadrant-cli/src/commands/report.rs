//! Completion report command.

use clap::Subcommand;
use quadrant_core::storage::{AppConfig, Database, StorageBackend};
use quadrant_core::{generate_report, CoreError, Report};

const QUOTES: &str = include_str!("../../assets/quotes.txt");

#[derive(Subcommand)]
pub enum ReportAction {
    /// Print the completion report
    Show {
        /// Emit the raw JSON snapshot instead of the text report
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ReportAction) -> Result<(), CoreError> {
    match action {
        ReportAction::Show { json } => {
            let mut db = Database::open()?;
            let report = generate_report(&db.load_model());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_text(&report);
            }
        }
    }

    Ok(())
}

fn print_text(report: &Report) {
    println!("Task report -- {}", report.generated_at.format("%Y-%m-%d"));
    println!();
    for quadrant in &report.quadrants {
        println!(
            "{}  {} ({}/{} completed)",
            quadrant.quadrant.code(),
            quadrant.label,
            quadrant.completed,
            quadrant.total
        );
        for text in &quadrant.completed_texts {
            println!("  - {text}");
        }
    }
    println!();
    println!(
        "Overall: {}/{} completed ({:.1}%)",
        report.completed, report.total, report.rate
    );

    let config = AppConfig::load_or_default();
    if config.report.quotes {
        if let Some(quote) = pick_quote(&config) {
            println!();
            println!("  \"{quote}\"");
        }
    }
}

/// Picks one line from the custom quote file when configured, else from
/// the built-in set. Unreadable files fall back to no quote at all.
fn pick_quote(config: &AppConfig) -> Option<String> {
    use rand::seq::SliceRandom;

    let custom;
    let source = match &config.report.custom_quotes {
        Some(path) => {
            custom = std::fs::read_to_string(path).ok()?;
            custom.as_str()
        }
        None => QUOTES,
    };

    let lines: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.choose(&mut rand::thread_rng()).map(ToString::to_string)
}
