use anyhow::Result;
use owo_colors::OwoColorize;

use fundops_core::instances::compute_due_date;
use fundops_core::recurrence::RecurrenceCalculator;

use crate::cli::PreviewCommand;
use crate::config::Config;
use crate::parser::parse_date_or_today;
use crate::util::resolve_template;

pub fn preview_command(command: PreviewCommand, config: &Config) -> Result<()> {
    let template = resolve_template(&command.template, command.anchor.as_deref())?;
    let from = parse_date_or_today(command.from.as_deref())?;
    let count = command.count.unwrap_or(config.generation.preview_count);

    let calculator = RecurrenceCalculator::new(&template.recurrence)?;
    if calculator.custom_fallback() {
        println!(
            "{} custom pattern not recognized; stepping monthly instead",
            "Warning:".yellow().bold()
        );
    }

    let occurrences = calculator.preview_occurrences(from, count);
    if occurrences.is_empty() {
        println!("No upcoming occurrences (rule may have ended)");
        return Ok(());
    }

    println!(
        "{} (next {} occurrences)",
        "Recurrence Preview".blue().bold(),
        occurrences.len()
    );
    println!("Template: {}", template.name.cyan());
    println!();

    for (i, occurrence) in occurrences.iter().enumerate() {
        let due = compute_due_date(*occurrence, &template.due_rule);
        if due == *occurrence {
            println!("  {}. {}", i + 1, occurrence.format("%Y-%m-%d"));
        } else {
            println!(
                "  {}. {}  (due {})",
                i + 1,
                occurrence.format("%Y-%m-%d"),
                due.format("%Y-%m-%d").green()
            );
        }
    }

    Ok(())
}
