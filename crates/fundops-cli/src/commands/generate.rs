use anyhow::Result;
use owo_colors::OwoColorize;

use fundops_core::calendar::add_months;
use fundops_core::instances::generate_task_instances;

use crate::cli::GenerateCommand;
use crate::config::Config;
use crate::parser::{parse_date, parse_date_or_today};
use crate::util::resolve_template;
use crate::views;

pub fn generate_command(command: GenerateCommand, config: &Config) -> Result<()> {
    let mut template = resolve_template(&command.template, command.anchor.as_deref())?;
    if command.all {
        // Caller-side copy: disabling the notification filter widens the
        // window without touching the registry template.
        template.recurrence.notify_days_before = 0;
    }

    let from = parse_date_or_today(command.from.as_deref())?;
    let to = match command.to.as_deref() {
        Some(s) => parse_date(s)?,
        None => add_months(from, i64::from(config.generation.lookahead_months)),
    };

    let generated = generate_task_instances(&template, from, to)?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&generated.instances)?);
        if generated.truncated {
            eprintln!("warning: occurrence cap reached; the window may contain more instances");
        }
        return Ok(());
    }

    if generated.instances.is_empty() {
        println!("No instances to generate in this window.");
        if !command.all && template.recurrence.notify_days_before > 0 {
            println!(
                "(Only instances due within {} days of the window start are surfaced; use --all to see every occurrence)",
                template.recurrence.notify_days_before
            );
        }
        return Ok(());
    }

    println!(
        "{} {} instance(s) for {}",
        "Generated".green().bold(),
        generated.instances.len(),
        template.name.cyan()
    );
    views::table::display_instances(&generated.instances);

    if generated.truncated {
        println!(
            "{} occurrence cap reached; the window may contain more instances",
            "Note:".yellow().bold()
        );
    }

    Ok(())
}
