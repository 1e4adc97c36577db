use anyhow::Result;
use owo_colors::OwoColorize;

use fundops_core::instances::should_generate_instance;

use crate::cli::CheckCommand;
use crate::parser::parse_date_or_today;
use crate::util::resolve_template;

pub fn check_command(command: CheckCommand) -> Result<()> {
    let template = resolve_template(&command.template, command.anchor.as_deref())?;
    let reference = parse_date_or_today(command.on.as_deref())?;

    let check = should_generate_instance(&template, reference)?;

    println!("Template: {}", template.name.cyan());
    if check.should_generate {
        println!(
            "{} notification window is open",
            "Generate:".green().bold()
        );
        if let Some(due) = &check.due_date {
            println!("Next occurrence due: {}", due.green());
        }
        if let Some(notification) = &check.notification_date {
            println!("Window opened: {}", notification);
        }
    } else {
        println!("{} nothing to generate", "Hold:".yellow().bold());
        if let Some(reason) = &check.reason {
            println!("Reason: {}", reason);
        }
        if let Some(notification) = &check.notification_date {
            println!("Window opens: {}", notification.yellow());
        }
    }

    Ok(())
}
