use anyhow::Result;
use chrono::{Datelike, Utc};
use comfy_table::Table;
use owo_colors::OwoColorize;

use fundops_core::calendar::quarter_ends_for_year;

use crate::cli::QuartersCommand;

pub fn quarters_command(command: QuartersCommand) -> Result<()> {
    let year = command.year.unwrap_or_else(|| Utc::now().year());

    println!("{} {}", "Quarter Ends".blue().bold(), year);

    let mut table = Table::new();
    table
        .set_header(vec!["Quarter", "Reporting Date"])
        .load_preset(comfy_table::presets::UTF8_FULL);

    for (quarter, end) in quarter_ends_for_year(year) {
        table.add_row(vec![
            format!("Q{}", quarter),
            end.format("%Y-%m-%d").to_string(),
        ]);
    }

    println!("{}", table);

    Ok(())
}
