use clap::{Parser, Subcommand};

/// Recurring-task generation for private-equity fund operations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the built-in task templates
    Templates,
    /// Preview upcoming occurrences for a template
    Preview(PreviewCommand),
    /// Generate task instances for a template within a date window
    Generate(GenerateCommand),
    /// Check whether a template is due for generation
    Check(CheckCommand),
    /// Show the quarter-end reporting calendar
    Quarters(QuartersCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// Template key (see `fundops templates`)
    pub template: String,
    /// Number of occurrences to show
    #[clap(short, long)]
    pub count: Option<usize>,
    /// Reference date to preview from (defaults to today)
    #[clap(short, long)]
    pub from: Option<String>,
    /// Anchor the recurrence on a specific date (e.g., '2026-01-15')
    #[clap(long)]
    pub anchor: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Template key (see `fundops templates`)
    pub template: String,
    /// Window start date (defaults to today)
    #[clap(short, long)]
    pub from: Option<String>,
    /// Window end date (defaults to the configured lookahead)
    #[clap(short, long)]
    pub to: Option<String>,
    /// Anchor the recurrence on a specific date
    #[clap(long)]
    pub anchor: Option<String>,
    /// Include instances outside the notification window
    #[clap(long)]
    pub all: bool,
    /// Output instances as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// Template key (see `fundops templates`)
    pub template: String,
    /// Reference date for the check (defaults to today)
    #[clap(long)]
    pub on: Option<String>,
    /// Anchor the recurrence on a specific date
    #[clap(long)]
    pub anchor: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct QuartersCommand {
    /// Year to display (defaults to the current year)
    #[clap(short, long)]
    pub year: Option<i32>,
}
