use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

use fundops_core::error::CoreError;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::new().unwrap_or_else(|_| config::Config::default());

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Templates => commands::templates::list_templates(),
        cli::Commands::Preview(command) => commands::preview::preview_command(command, &config),
        cli::Commands::Generate(command) => commands::generate::generate_command(command, &config),
        cli::Commands::Check(command) => commands::check::check_command(command),
        cli::Commands::Quarters(command) => commands::quarters::quarters_command(command),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::InvalidDate(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidRule(s) => {
                eprintln!(
                    "{} Invalid recurrence rule: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::UnsupportedFrequency(s) => {
                eprintln!(
                    "{} Unsupported frequency: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
