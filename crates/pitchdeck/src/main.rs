mod app;
mod auth;
mod cli;
mod commands;
mod config;
mod deck;
mod logging;
mod parser;
mod render;
mod theme;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.quiet, !cli.no_color);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
