mod browser;
mod categorizer;
mod chart;
mod cli;
mod error;
mod fmt;
mod importer;
mod models;
mod picker;
mod reports;
mod table;
mod tui;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let rules = categorizer::build_rules();
    log::debug!("built {} keyword rules", rules.len());

    let result = match cli.command {
        None => cli::browse::run(None, rules),
        Some(Commands::Browse { file }) => cli::browse::run(file.as_deref(), rules),
        Some(Commands::List { file, sort, desc }) => {
            cli::list::run(&file, sort.map(Into::into), desc, &rules)
        }
        Some(Commands::Summary { file, format }) => cli::summary::run(&file, format, &rules),
        Some(Commands::Rules) => {
            cli::rules::list(&rules);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
