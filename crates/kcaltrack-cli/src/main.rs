use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kcaltrack-cli", version, about = "kcaltrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile management and derived targets
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Meal logging
    Meal {
        #[command(subcommand)]
        action: commands::meal::MealAction,
    },
    /// Exercise logging and burn previews
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// Read the raw log
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Daily and period summaries
    Summary {
        #[command(subcommand)]
        action: commands::summary::SummaryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Meal { action } => commands::meal::run(action),
        Commands::Exercise { action } => commands::exercise::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Summary { action } => commands::summary::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
