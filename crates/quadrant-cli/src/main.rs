use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quadrant-cli",
    version,
    about = "Quadrant CLI -- Eisenhower matrix task organizer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Completion report
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Per-quadrant display preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Import, export, and reset of the whole task set
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
