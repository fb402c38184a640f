//! Configuration commands.

use clap::Subcommand;
use quadrant_core::storage::AppConfig;
use quadrant_core::CoreError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "export.dir", "report.quotes")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key (e.g. "export.dir", "report.quotes")
        key: String,
        /// New value
        value: String,
    },
    /// List all config values as JSON
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), CoreError> {
    match action {
        ConfigAction::Get { key } => {
            let config = AppConfig::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown config key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = AppConfig::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = AppConfig::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            AppConfig::default().save()?;
            println!("Config reset to defaults");
        }
    }

    Ok(())
}
