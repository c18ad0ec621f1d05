pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
pub use cli::{ChecklistCommand, CliConfig, Command, ModelArg, SettingsCommand, ThemeArg};

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::model::{ModelId, ThemeId};
    use chrono::NaiveDate;
    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "babygids")]
    #[command(about = "Pregnancy and baby companion with an AI advice assistant")]
    pub struct CliConfig {
        #[arg(long, help = "Path to a TOML configuration file")]
        pub config: Option<String>,

        #[arg(long, help = "Directory holding the local data store")]
        pub data_dir: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Create or replace the profile
        Setup {
            #[arg(long)]
            name: String,
            /// Due date (future) or birth date (past), YYYY-MM-DD
            #[arg(long)]
            date: NaiveDate,
        },
        /// Show pregnancy week or baby age
        Status,
        /// Ask the assistant a question
        Ask {
            #[arg(required = true, num_args = 1..)]
            question: Vec<String>,
        },
        /// Generate a weekly agenda, or show the saved one
        Agenda {
            #[arg(long)]
            weeks: Option<u32>,
            #[arg(long, help = "Show the saved agenda instead of generating one")]
            show: bool,
        },
        /// Manage the to-do checklist
        Checklist {
            #[command(subcommand)]
            action: Option<ChecklistCommand>,
        },
        /// Show or change settings
        Settings {
            #[command(subcommand)]
            action: Option<SettingsCommand>,
        },
        /// Delete all stored data
        Reset {
            #[arg(long)]
            yes: bool,
        },
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum ChecklistCommand {
        List,
        Add {
            #[arg(required = true, num_args = 1..)]
            text: Vec<String>,
        },
        Toggle {
            id: String,
        },
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum SettingsCommand {
        Show,
        Set {
            #[arg(long, value_enum)]
            theme: Option<ThemeArg>,
            #[arg(long, value_enum)]
            model: Option<ModelArg>,
            /// Empty string removes the stored key
            #[arg(long)]
            api_key: Option<String>,
        },
    }

    #[derive(Debug, Clone, Copy, ValueEnum)]
    pub enum ThemeArg {
        Standard,
        Amoled,
        Mondriaan,
    }

    impl From<ThemeArg> for ThemeId {
        fn from(arg: ThemeArg) -> Self {
            match arg {
                ThemeArg::Standard => ThemeId::Standard,
                ThemeArg::Amoled => ThemeId::Amoled,
                ThemeArg::Mondriaan => ThemeId::Mondriaan,
            }
        }
    }

    #[derive(Debug, Clone, Copy, ValueEnum)]
    pub enum ModelArg {
        #[value(name = "gemini-3-flash-preview")]
        Flash,
        #[value(name = "gemini-3-pro-preview")]
        Pro,
    }

    impl From<ModelArg> for ModelId {
        fn from(arg: ModelArg) -> Self {
            match arg {
                ModelArg::Flash => ModelId::Gemini3FlashPreview,
                ModelArg::Pro => ModelId::Gemini3ProPreview,
            }
        }
    }

}
