//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabula_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Tabula - manage remote machine records from the terminal")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// API base URL (overrides config file and environment)
    #[arg(long, env = "TABULA_BASE_URL")]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List all machines
    List,

    /// Create a machine through the creation form
    Create,

    /// Edit the name or location of a machine
    Edit {
        /// Machine id
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New location
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a machine
    Delete {
        /// Machine id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Fill in a form described by a server schema
    Form {
        /// Schema endpoint (absolute or relative to the base URL)
        #[arg(long)]
        schema: String,

        /// Submission endpoint (absolute or relative to the base URL)
        #[arg(long)]
        submit: String,

        /// Name shown in the form title
        #[arg(long, default_value = "Machine")]
        topic: String,

        /// Title the form as an update
        #[arg(long)]
        update: bool,

        /// Initial values as a JSON object
        #[arg(long)]
        initial: Option<String>,
    },
}
