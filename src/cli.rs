//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the admin console.

use clap::{Parser, Subcommand};

/// Admin console - settings form and persona editor for the admin backend
///
/// Fetches the backend's configuration schema and persona list, renders them
/// as HTML, applies edits and writes them back through the backend's JSON API.
#[derive(Parser, Debug)]
#[command(name = "admin-console")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ADMIN_CONSOLE_CONFIG")]
    pub config: Option<String>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Backend settings form
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommand,
    },

    /// Persona list editor
    Persona {
        #[command(subcommand)]
        subcommand: PersonaSubcommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsSubcommand {
    /// Render the settings form as HTML
    Render {
        /// Write the markup to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Edit fields in the form and submit it
    Set {
        /// Field edits, e.g. debug=true or tags="a, b"
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },

    /// Discard local edits and reload from the backend
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PersonaSubcommand {
    /// List persona ids with their last edit time
    List,

    /// Render the persona cards as HTML
    Render {
        /// Card to show expanded
        #[arg(long)]
        expand: Option<String>,

        /// Write the markup to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Add a placeholder persona
    Add,

    /// Save from a persona's card, re-posting the whole list
    Save { id: String },

    /// Delete a persona
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Change a persona's id
    Rename { old: String, new: String },

    /// Replace a persona's prompt
    SetPrompt { id: String, text: String },

    /// Point a persona at an image path or URL
    SetImage { id: String, path: String },

    /// Upload an image file and attach it to a persona
    Upload { id: String, file: String },
}

/// Split a `KEY=VALUE` argument at the first `=`
pub fn parse_assignment(arg: &str) -> Option<(&str, &str)> {
    arg.split_once('=').filter(|(key, _)| !key.trim().is_empty())
}
