//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use kashshaf_domain::ModelId;
use kashshaf_extractor::AnalyzerConfig;
use std::path::PathBuf;

/// Kashshaf CLI - Extract scholarly-index annotations from .docx books.
#[derive(Debug, Parser)]
#[command(name = "kashshaf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (delimited lines)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one document and write the spreadsheet
    #[command(after_help = document_limits_note(AnalyzerConfig::default().max_text_length))]
    Analyze(AnalyzeArgs),

    /// List supported models
    Models,

    /// Show or create prompt templates
    Template(TemplateArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Document to analyze (.docx, or plain text)
    pub file: PathBuf,

    /// Completion model (gpt-4, gpt-3.5-turbo)
    #[arg(short, long)]
    pub model: Option<ModelId>,

    /// API key for the completion service
    #[arg(long, env = "KASHSHAF_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Spreadsheet to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prompt template file (TOML)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Print the model's reply before the records
    #[arg(long)]
    pub show_reply: bool,
}

/// Arguments for template management.
#[derive(Debug, Parser)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub action: TemplateAction,
}

/// Template actions.
#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    /// Print the effective template as TOML
    Show,

    /// Write the default template to a file for editing
    Init {
        /// Destination file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Completion model
        #[arg(short, long, default_value = "gpt-4")]
        model: ModelId,
        /// Completion service base URL
        #[arg(short, long)]
        endpoint: Option<String>,
        /// API key stored with the profile
        #[arg(long)]
        api_key: Option<String>,
        /// Prompt template file
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// What the analyzer refuses to send, for help text.
pub fn document_limits_note(max_text_length: usize) -> String {
    format!(
        "Documents with no text are rejected before any request is sent. \
         Documents longer than {} characters are rejected too; raise \
         max_text_length under [analyzer] in the config file to allow more.",
        max_text_length
    )
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
