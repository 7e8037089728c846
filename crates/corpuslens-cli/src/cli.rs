//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use corpuslens_domain::UploadStrategy;

/// corpuslens - Upload documents to a hosted retrieval corpus, query them, and compare figures.
#[derive(Debug, Parser)]
#[command(name = "corpuslens")]
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
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// API key (overrides the profile)
    #[arg(long, global = true, env = "CORPUSLENS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

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
    /// Quiet format (bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Test the connection to a corpus
    Connect(ConnectArgs),

    /// Upload PDF documents to the corpus
    Upload(UploadArgs),

    /// Ask a question about the uploaded documents
    Query(QueryArgs),

    /// Extract and tabulate financial metrics
    Compare(CompareArgs),

    /// List documents in the corpus
    Documents(DocumentsArgs),

    /// Check what the API key is allowed to do
    Permissions,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the connect command.
#[derive(Debug, Default, Parser)]
pub struct ConnectArgs {
    /// Customer (tenant) ID
    #[arg(long)]
    pub customer_id: Option<String>,

    /// Corpus ID or key
    #[arg(long)]
    pub corpus_id: Option<String>,

    /// API root (e.g., https://api.vectara.io)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Save connection as a profile
    #[arg(long)]
    pub save_as: Option<String>,

    /// Store the API key in the saved profile
    #[arg(long, requires = "save_as")]
    pub store_key: bool,
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// PDF files to upload
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Upload wire format (defaults to the configured strategy)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Question text
    #[arg(required = true)]
    pub question: Vec<String>,

    /// Maximum number of ranked results
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the compare command.
#[derive(Debug, Default, Parser)]
pub struct CompareArgs {
    /// Additional metrics (comma-separated), e.g. "Operating Expenses, Cash Flow"
    #[arg(short, long)]
    pub metrics: Option<String>,

    /// Write the table as CSV to this path
    #[arg(long)]
    pub csv: Option<String>,

    /// Draw a bar chart of the numeric values
    #[arg(long)]
    pub chart: bool,
}

/// Arguments for the documents command.
#[derive(Debug, Parser)]
pub struct DocumentsArgs {
    /// Maximum number of documents to show
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
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
        /// Customer (tenant) ID
        #[arg(long)]
        customer_id: String,
        /// Corpus ID or key
        #[arg(long)]
        corpus_id: String,
        /// API root
        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Upload strategy argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Multipart file upload (recommended)
    Multipart,
    /// Base64 body inside a JSON document (try this if multipart gives 403)
    Structured,
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

impl From<StrategyArg> for UploadStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Multipart => UploadStrategy::Multipart,
            StrategyArg::Structured => UploadStrategy::StructuredDocument,
        }
    }
}
