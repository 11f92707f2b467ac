use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ytr")]
#[command(about = "Translate text with the Yandex Translate API")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Source language code (ISO 639-1, e.g., en, de), or "auto" to detect it
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (ISO 639-1, e.g., ru, en, zh)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Translation API endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Retries after network failures and server errors
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Disable cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Log requests and retries to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure default languages and the API key
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported language codes
    Languages,
}
