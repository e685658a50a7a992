//! CLI parse: clap types for lambda-hook. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lambda-hook CLI - deterministic Lambda payload packaging
#[derive(Parser)]
#[command(name = "lambda-hook")]
#[command(about = "Package Lambda payloads under content-addressed artifact names")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config lookup and relative store paths)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// File selection flags shared by every packaging command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Inclusion glob (repeatable); replaces configured inclusions
    #[arg(long = "include")]
    pub include: Vec<String>,

    /// Exclusion glob (repeatable); replaces configured exclusions
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the archive digest of a directory
    Digest {
        /// Source directory (defaults to package.path)
        path: Option<PathBuf>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the artifact name of a directory
    Name {
        /// Function name (defaults to package.function_name)
        #[arg(long)]
        function: Option<String>,
        /// Source directory (defaults to package.path)
        path: Option<PathBuf>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write the archive to a directory under its artifact name
    Package {
        /// Function name (defaults to package.function_name)
        #[arg(long)]
        function: Option<String>,
        /// Source directory (defaults to package.path)
        path: Option<PathBuf>,
        /// Output directory
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Upload the archive to the store unless an identical one is present
    Publish {
        /// Function name (defaults to package.function_name)
        #[arg(long)]
        function: Option<String>,
        /// Source directory (defaults to package.path)
        path: Option<PathBuf>,
        /// Store directory (defaults to store.root/store.bucket)
        #[arg(long)]
        store: Option<PathBuf>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration after all sources are merged
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
