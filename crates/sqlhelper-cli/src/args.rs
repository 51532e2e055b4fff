//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlhelper")]
#[command(author, version, about = "Heuristic SQL checker, fixer and formatter")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to the nearest sqlhelper.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check files for common SQL mistakes
    Analyze {
        /// Files to check (supports glob patterns, `-` reads stdin)
        files: Vec<PathBuf>,

        /// SQL dialect
        #[arg(short, long)]
        dialect: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Source language (detected from the file extension by default)
        #[arg(short, long)]
        language: Option<String>,

        /// Issue codes or names to ignore (e.g. W0003, missing-semicolon)
        #[arg(long, value_name = "CODE")]
        disable: Vec<String>,
    },

    /// Apply best-effort fixes to SQL files
    Fix {
        /// SQL files to fix (supports glob patterns, `-` reads stdin)
        files: Vec<PathBuf>,

        /// SQL dialect
        #[arg(short, long)]
        dialect: Option<String>,

        /// Rewrite files in place instead of printing the result
        #[arg(short, long)]
        write: bool,
    },

    /// Put each SQL keyword on its own line
    Format {
        /// SQL files to format (supports glob patterns, `-` reads stdin)
        files: Vec<PathBuf>,

        /// SQL dialect (adds dialect-specific keywords)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Rewrite files in place instead of printing the result
        #[arg(short, long)]
        write: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with source snippets
    #[default]
    Human,
    /// JSON output
    Json,
    /// SARIF output (for GitHub Code Scanning)
    Sarif,
}
