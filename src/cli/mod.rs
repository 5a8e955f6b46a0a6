//! CLI module - Command-line interface for Yume

use clap::{Parser, Subcommand};

/// Yume - self-hosted anime browsing and watching server
#[derive(Parser)]
#[command(name = "yume")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    #[command(alias = "-s", alias = "--serve")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
