//! Command-line interface for the catalog service.

use clap::{Parser, Subcommand};

/// Marquee - cinema catalog service
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API daemon (default)
    #[command(alias = "-d", alias = "--daemon")]
    Daemon,

    /// Insert the fixture theaters, replacing any existing ones
    Seed,

    /// Write a default config.toml if none exists
    Init,
}
