//! CLI definition for the heritage command-line interface.
//!
//! This module only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Heritage India - 3D heritage models from the command line
///
/// Browse states and temples and load 3D models from the heritage catalog.
#[derive(Parser, Debug)]
#[command(name = "heritage")]
#[command(version)]
#[command(about = "Heritage India - browse temples and 3D heritage models")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file (defaults to .heritage/heritage.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the catalog endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load 3D models from the catalog
    Models {
        /// Only models whose location contains this text (case-insensitive)
        #[arg(short, long)]
        location: Option<String>,
        /// Keep at most this many models
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the featured models of the landing page
    Featured {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List Indian states
    States {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the temples of a state, with its 3D models when available
    Temples {
        /// State slug or name (e.g. karnataka, "Tamil Nadu")
        state: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a temple's details, with its 3D models when available
    Temple {
        /// Temple slug or name (e.g. hampi)
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the raw catalog in its wire envelope format
    Dump,
}
