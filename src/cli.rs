// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// One subcommand per platform. Both take the same optional flags; anything
// left out falls back to the --config file and then to the platform's
// built-in defaults.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigOverrides, Platform};

#[derive(Parser, Debug)]
#[command(
    name = "seed-harvest",
    version,
    about = "Scrapes archive pages for resource URLs and writes them as a crawler seed list",
    long_about = "seed-harvest fetches every page in a seed list, extracts the resource URLs a \
                  crawler would otherwise miss (PDFs, full-size scans, viewer API calls) and \
                  writes them one per line for use as a seed file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect PDF links from DSpace archive record pages (elar.uspu.ru)
    ///
    /// Example: seed-harvest pdf-links --input elar-uspu-ru.dspace.urls
    PdfLinks {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Collect images, pages and item endpoints from issue-viewer pages (libraria.ua)
    ///
    /// Example: seed-harvest viewer-resources --delay-ms 250
    ViewerResources {
        #[command(flatten)]
        job: JobArgs,
    },
}

impl Commands {
    pub fn platform(&self) -> Platform {
        match self {
            Commands::PdfLinks { .. } => Platform::PdfLinks,
            Commands::ViewerResources { .. } => Platform::ViewerResources,
        }
    }

    pub fn job(&self) -> &JobArgs {
        match self {
            Commands::PdfLinks { job } | Commands::ViewerResources { job } => job,
        }
    }
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// TOML file with job settings (same keys as the long flags, snake_case)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed list, one page URL per line
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Where to write the derived URLs (overwritten)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Prefix added to site-relative paths found in the markup
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum number of requests in flight
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Pause between launching successive requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl JobArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            base_url: self.base_url.clone(),
            max_connections: self.max_connections,
            launch_delay_ms: self.delay_ms,
            request_timeout_secs: self.timeout_secs,
            ..ConfigOverrides::default()
        }
    }
}
