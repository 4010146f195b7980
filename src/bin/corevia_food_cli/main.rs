// ABOUTME: corevia-food CLI - exercise food photo analysis and image transfer from a shell
// ABOUTME: Analyzes photos, uploads and fetches entry images, manages the profile photo
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Analyze a photo (remote analysis, no on-device model on this host)
//! corevia-food analyze lunch.jpg
//!
//! # Try the on-device tier only; never touches the network
//! corevia-food analyze lunch.jpg --offline
//!
//! # Attach a photo to a food log entry
//! corevia-food upload-image lunch.jpg --entry-id 42
//!
//! # Download an entry image (absolute URL or backend-relative path)
//! corevia-food fetch-image /uploads/food/42.jpg --entry-id 42 --output 42.jpg
//!
//! # Replace or remove the profile photo
//! corevia-food profile upload me.png
//! corevia-food profile delete
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use corevia_food::analysis::UnavailableClassifier;
use corevia_food::config::ClientConfig;
use corevia_food::context::FoodServices;
use corevia_food::logging::LoggingConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "corevia-food",
    about = "CoreVia food photo client",
    long_about = "Analyze food photos and manage food entry and profile images against a CoreVia backend."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override (defaults to COREVIA_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze a food photo and print the result as JSON
    Analyze {
        /// Photo file (JPEG, PNG or WebP)
        photo: PathBuf,

        /// Use the on-device tier only
        #[arg(long)]
        offline: bool,
    },

    /// Resize, compress, cache and upload a food entry photo
    UploadImage {
        /// Photo file
        photo: PathBuf,

        /// Food log entry identifier
        #[arg(long)]
        entry_id: String,
    },

    /// Download a food entry photo and write it to disk
    FetchImage {
        /// Absolute URL or path relative to the backend
        url: String,

        /// Food log entry identifier used as cache key
        #[arg(long)]
        entry_id: String,

        /// Output file; the extension selects the format
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Profile photo commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Upload a new profile photo
    Upload {
        /// Photo file
        photo: PathBuf,
    },

    /// Remove the profile photo on the server
    Delete,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = ClientConfig {
            base_url: ClientConfig::new(base_url).base_url,
            ..config
        };
    }
    debug!(base_url = %config.base_url, "Configuration loaded");

    // No on-device model ships with the CLI, so two-tier analysis always reaches the backend
    let services = FoodServices::new(config, Arc::new(UnavailableClassifier))?;

    match cli.command {
        Command::Analyze { photo, offline } => {
            commands::analyze::run(&services, &photo, offline).await?;
        }
        Command::UploadImage { photo, entry_id } => {
            commands::images::upload(&services, &photo, &entry_id).await?;
        }
        Command::FetchImage {
            url,
            entry_id,
            output,
        } => {
            commands::images::fetch(&services, &url, &entry_id, &output).await?;
        }
        Command::Profile { action } => match action {
            ProfileCommand::Upload { photo } => {
                commands::profile::upload(&services, &photo).await?;
            }
            ProfileCommand::Delete => {
                commands::profile::delete(&services).await?;
            }
        },
    }

    Ok(())
}
