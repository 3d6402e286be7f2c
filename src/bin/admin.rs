//! CLI administration tool for boltlink.
//!
//! Works directly on the store file, so the server must be stopped first
//! (`sled` holds an exclusive lock on the database directory).
//!
//! # Usage
//!
//! ```bash
//! # Create a short link (prompts for the destination when omitted)
//! cargo run --bin admin -- link create --destination https://example.com
//!
//! # Look up a short link
//! cargo run --bin admin -- link get q3Zt_w==
//!
//! # List stored links
//! cargo run --bin admin -- link list --limit 20
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check the store
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DB_PATH` - Store location (default: `urlshortner.db`)
//! - `COLLECTION_NAME` - Tree holding the links (default: `shorturls`)
//! - `ID_LENGTH_BYTES` - Random bytes per generated short ID (default: 4)

use boltlink::api::dto::link::CreateLinkRequest;
use boltlink::config::{self, Config};
use boltlink::prelude::*;
use boltlink::utils::id_generator::decode_id;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing boltlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    Create {
        /// Destination URL
        #[arg(short, long)]
        destination: Option<String>,
    },

    /// Show the destination of a short link
    Get {
        /// Short ID
        id: String,
    },

    /// List stored links in key order
    List {
        /// Maximum number of links to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check that the store opens and answers reads
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let repo = SledLinkRepository::open(&config.db_path, config.collection_name.clone())
        .with_context(|| {
            format!(
                "Failed to open store at '{}' (is the server still running?)",
                config.db_path
            )
        })?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &repo, &config).await?,
        Commands::Stats => handle_stats(&repo).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    repo.flush().await.context("Failed to flush store")?;

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(
    action: LinkAction,
    repo: &SledLinkRepository,
    config: &Config,
) -> Result<()> {
    match action {
        LinkAction::Create { destination } => {
            let service = LinkService::new(Arc::new(repo.clone()), config.id_length_bytes);
            create_link(&service, destination).await?;
        }
        LinkAction::Get { id } => get_link(repo, &id).await?,
        LinkAction::List { limit } => list_links(repo, limit).await?,
    }

    Ok(())
}

/// Creates a short link, prompting for the destination when not given.
///
/// The destination goes through the same validation as `POST /`.
async fn create_link(service: &LinkService, destination: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let destination = match destination {
        Some(d) => d,
        None => Input::new()
            .with_prompt("Destination URL")
            .interact_text()?,
    };

    let request = CreateLinkRequest {
        destination,
        id: None,
    };
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", AppError::from(e)))?;

    let link = service
        .create_link(request.destination)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  ID:          {}", link.id.bright_yellow().bold());
    println!("  Destination: {}", link.destination.cyan());
    println!();

    Ok(())
}

/// Prints the destination stored under `id`.
async fn get_link(repo: &SledLinkRepository, id: &str) -> Result<()> {
    match repo.get(id).await {
        Ok(Some(destination)) if !destination.is_empty() => {
            println!("  {} -> {}", id.bright_yellow(), destination.cyan());
            if let Some(bytes) = decode_id(id) {
                println!(
                    "  {}",
                    format!("{} random bytes", bytes.len()).bright_black()
                );
            }
        }
        Ok(_) => {
            println!("{}", format!("  No link stored under '{}'", id).yellow());
        }
        Err(StoreError::CollectionMissing) => {
            println!(
                "{}",
                format!("  Collection '{}' has no links yet", repo.collection()).yellow()
            );
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to read link: {}", e)),
    }

    Ok(())
}

/// Lists stored links in key order.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   ID           Destination
///   ──────────────────────────────────────────────────
///   q3Zt_w==     https://example.com
/// ```
async fn list_links(repo: &SledLinkRepository, limit: usize) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let links = repo
        .list(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {}",
        "ID".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for link in &links {
        println!("  {:<12} {}", link.id.bright_yellow(), link.destination.cyan());
    }

    let total = repo.count().await.unwrap_or(links.len());
    println!();
    println!(
        "  Showing {} of {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays store statistics.
///
/// Shows:
/// - Number of stored links
/// - Size of the store on disk
async fn handle_stats(repo: &SledLinkRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let size = repo
        .size_on_disk()
        .map_err(|e| anyhow::anyhow!("Failed to read store size: {}", e))?;

    println!(
        "  Collection:   {}",
        repo.collection().to_string().bright_white()
    );
    println!(
        "  Links:        {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Size on disk: {}",
        format!("{} bytes", size).bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction, repo: &SledLinkRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking store...".bright_blue());

            if !repo.health_check().await {
                anyhow::bail!("Store did not answer a read");
            }

            if repo.collection_exists() {
                println!("{}", "✅ Store OK".green().bold());
            } else {
                println!(
                    "{}",
                    format!(
                        "✅ Store OK (collection '{}' not created yet)",
                        repo.collection()
                    )
                    .green()
                    .bold()
                );
            }
        }
    }

    Ok(())
}
