//! CLI administration tool for shortlink.
//!
//! Inspects and removes short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the newest links
//! cargo run --bin admin -- links list --page 1 --page-size 20
//!
//! # Show a single link
//! cargo run --bin admin -- links show my-alias
//!
//! # Delete a link (asks for confirmation unless -y is given)
//! cargo run --bin admin -- links delete my-alias
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`, `DB_USER`, ...): PostgreSQL connection
//! - `BASE_URL`: prefix used to print short URLs

use shortlink::application::services::LinkService;
use shortlink::config::{self, Config};
use shortlink::domain::entities::ShortLink;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::server::connect_pool;
use shortlink::utils::alias_generator::RandomAliasGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
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
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List links, newest first
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Links per page
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },

    /// Show a single link
    Show {
        /// Alias of the link
        alias: String,
    },

    /// Delete a link
    Delete {
        /// Alias of the link
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, database_url).await?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool, config: &Config) -> Result<()> {
    let service = LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomAliasGenerator::from_entropy()),
    );

    match action {
        LinksAction::List { page, page_size } => {
            list_links(&service, &config.base_url, page, page_size).await?;
        }
        LinksAction::Show { alias } => {
            show_link(&service, &config.base_url, &alias).await?;
        }
        LinksAction::Delete { alias, yes } => {
            delete_link(&service, &alias, yes).await?;
        }
    }

    Ok(())
}

/// Prints one page of links as a table.
///
/// ```text
/// 🔗 Short Links (page 1)
///
///   Alias        Created            URL
///   ──────────────────────────────────────────────────────────
///   my-link      2026-01-15 10:30   https://example.com/long/path
/// ```
async fn list_links(service: &LinkService, base_url: &str, page: u32, page_size: u32) -> Result<()> {
    anyhow::ensure!(page > 0, "Page must be greater than 0");
    anyhow::ensure!(page_size > 0, "Page size must be greater than 0");

    println!(
        "{}",
        format!("🔗 Short Links (page {page})").bright_blue().bold()
    );
    println!();

    let offset = i64::from(page - 1) * i64::from(page_size);
    let (links, total) = service
        .list(offset, i64::from(page_size))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<18} {}",
        "Alias".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<20} {:<18} {}",
            link.short_alias.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {} (short URLs: {}{})",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold(),
        base_url.bright_black(),
        "<alias>".bright_black()
    );
    println!();

    Ok(())
}

async fn show_link(service: &LinkService, base_url: &str, alias: &str) -> Result<()> {
    let link = find_link(service, alias).await?;
    print_link(&link, base_url);
    Ok(())
}

/// Deletes a link after confirmation.
///
/// The confirmation defaults to No. A link that disappears between lookup
/// and deletion is reported as not found.
async fn delete_link(service: &LinkService, alias: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    let link = find_link(service, alias).await?;
    println!("  Alias: {}", link.short_alias.cyan());
    println!("  URL:   {}", link.original_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .remove(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn find_link(service: &LinkService, alias: &str) -> Result<ShortLink> {
    match service.resolve(alias).await {
        Ok(link) => Ok(link),
        Err(AppError::NotFound { .. }) => anyhow::bail!("Link '{}' not found", alias),
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

fn print_link(link: &ShortLink, base_url: &str) {
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Alias:     {}", link.short_alias.cyan());
    println!(
        "  Short URL: {}",
        format!("{}{}", base_url, link.short_alias).bright_yellow()
    );
    println!("  URL:       {}", link.original_url);
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await
                .context("Failed to count links (are migrations applied?)")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
