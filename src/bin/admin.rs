//! CLI administration tool for shorturl.
//!
//! Provides commands for inspecting users and short URLs, deactivating
//! tokens, and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Most clicked short URLs
//! cargo run --bin admin -- top --limit 20
//!
//! # Registered users
//! cargo run --bin admin -- user list
//!
//! # Deactivate a short URL
//! cargo run --bin admin -- url deactivate AB12C
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shorturl::config::mask_connection_string;
use shorturl::domain::repositories::{UrlRepository, UserRepository};
use shorturl::infrastructure::persistence::{PgUrlRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturl.
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
    /// Show totals
    Stats,

    /// Show the most clicked short URLs
    Top {
        /// Number of rows to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,
}

#[derive(Subcommand)]
enum UrlAction {
    /// Mark a short URL inactive
    Deactivate {
        /// Short token, e.g. AB12C
        token: String,

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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Top { limit } => handle_top(&pool, limit).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Url { action } => handle_url_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    Ok(())
}

/// Displays totals for users, short URLs and clicks.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user""#)
        .fetch_one(pool)
        .await?;

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(pool)
        .await?;

    let active_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM url WHERE is_active AND expires_at > NOW()",
    )
    .fetch_one(pool)
    .await?;

    let clicks_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(number_of_clicks), 0)::BIGINT FROM url")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:       {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Short URLs:  {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Valid now:   {}",
        active_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:      {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints the most clicked short URLs.
///
/// # Output Format
///
/// ```text
///   Token  Clicks   Active  Long URL
///   ─────────────────────────────────────────────────────
///   AB12C  42       yes     https://example.com
/// ```
async fn handle_top(pool: &PgPool, limit: usize) -> Result<()> {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let urls = repo
        .list_by_clicks_desc()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    println!("{}", "Top short URLs".bright_blue().bold());
    println!();

    if urls.is_empty() {
        println!("{}", "  No short URLs yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<8} {:<7} {}",
        "Token".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Active".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for url in urls.iter().take(limit) {
        let active = if url.is_active {
            "yes".green()
        } else {
            "no".red()
        };

        println!(
            "  {:<6} {:<8} {:<7} {}",
            url.token.cyan(),
            url.number_of_clicks.to_string().bright_white(),
            active,
            url.long_url
        );
    }

    println!();

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => {
            println!("{}", "Users".bright_blue().bold());
            println!();

            let users = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            for user in &users {
                println!(
                    "  {:<36}  {:<30} {}",
                    user.id.to_string().bright_black(),
                    user.username.cyan(),
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!(
                "  Total: {}",
                users.len().to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Deactivates a short URL with confirmation prompt.
///
/// Asks for confirmation (default: No) unless `--yes` is given.
async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    match action {
        UrlAction::Deactivate { token, yes } => {
            let url = repo
                .find_by_token(&token)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Short URL not found")?;

            if !url.is_active {
                println!("{}", "This short URL is already inactive".yellow());
                return Ok(());
            }

            println!("  Token:    {}", url.token.cyan());
            println!("  Long URL: {}", url.long_url);
            println!("  Clicks:   {}", url.number_of_clicks);
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Deactivate this short URL?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            repo.deactivate(&token)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to deactivate: {}", e))?;

            println!("{}", "Short URL deactivated".green().bold());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  URL:        {}", mask_connection_string(database_url));
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
