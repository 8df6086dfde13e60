//! CLI administration tool for url-shortener.
//!
//! Works directly against the configured mapping store, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- link create https://example.com/page
//!
//! # Show where a short id points
//! cargo run --bin admin -- link show Ab3dE-9x
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `url_shortener::config`. With the default
//! `memory` backend every invocation starts from an empty store.

use url_shortener::application::services::{ResolverService, ShortenerService};
use url_shortener::config::{self, Config};
use url_shortener::domain::analytics_event::RequestMeta;
use url_shortener::domain::event_queue::EventDispatcher;
use url_shortener::domain::event_worker::{EventWorkerSettings, run_event_worker};
use url_shortener::domain::repositories::MappingStore;
use url_shortener::error::AppError;
use url_shortener::server;
use url_shortener::utils::code_generator::RandomIdGenerator;
use url_shortener::utils::short_url::ShortUrlBase;

use anyhow::Result;
use axum::http::HeaderMap;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing url-shortener.
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

    /// Mapping store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        /// URL to shorten (http, https or ftp)
        url: String,
    },

    /// Show the original URL of a short id
    Show {
        /// Short identifier
        short_id: String,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let redis = server::connect_redis(&config).await?;
    let store = server::build_store(&config, redis.clone()).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, store, redis).await?,
        Commands::Store { action } => handle_store_action(action, &config, store).await?,
    }

    Ok(())
}

/// Dispatches link commands.
///
/// Events produced by the command go to the configured sink; the worker is
/// drained before the process exits.
async fn handle_link_action(
    action: LinkAction,
    config: &Config,
    store: Arc<dyn MappingStore>,
    redis: Option<redis::aio::ConnectionManager>,
) -> Result<()> {
    let sink = server::build_sink(config, redis)?;
    let (events, events_rx) = EventDispatcher::channel(config.event_queue_capacity);
    let worker = tokio::spawn(run_event_worker(
        events_rx,
        sink,
        EventWorkerSettings {
            timeout: Duration::from_millis(config.event_sink_timeout_ms),
            ..EventWorkerSettings::default()
        },
    ));

    let outcome = match action {
        LinkAction::Create { url } => {
            let shortener = ShortenerService::new(
                store,
                Arc::new(RandomIdGenerator::new(config.short_id_length)),
                events,
            );
            create_link(&shortener, config, &url).await
        }
        LinkAction::Show { short_id } => {
            let resolver = ResolverService::new(store, events);
            show_link(&resolver, &short_id).await
        }
    };

    // Services are dropped above, closing the queue.
    let _ = worker.await;

    outcome
}

/// Shortens a URL and prints the result.
async fn create_link(shortener: &ShortenerService, config: &Config, url: &str) -> Result<()> {
    println!("{}", "🔗 Create short link".bright_blue().bold());
    println!();

    let base = ShortUrlBase::for_request(&HeaderMap::new(), &server::short_url_settings(config))?;

    match shortener.shorten(url, &base, RequestMeta::default()).await {
        Ok(link) => {
            println!("  Short id:  {}", link.short_id.bright_yellow().bold());
            println!("  Short URL: {}", link.short_url.cyan());
            println!("  Target:    {}", link.original_url.bright_black());
            println!("  Host:      {}", base.authority().bright_black());
            println!();
            println!("{}", "✅ Link created".green().bold());
            Ok(())
        }
        Err(AppError::InvalidInput(message)) => {
            println!("{}", format!("❌ {}", message).red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create link: {}", e)),
    }
}

/// Resolves a short id and prints its target.
async fn show_link(resolver: &ResolverService, short_id: &str) -> Result<()> {
    println!("{}", "🔍 Short link".bright_blue().bold());
    println!();

    match resolver.resolve(short_id, RequestMeta::default()).await {
        Ok(mapping) => {
            println!("  Short id: {}", mapping.short_id.bright_yellow());
            println!("  Target:   {}", mapping.original_url.cyan());
            Ok(())
        }
        Err(AppError::NotFound) => {
            println!("{}", format!("⚠️  No link for '{}'", short_id).yellow());
            Ok(())
        }
        Err(AppError::InvalidInput(message)) => {
            println!("{}", format!("❌ {}", message).red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve link: {}", e)),
    }
}

/// Handles store diagnostic commands.
async fn handle_store_action(
    action: StoreAction,
    config: &Config,
    store: Arc<dyn MappingStore>,
) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!(
                "{}",
                format!("🔍 Checking {} store...", config.store_backend).bright_blue()
            );

            if store.health_check().await {
                println!("{}", "✅ Store connection OK".green().bold());
            } else {
                anyhow::bail!("{} store is not reachable", store.backend_name());
            }
        }
    }

    Ok(())
}
