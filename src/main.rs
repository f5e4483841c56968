//! # Hotel Booking Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database, seeds the
//! configured admins, and runs the Telegram dispatcher and the booking intake
//! API side by side.

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod database;
mod services;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::bot::pagination::PageTracker;
use crate::bot::roles::RoleStore;
use crate::bot::state::ConversationState;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::api::ApiService;
use crate::services::mailer::Mailer;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_booking_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    info!("Starting Hotel Booking Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot and roles
    let telegram_bot = Bot::new(&config.telegram_bot_token);
    let roles = RoleStore::new(db.pool.clone(), config.admin_chat_ids.clone());
    roles.seed_super_admins().await?;
    if config.admin_chat_ids.is_empty() {
        warn!("No ADMIN_CHAT_IDS configured; booking notifications will be dropped");
    }

    let pages = Arc::new(PageTracker::default());
    let handler = BotHandler::new(db.as_ref().clone(), roles.clone(), pages);

    // Initialize the HTTP API
    let mailer = config
        .smtp
        .as_ref()
        .map(Mailer::from_config)
        .transpose()?;
    let api = ApiService::new(
        db.clone(),
        telegram_bot.clone(),
        roles,
        config.clone(),
        mailer,
    );
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    info!("API server starting on port {}", config.http_port);

    // Run both the bot and the API concurrently
    let bot_task = tokio::spawn(async move {
        let storage = InMemStorage::<ConversationState>::new();
        Dispatcher::builder(telegram_bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let api_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, api.router).await {
            tracing::error!("API server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = api_task => {
            if let Err(e) = result2 {
                tracing::error!("API task error: {}", e);
            }
        }
    }

    info!("Application stopped");
    Ok(())
}
