//! # Keyword Chatbot Main Entry Point
//!
//! Initializes logging, loads configuration, connects to the database and the
//! chat model, then runs the Telegram bot next to the health server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyword_chatbot::bot::handlers::BotHandler;
use keyword_chatbot::config::Config;
use keyword_chatbot::database::auth::ServiceAccountAuth;
use keyword_chatbot::database::{FirebaseStore, Store};
use keyword_chatbot::services::chat::{ChatClient, ChatGptClient};
use keyword_chatbot::services::health::HealthService;
use keyword_chatbot::utils::logging::{log_system_event, mask_token};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyword_chatbot=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    info!("Starting Keyword Chatbot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, Credentials: {}, Bot token: {}, HTTP Port: {}",
        config.database_url,
        config.credential_path.display(),
        mask_token(&config.telegram_bot_token),
        config.http_port
    );

    // Connect to the store
    info!("Loading service account credentials...");
    let auth = ServiceAccountAuth::from_file(&config.credential_path)?;
    info!("Authenticating as {}", auth.client_email());
    let store: Arc<dyn Store> = Arc::new(FirebaseStore::new(&config.database_url, Some(auth))?);
    if let Err(e) = store.ping().await {
        tracing::warn!("Database is not reachable yet: {}", e);
    } else {
        info!("Database connection verified");
    }

    // One chat client for the lifetime of the process
    let chat: Arc<dyn ChatClient> = Arc::new(ChatGptClient::new(config.chat.clone()));
    info!(
        "Chat client ready - model {} (api {})",
        config.chat.model_name, config.chat.api_version
    );

    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(store.clone(), chat);
    info!("Telegram bot initialized successfully");

    let health_service = HealthService::new(store);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    log_system_event("Polling for updates", None);

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("Application stopped", None);
    Ok(())
}
