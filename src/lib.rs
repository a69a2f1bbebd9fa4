//! # Keyword Chatbot
//!
//! A Telegram bot that keeps keyword counters and interest profiles in a
//! Firebase Realtime Database and hands free text to a chat-completion model.
//!
//! ## Features
//! - `/add`, `/set`, `/get`, `/delete` keyword counters
//! - `/find_matches` interest matching across users
//! - `/hello` and `/help` canned replies
//! - Free text relayed to the chat model
//! - Health endpoints for deployment probes

/// Bot commands, routing, and per-command handlers
pub mod bot;
/// INI configuration loading
pub mod config;
/// Remote store client, authentication, and typed models
pub mod database;
/// Error types for the store, the chat client, and handlers
pub mod error;
/// Chat completion client and health endpoints
pub mod services;
/// Logging helpers and argument validation
pub mod utils;
