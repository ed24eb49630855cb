//! REST API endpoints for the gateway

pub mod chat;
pub mod health;
pub mod roster;
pub mod screens;

use axum::{routing::get, Router};
use crate::state::GatewayState;
use std::sync::Arc;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Screen router
        .merge(screens::create_screen_routes())
        // Chatbot screen
        .merge(chat::create_chat_routes())
        // Admin screen
        .merge(roster::create_roster_routes())
}
