//! # ChamaPay Gateway Crate
//!
//! HTTP REST and WebSocket surface for the two ChamaPay screens. Requests are
//! routed to the chatbot session registry or to the admin roster and its
//! report exporter.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **WebSocket**: Live chat updates per session
//! - **Extract**: Path and JSON extractors that answer with `ErrorResponse`
//! - **State**: Shared handles to the backend services
//! - **Middleware**: CORS, request logging and tracing
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use chamapay_gateway::{create_router, state::create_test_gateway_state};
//!
//! # async fn run() -> std::io::Result<()> {
//! let app = create_router(create_test_gateway_state(Duration::from_millis(1200)));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod websocket;

pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

pub use create_router as build_router;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "ChamaPay API", description = "Chatbot and admin dashboard screens"),
    paths(
        rest::health::health_check,
        rest::screens::list_screens,
        rest::chat::open_session,
        rest::chat::get_session,
        rest::chat::submit_message,
        rest::chat::close_session,
        rest::roster::list_members,
        rest::roster::toggle_member,
        rest::roster::download_report,
    ),
    components(
        schemas(
            error::ErrorResponse,
            rest::health::HealthResponse,
            rest::screens::ScreenResponse,
            rest::chat::EntryResponse,
            rest::chat::SessionResponse,
            rest::chat::SubmitMessageRequest,
            rest::chat::SubmitMessageResponse,
            rest::chat::CloseSessionResponse,
            rest::roster::MemberResponse,
            rest::roster::RosterResponse,
            rest::roster::ReportFormat,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Screens", description = "Screen router"),
        (name = "Chat", description = "Scripted chatbot screen"),
        (name = "Roster", description = "Admin dashboard and contribution report"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);

    Router::new()
        // REST API routes
        .merge(rest::create_rest_routes().with_state(Arc::clone(&arc_state)))
        // WebSocket routes
        .merge(websocket::create_websocket_routes().with_state(arc_state))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/api/screens",
            "/api/chat/sessions",
            "/api/chat/sessions/{session_id}",
            "/api/chat/sessions/{session_id}/messages",
            "/api/roster",
            "/api/roster/{member_id}/toggle",
            "/api/roster/report",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
