//! Screen router listing

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use chamapay_runtime::Screen;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ScreenResponse {
    pub id: String,
    pub title: String,
    /// Entry point of the screen's API
    pub path: String,
    pub default: bool,
}

impl From<Screen> for ScreenResponse {
    fn from(screen: Screen) -> Self {
        let path = match screen {
            Screen::ChatBot => "/api/chat/sessions",
            Screen::Admin => "/api/roster",
        };

        Self {
            id: screen.slug().to_string(),
            title: screen.title().to_string(),
            path: path.to_string(),
            default: screen == Screen::default(),
        }
    }
}

pub fn create_screen_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/api/screens", get(list_screens))
}

#[utoipa::path(
    get,
    path = "/api/screens",
    tag = "Screens",
    responses(
        (status = 200, description = "Screens a client can switch between", body = Vec<ScreenResponse>)
    )
)]
pub async fn list_screens() -> Json<Vec<ScreenResponse>> {
    Json(Screen::ALL.into_iter().map(ScreenResponse::from).collect())
}
