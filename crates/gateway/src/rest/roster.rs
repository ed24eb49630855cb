//! Admin dashboard REST endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chamapay_roster::{Member, MemberId, RosterStore};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::GatewayResult;
use crate::extract::ApiPath;
use crate::state::GatewayState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: MemberId,
    pub name: String,
    pub contributed: bool,
    /// `Paid` or `Pending`
    pub status: String,
    /// Label of the button that flips the status
    pub action: String,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        let status = member.status();
        Self {
            id: member.id,
            name: member.name.clone(),
            contributed: member.contributed,
            status: status.label().to_string(),
            action: status.toggle_action().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterResponse {
    pub members: Vec<MemberResponse>,
    pub contributed: usize,
    pub total: usize,
    /// The member a toggle request flipped, absent for unknown ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggled: Option<MemberResponse>,
}

impl RosterResponse {
    fn snapshot(roster: &RosterStore, toggled: Option<MemberResponse>) -> Self {
        Self {
            members: roster.members().iter().map(MemberResponse::from).collect(),
            contributed: roster.contributed_count(),
            total: roster.len(),
            toggled,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `text` (default) downloads the rendered report, `json` returns its layout
    pub format: Option<ReportFormat>,
}

/// Create roster routes
pub fn create_roster_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/roster", get(list_members))
        .route("/api/roster/report", get(download_report))
        .route("/api/roster/:member_id/toggle", post(toggle_member))
}

#[utoipa::path(
    get,
    path = "/api/roster",
    tag = "Roster",
    responses(
        (status = 200, description = "Members in roster order", body = RosterResponse)
    )
)]
pub async fn list_members(State(state): State<Arc<GatewayState>>) -> Json<RosterResponse> {
    let roster = state.roster.lock().await;
    Json(RosterResponse::snapshot(&roster, None))
}

#[utoipa::path(
    post,
    path = "/api/roster/{member_id}/toggle",
    tag = "Roster",
    params(
        ("member_id" = u32, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Roster after the toggle; unknown ids leave it unchanged", body = RosterResponse),
        (status = 400, description = "Member id is not a number", body = crate::error::ErrorResponse)
    )
)]
pub async fn toggle_member(
    ApiPath(member_id): ApiPath<MemberId>,
    State(state): State<Arc<GatewayState>>,
) -> Json<RosterResponse> {
    let mut roster = state.roster.lock().await;
    let toggled = roster.toggle(member_id).map(MemberResponse::from);

    if let Some(member) = &toggled {
        info!(member_id, status = %member.status, "contribution status changed");
    }

    Json(RosterResponse::snapshot(&roster, toggled))
}

#[utoipa::path(
    get,
    path = "/api/roster/report",
    tag = "Roster",
    params(ReportQuery),
    responses(
        (status = 200, description = "Contribution report for today's date", content_type = "text/plain", body = String)
    )
)]
pub async fn download_report(
    Query(query): Query<ReportQuery>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Response> {
    let members = state.roster.lock().await.list_members();
    let today = chrono::Local::now().date_naive();
    let report = state.exporter.export(&members, today);

    info!(pages = report.page_count(), file = %report.text_file_name(), "report requested");

    match query.format.unwrap_or_default() {
        ReportFormat::Json => {
            let body = serde_json::to_string(&report)?;
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        ReportFormat::Text => {
            let disposition = format!("attachment; filename=\"{}\"", report.text_file_name());
            Ok((
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                report.render_text(),
            )
                .into_response())
        }
    }
}
