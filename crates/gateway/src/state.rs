//! Shared application state for the gateway

use std::sync::Arc;
use std::time::Duration;

use chamapay_chats::SessionRegistry;
use chamapay_roster::{ReportExporter, RosterStore};
use chamapay_runtime::BackendServices;
use tokio::sync::Mutex;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct GatewayState {
    /// Open chat screens
    pub sessions: Arc<SessionRegistry>,
    /// The admin screen's roster
    pub roster: Arc<Mutex<RosterStore>>,
    /// Report builder for the admin screen
    pub exporter: Arc<ReportExporter>,
}

impl GatewayState {
    pub fn new(
        sessions: Arc<SessionRegistry>,
        roster: Arc<Mutex<RosterStore>>,
        exporter: Arc<ReportExporter>,
    ) -> Self {
        Self {
            sessions,
            roster,
            exporter,
        }
    }

    pub fn from_services(services: &BackendServices) -> Self {
        Self::new(
            Arc::clone(&services.sessions),
            Arc::clone(&services.roster),
            Arc::clone(&services.exporter),
        )
    }
}

/// Gateway state with the default roster and report settings, for tests.
pub fn create_test_gateway_state(reply_delay: Duration) -> GatewayState {
    GatewayState::new(
        Arc::new(SessionRegistry::with_default_resolver(reply_delay)),
        Arc::new(Mutex::new(RosterStore::default())),
        Arc::new(ReportExporter::default()),
    )
}
