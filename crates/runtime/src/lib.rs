use std::sync::Arc;

use anyhow::{ensure, Result};
use chamapay_chats::SessionRegistry;
use chamapay_config::AppConfig;
use chamapay_roster::{ReportExporter, RosterStore};
use tokio::sync::Mutex;
use tracing::info;

pub mod screen;

pub use screen::Screen;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything the chat and admin screens need, built once from configuration.
#[derive(Clone)]
pub struct BackendServices {
    pub config: AppConfig,
    pub sessions: Arc<SessionRegistry>,
    pub roster: Arc<Mutex<RosterStore>>,
    pub exporter: Arc<ReportExporter>,
}

impl BackendServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let file_name = &config.report.file_name;
        ensure!(!file_name.trim().is_empty(), "report.file_name must not be empty");
        ensure!(
            !file_name.contains(&['/', '\\', '"'][..]),
            "report.file_name must be a bare file name, got {file_name:?}"
        );
        ensure!(
            config.report.page_break_threshold > 0,
            "report.page_break_threshold must be positive"
        );

        let sessions = Arc::new(SessionRegistry::with_default_resolver(
            config.chat.reply_delay(),
        ));
        let roster = RosterStore::default();
        let exporter = Arc::new(ReportExporter::new(&config.report));

        info!(
            reply_delay_ms = config.chat.reply_delay_ms,
            members = roster.len(),
            "chamapay services ready"
        );

        Ok(Self {
            config: config.clone(),
            sessions,
            roster: Arc::new(Mutex::new(roster)),
            exporter,
        })
    }

    /// Close every open chat screen so no reply fires after shutdown.
    pub async fn shutdown(&self) {
        let open = self.sessions.len().await;
        self.sessions.close_all().await;
        info!(closed_sessions = open, "services shut down");
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
