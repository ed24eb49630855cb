use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "chamapay.toml",
    "config/chamapay.toml",
    "crates/config/chamapay.toml",
    "../chamapay.toml",
    "../config/chamapay.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub chat: ChatConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

/// Settings for the scripted chatbot screen.
///
/// ```
/// use chamapay_config::ChatConfig;
///
/// let chat = ChatConfig::default();
/// assert_eq!(chat.reply_delay_ms, 1200);
/// assert_eq!(chat.reply_delay().as_millis(), 1200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "ChatConfig::default_reply_delay")]
    pub reply_delay_ms: u64,
}

impl ChatConfig {
    const fn default_reply_delay() -> u64 {
        1200
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: Self::default_reply_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "ReportConfig::default_page_break_threshold")]
    pub page_break_threshold: u32,
    #[serde(default = "ReportConfig::default_file_name")]
    pub file_name: String,
}

impl ReportConfig {
    const fn default_page_break_threshold() -> u32 {
        280
    }

    fn default_file_name() -> String {
        "dovesPay_Contribution_Report".to_string()
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_break_threshold: Self::default_page_break_threshold(),
            file_name: Self::default_file_name(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use chamapay_config::load;
///
/// std::env::remove_var("CHAMAPAY_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default(
            "chat.reply_delay_ms",
            i64::try_from(defaults.chat.reply_delay_ms).unwrap_or(i64::MAX),
        )?
        .set_default(
            "report.page_break_threshold",
            i64::from(defaults.report.page_break_threshold),
        )?
        .set_default("report.file_name", defaults.report.file_name.clone())?;

    let environment_overrides = config::Environment::with_prefix("CHAMAPAY").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("CHAMAPAY_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via CHAMAPAY_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded chamapay configuration");
    Ok(config)
}
