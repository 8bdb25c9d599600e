pub mod api;
pub mod crm;
pub mod error;
pub mod utils;
pub mod webhook;

use std::sync::Arc;
use std::time::Instant;

use axum::{Router, routing};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::crm::CrmClient;

/// Notion database that receives new lead pages.
pub const DEFAULT_CRM_DATABASE_ID: &str = "f7cabf3f-1aac-4b87-89e2-91a5431bd03d";

const DEFAULT_NOTION_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BridgeConfig {
    #[serde(default)]
    pub notion: NotionConfig,
}

/// Non-secret Notion settings. The API key itself comes from the
/// environment, never from the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct NotionConfig {
    #[serde(default = "default_database_id")]
    pub database_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            database_id: default_database_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_database_id() -> String {
    DEFAULT_CRM_DATABASE_ID.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_NOTION_TIMEOUT_SECS
}

/// Secrets required to serve a webhook call.
///
/// Both are optional here so that startup never crashes on a missing value;
/// the webhook handler checks them on every request and fails closed.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub cal_webhook_secret: Option<String>,
    pub notion_api_key: Option<String>,
}

impl Secrets {
    /// Reads secrets from the environment. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            cal_webhook_secret: env_non_empty("CAL_WEBHOOK_SECRET"),
            notion_api_key: env_non_empty("NOTION_API_KEY"),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

pub struct AppState {
    pub secrets: Secrets,
    pub crm: Arc<dyn CrmClient + Send + Sync>,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

pub type SharedState = Arc<AppState>;

/// Builds the application router. Factored out of `main` so tests can
/// drive the handlers without binding a socket.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", routing::get(api::root))
        .route("/webhook", routing::post(api::handle_webhook))
        .route("/status", routing::get(api::status))
        .with_state(state)
}
