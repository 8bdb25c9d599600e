use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use cal_notion_bridge::crm::{CrmClient, NotionClient};
use cal_notion_bridge::error::BridgeError;
use cal_notion_bridge::{AppState, BridgeConfig, Secrets, build_router};
use chrono::Utc;
use tracing::{info, warn};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_CONFIG_PATH: &str = "bridge_config.toml";

/// Load and parse the configuration file.
/// A missing file is fine; every setting has a default.
fn load_config(path: &str) -> Result<BridgeConfig, BridgeError> {
    if !Path::new(path).exists() {
        return Ok(BridgeConfig::default());
    }

    let config_str = fs::read_to_string(path).map_err(|e| {
        BridgeError::ConfigError(format!("Failed to read config file '{}': {}", path, e))
    })?;

    let config: BridgeConfig = toml::from_str(&config_str).map_err(|e| {
        BridgeError::ConfigError(format!("Failed to parse config file '{}': {}", path, e))
    })?;

    Ok(config)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let config_path =
        std::env::var("BRIDGE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config: BridgeConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let crm: Arc<dyn CrmClient + Send + Sync> = match NotionClient::new(config.notion.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Failed to build Notion client: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        secrets: Secrets::from_env(),
        crm,
        start_time: Instant::now(),
        started_at: Utc::now(),
    });

    tracing_subscriber::fmt::init();

    // Missing secrets are not fatal at boot; the handler answers 500 until
    // they are set.
    if state.secrets.cal_webhook_secret.is_none() {
        warn!("CAL_WEBHOOK_SECRET is not set; webhook calls will be rejected");
    }
    if state.secrets.notion_api_key.is_none() {
        warn!("NOTION_API_KEY is not set; webhook calls will be rejected");
    }

    let app = build_router(state);

    info!("Listening on {}", bind_address);
    info!("Using config at {:?}", config_path);
    let listener = tokio::net::TcpListener::bind(bind_address).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
