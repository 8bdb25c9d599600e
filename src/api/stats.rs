//! Status API endpoint

use axum::{Json, extract::State as AxumState};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::SharedState;

/// Server status
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub name: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
}

pub async fn root() -> &'static str {
    "cal_notion_bridge"
}

/// GET /status - Server liveness and uptime
pub async fn status(AxumState(state): AxumState<SharedState>) -> Json<ServerStatus> {
    Json(ServerStatus {
        name: "cal_notion_bridge".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        started_at: state.started_at,
    })
}
