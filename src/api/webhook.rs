//! Webhook handler for Cal.com booking events

use axum::{
    Json,
    body::Bytes,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};

use crate::SharedState;
use crate::utils::verify_cal_signature;
use crate::webhook::{BOOKING_CREATED, BookingEvent, LeadDraft};

const SIGNATURE_HEADER: &str = "x-cal-signature-256";

/// Handles the Cal.com webhook POST request.
///
/// The body arrives as raw `Bytes` so the signature is computed over the
/// exact bytes received; JSON parsing happens only after verification.
pub async fn handle_webhook(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Both secrets must be present. Checked on every request so a
    // misconfigured deployment fails closed instead of crashing at boot.
    let webhook_secret = state.secrets.cal_webhook_secret.as_deref();
    let notion_key = state.secrets.notion_api_key.as_deref();
    if webhook_secret.is_none() || notion_key.is_none() {
        error!(
            "Missing secrets: has_webhook_secret={}, has_notion_key={}",
            webhook_secret.is_some(),
            notion_key.is_some()
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Server misconfigured" })),
        )
            .into_response();
    }
    let webhook_secret = webhook_secret.unwrap();
    let notion_key = notion_key.unwrap();

    // Verify the sender's HMAC signature. A missing header is rejected
    // without computing a digest.
    let signature_opt = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    if signature_opt.is_none() {
        error!("No signature header supplied");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid signature" })),
        )
            .into_response();
    }
    if !verify_cal_signature(webhook_secret, &body, signature_opt.unwrap()) {
        error!("Signature verification failed");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid signature" })),
        )
            .into_response();
    }

    let event: BookingEvent = match serde_json::from_slice(&body) {
        Ok(ev) => ev,
        Err(e) => {
            info!("Could not parse JSON body: {:?}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON payload" })),
            )
                .into_response();
        }
    };

    // Only booking-created events produce a CRM record. Everything else is
    // acknowledged so the sender does not retry.
    if event.trigger_event != BOOKING_CREATED {
        info!("Skipping {:?} event", event.trigger_event);
        return (StatusCode::OK, Json(json!({ "skipped": true }))).into_response();
    }

    let draft = LeadDraft::from_payload(&event.payload);

    // One outbound call, no retry here. The sender applies its own retry
    // policy on a 500.
    match state.crm.create_lead(notion_key, &draft).await {
        Ok(()) => {
            info!("Created CRM lead '{}'", draft.name);
            (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
        }
        Err(e) => {
            error!("Notion API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create CRM entry" })),
            )
                .into_response()
        }
    }
}
