//! Inbound booking payload structures and the CRM field mapping

use chrono::Utc;
use serde::Deserialize;

/// Trigger event that produces a CRM record. Everything else is
/// acknowledged and ignored.
pub const BOOKING_CREATED: &str = "BOOKING_CREATED";

/// Top-level webhook body sent by the scheduling platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEvent {
    #[serde(default)]
    pub trigger_event: String,
    #[serde(default)]
    pub payload: BookingPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPayload {
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub responses: BookingResponses,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attendee {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Answers to the custom booking-form questions, keyed by slug on the wire.
/// Slugs other than these three are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingResponses {
    pub how_found: Option<ResponseValue>,
    pub notes: Option<ResponseValue>,
    pub domain: Option<ResponseValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseValue {
    #[serde(default)]
    pub value: String,
}

impl BookingResponses {
    fn answer(slot: &Option<ResponseValue>) -> &str {
        slot.as_ref().map(|r| r.value.as_str()).unwrap_or("")
    }

    pub fn how_found(&self) -> &str {
        Self::answer(&self.how_found)
    }

    pub fn notes(&self) -> &str {
        Self::answer(&self.notes)
    }

    pub fn domain(&self) -> &str {
        Self::answer(&self.domain)
    }
}

/// Data extracted from the booking payload
/// This data is sent to the CRM as a new lead record
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub email: Option<String>,
    pub company: String,
    pub domain_url: Option<String>,
    pub source: &'static str,
    pub status: &'static str,
    pub first_contacted: String,
    pub notes: String,
}

impl LeadDraft {
    /// Maps a booking payload onto the CRM record shape.
    ///
    /// Only the first attendee is considered. Empty answers are treated the
    /// same as absent ones.
    pub fn from_payload(payload: &BookingPayload) -> Self {
        let attendee = payload.attendees.first().cloned().unwrap_or_default();

        let how_found = payload.responses.how_found();
        let additional_notes = payload.responses.notes();
        let domain = payload.responses.domain();

        let mut notes_parts: Vec<String> = Vec::new();
        if !how_found.is_empty() {
            notes_parts.push(format!("Found us: {}", how_found));
        }
        if !additional_notes.is_empty() {
            notes_parts.push(additional_notes.to_string());
        }

        Self {
            name: attendee
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            email: attendee.email.filter(|e| !e.is_empty()),
            company: String::new(),
            domain_url: if domain.is_empty() {
                None
            } else {
                Some(domain.to_string())
            },
            source: "Inbound",
            status: "New Lead",
            first_contacted: Utc::now().format("%Y-%m-%d").to_string(),
            notes: notes_parts.join("\n"),
        }
    }
}
