//! Outbound client for the CRM's record-creation API

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::NotionConfig;
use crate::error::{BridgeError, Result};
use crate::webhook::LeadDraft;

const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";
const NOTION_VERSION: &str = "2022-06-28";

/// Interface to the CRM's create-record operation.
///
/// The handler holds this as a trait object so tests can substitute a fake
/// client. The API key is passed per call because secrets are gated on
/// every request, not at construction.
#[async_trait]
pub trait CrmClient {
    async fn create_lead(&self, api_key: &str, draft: &LeadDraft) -> Result<()>;
}

/// Creates lead pages in a fixed Notion database.
pub struct NotionClient {
    client: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl CrmClient for NotionClient {
    async fn create_lead(&self, api_key: &str, draft: &LeadDraft) -> Result<()> {
        let body = page_body(&self.config.database_id, draft);

        let response = self
            .client
            .post(NOTION_PAGES_URL)
            .bearer_auth(api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BridgeError::CrmRejected {
                status: status.as_u16(),
                detail,
            });
        }

        debug!("Notion accepted lead page in database {}", self.config.database_id);
        Ok(())
    }
}

/// Builds the Notion page-creation body for a lead draft.
fn page_body(database_id: &str, draft: &LeadDraft) -> serde_json::Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": { "title": [{ "text": { "content": draft.name.as_str() } }] },
            "Email": { "email": draft.email.as_deref() },
            "Company": { "rich_text": [{ "text": { "content": draft.company.as_str() } }] },
            "domain": { "url": draft.domain_url.as_deref() },
            "Source": { "select": { "name": draft.source } },
            "Status": { "select": { "name": draft.status } },
            "First Contacted": { "date": { "start": draft.first_contacted.as_str() } },
            "Notes": { "rich_text": [{ "text": { "content": draft.notes.as_str() } }] },
        }
    })
}
