//! HTTP table-storage sink with bearer-token auth.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::MirrorSettings;

use super::{MirrorError, MirrorResult, MirrorRow, MirrorSink};

/// Base URL of the hosted table-storage API.
pub const TABLE_API_BASE: &str = "https://api.airtable.com/v0";

#[derive(Serialize)]
struct RowBody<'a> {
    fields: &'a MirrorRow,
}

/// Mirror sink that POSTs rows to a table-storage endpoint.
pub struct HttpTableSink {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpTableSink {
    /// Builds a sink from settings, or `None` when credentials are absent or
    /// still placeholders, in which case mirroring is skipped entirely.
    pub fn from_settings(settings: &MirrorSettings) -> Option<Self> {
        if !settings.is_configured() {
            return None;
        }
        Some(Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{TABLE_API_BASE}/{}/{}",
                settings.base_id, settings.table_name
            ),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl MirrorSink for HttpTableSink {
    async fn deliver(&mut self, row: &MirrorRow) -> MirrorResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&RowBody { fields: row })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MirrorError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}
