//! HTTP client for the content API

use log::debug;
use reqwest::blocking::Client;

use super::config::SyncConfig;
use super::error::SyncError;
use super::notion::{ApiErrorBody, QueryRequest, QueryResponse};

/// API version the payload shapes follow
pub const NOTION_VERSION: &str = "2025-09-03";

/// Anything that can answer paged data-source queries
pub trait PageSource {
    fn query(&self, cursor: Option<String>) -> Result<QueryResponse, SyncError>;
}

/// Blocking client for one data source
pub struct NotionClient {
    http: Client,
    config: SyncConfig,
}

impl NotionClient {
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}

impl PageSource for NotionClient {
    fn query(&self, cursor: Option<String>) -> Result<QueryResponse, SyncError> {
        let url = self.config.query_url();
        debug!("POST {} (cursor: {:?})", url, cursor);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&QueryRequest::by_name(cursor))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let error: ApiErrorBody = serde_json::from_str(&body).unwrap_or(ApiErrorBody {
                code: String::new(),
                message: body.clone(),
            });
            return Err(SyncError::api(status.as_u16(), error.code, error.message));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
