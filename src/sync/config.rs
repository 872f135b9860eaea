//! Configuration for the content sync

use std::path::PathBuf;

use super::error::SyncError;

pub const API_KEY_VAR: &str = "NOTION_API_KEY";
pub const DATA_SOURCE_VAR: &str = "NOTION_DATASOURCE_ID";

pub const DEFAULT_API_BASE: &str = "https://api.notion.com";
pub const DEFAULT_OUTPUT: &str = "projects.json";

/// Credentials and destinations for one sync run
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub api_key: String,
    pub data_source_id: String,
    /// Scheme and host of the content API
    pub api_base: String,
    /// Where the exchange file is written
    pub output: PathBuf,
}

impl SyncConfig {
    pub fn new(api_key: impl Into<String>, data_source_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            data_source_id: data_source_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    /// Read credentials from the process environment, loading `.env` first
    pub fn from_env() -> Result<Self, SyncError> {
        // A missing .env file is fine; variables may come from the shell.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, reporting every missing variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SyncError> {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let api_key = read(API_KEY_VAR);
        let data_source_id = read(DATA_SOURCE_VAR);

        match (api_key, data_source_id) {
            (Some(key), Some(id)) => Ok(Self::new(key, id)),
            (key, id) => {
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push(API_KEY_VAR.to_string());
                }
                if id.is_none() {
                    missing.push(DATA_SOURCE_VAR.to_string());
                }
                Err(SyncError::MissingVariables(missing))
            }
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Endpoint listing the data source's pages
    pub fn query_url(&self) -> String {
        format!("{}/v1/data_sources/{}/query", self.api_base, self.data_source_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_reads_both_variables() {
        let config = SyncConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret_abc"),
            (DATA_SOURCE_VAR, "ds-1"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "secret_abc");
        assert_eq!(config.output, PathBuf::from("projects.json"));
        assert_eq!(
            config.query_url(),
            "https://api.notion.com/v1/data_sources/ds-1/query"
        );
    }

    #[test]
    fn test_reports_each_missing_variable() {
        let err = SyncConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        match err {
            SyncError::MissingVariables(names) => {
                assert_eq!(names, vec![API_KEY_VAR, DATA_SOURCE_VAR]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let config = SyncConfig::new("k", "ds").with_api_base("http://localhost:8080/");
        assert_eq!(config.query_url(), "http://localhost:8080/v1/data_sources/ds/query");
    }
}
