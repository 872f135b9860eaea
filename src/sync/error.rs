//! Error types for the content sync

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while pulling project data
#[derive(Debug, Error)]
pub enum SyncError {
    /// Required environment variables are not set
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    /// Transport-level failure talking to the content API
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The content API answered with an error object
    #[error("content API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Likely fix for well-known API failures
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Api { code, .. } if code == "object_not_found" => Some(
                "the data source id may be wrong, or the integration is not connected to the database",
            ),
            Self::Api { code, .. } if code == "unauthorized" => Some("the API key is wrong"),
            Self::MissingVariables(_) => Some("set them in the environment or in a .env file"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_for_known_codes() {
        assert!(SyncError::api(404, "object_not_found", "nope")
            .hint()
            .unwrap()
            .contains("data source id"));
        assert!(SyncError::api(401, "unauthorized", "nope")
            .hint()
            .unwrap()
            .contains("API key"));
        assert_eq!(SyncError::api(500, "internal_server_error", "boom").hint(), None);
    }

    #[test]
    fn test_missing_variables_display() {
        let err = SyncError::MissingVariables(vec!["NOTION_API_KEY".into(), "NOTION_DATASOURCE_ID".into()]);
        assert_eq!(
            err.to_string(),
            "missing environment variables: NOTION_API_KEY, NOTION_DATASOURCE_ID"
        );
    }
}
