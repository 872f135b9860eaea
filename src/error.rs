//! Error types for project data and board descriptions

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading the project exchange file
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("failed to read project data '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed project data: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading a board description
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("failed to read board file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse board TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid board: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ProjectError::io(
            "projects.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("projects.json"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_json_error_display() {
        let err: ProjectError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("malformed project data"));
    }
}
