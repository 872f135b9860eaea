//! Data-source query payloads and their mapping onto project records

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::project::{ProjectRecord, DEFAULT_IMAGE};

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description.";

/// Body of a data-source query
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: String,
}

impl QueryRequest {
    /// Pages sorted by name, continuing from `cursor` when given
    pub fn by_name(cursor: Option<String>) -> Self {
        Self {
            sorts: vec![Sort {
                property: "Name".to_string(),
                direction: "ascending".to_string(),
            }],
            start_cursor: cursor,
            page_size: 100,
        }
    }
}

/// One page of query results
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<NotionPage>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error object returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
    #[serde(default)]
    pub cover: Option<Cover>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cover {
    External { external: FileRef },
    File { file: FileRef },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileRef {
    pub url: String,
}

impl NotionPage {
    fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// First text fragment of a title or rich-text property
    fn first_text(&self, name: &str) -> Option<String> {
        let fragments = match self.property(name)? {
            PropertyValue::Title { title } => title,
            PropertyValue::RichText { rich_text } => rich_text,
            _ => return None,
        };
        fragments
            .first()
            .map(|t| t.plain_text.clone())
            .filter(|t| !t.is_empty())
    }

    /// All text fragments of a rich-text property joined together
    fn full_text(&self, name: &str) -> Option<String> {
        match self.property(name)? {
            PropertyValue::RichText { rich_text } | PropertyValue::Title { title: rich_text } => {
                Some(rich_text.iter().map(|t| t.plain_text.as_str()).collect())
            }
            _ => None,
        }
    }

    fn tags(&self) -> Vec<String> {
        match self.property("Tags") {
            Some(PropertyValue::MultiSelect { multi_select }) => {
                multi_select.iter().map(|o| o.name.clone()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Date kept either as free text or as a date property
    fn date(&self) -> String {
        if let Some(text) = self.first_text("Date") {
            return text;
        }
        match self.property("Date") {
            Some(PropertyValue::Date { date: Some(date) }) => date.start.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn url(&self, name: &str) -> Option<String> {
        match self.property(name)? {
            PropertyValue::Url { url } => url.clone().filter(|u| !u.is_empty()),
            _ => None,
        }
    }

    fn cover_url(&self) -> Option<String> {
        match self.cover.as_ref()? {
            Cover::External { external } => Some(external.url.clone()),
            Cover::File { file } => Some(file.url.clone()),
            Cover::Unsupported => None,
        }
    }

    /// Map the page's properties onto the exchange format
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id.clone(),
            title: self.first_text("Name").unwrap_or_else(|| UNTITLED.to_string()),
            tags: self.tags(),
            description: self
                .first_text("Description")
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            date: self.date(),
            github: self.url("Github").unwrap_or_else(|| "#".to_string()),
            image: self.cover_url().unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            content: self.full_text("Content").unwrap_or_default(),
            link: None,
        }
    }
}
