//! Project records and their materialization as cards
//!
//! Records come from `projects.json`, written by the content sync. Each one
//! becomes a random card tagged with the project's tags so the filter
//! controls can select it.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::layout::PlacementKind;
use crate::surface::MemoryCard;

/// Image used when a record has no cover
pub const DEFAULT_IMAGE: &str = "images/default.jpg";

/// Image swapped in by the page when a cover fails to load
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x150?text=No+Image";

/// Page showing a single project
pub const DETAIL_PAGE: &str = "project_detail.html";

/// Muted inline look of the date line under a card title
const DATE_STYLE: &str = "opacity: 0.4; font-size: 0.8rem; margin-top:5px; display:block;";

fn default_github() -> String {
    "#".to_string()
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

/// One entry of the project exchange file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_github")]
    pub github: String,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default)]
    pub content: String,
    /// Overrides the generated detail-page link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
            description: String::new(),
            date: String::new(),
            github: default_github(),
            image: default_image(),
            content: String::new(),
            link: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Parse the exchange format: a JSON array of records
pub fn parse_projects(json: &str) -> Result<Vec<ProjectRecord>, ProjectError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse an exchange file
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    parse_projects(&content)
}

/// Like [`parse_projects`], treating any failure as "no projects"
pub fn parse_projects_lenient(json: &str) -> Vec<ProjectRecord> {
    parse_projects(json).unwrap_or_else(|e| {
        warn!("project data unavailable, continuing without project cards: {}", e);
        Vec::new()
    })
}

/// Like [`load_projects`], treating any failure as "no projects"
pub fn load_projects_lenient(path: &Path) -> Vec<ProjectRecord> {
    load_projects(path).unwrap_or_else(|e| {
        warn!("project data unavailable, continuing without project cards: {}", e);
        Vec::new()
    })
}

/// Turn a tag into a single class token
pub fn tag_class(tag: &str) -> Option<String> {
    let token = tag.split_whitespace().collect::<Vec<_>>().join("-");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Everything needed to put a project card on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSpec {
    pub classes: Vec<String>,
    pub tags: Vec<String>,
    pub href: String,
    pub image: String,
    pub title: String,
    pub date: String,
}

impl CardSpec {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let tags: Vec<String> = record.tags.iter().filter_map(|t| tag_class(t)).collect();
        let classes = ["card", PlacementKind::Random.class_name(), "projects"]
            .into_iter()
            .map(String::from)
            .chain(tags.iter().cloned())
            .collect();
        let href = record
            .link
            .clone()
            .unwrap_or_else(|| format!("{}?id={}", DETAIL_PAGE, record.id));

        Self {
            classes,
            tags,
            href,
            image: record.image.clone(),
            title: record.title.clone(),
            date: record.date.clone(),
        }
    }

    /// Value of the card element's class attribute
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// Markup placed inside the card element
    pub fn inner_html(&self) -> String {
        format!(
            concat!(
                "<img src=\"{image}\" alt=\"{title}\" onerror=\"this.src='{placeholder}'\">\n",
                "<a class=\"card-name card-link\" href=\"{href}\">\n",
                "    <span>{title}</span>\n",
                "</a>\n",
                "<span class=\"card-name\" style=\"{date_style}\">{date}</span>",
            ),
            image = escape_html(&self.image),
            title = escape_html(&self.title),
            placeholder = PLACEHOLDER_IMAGE,
            href = escape_html(&self.href),
            date = escape_html(&self.date),
            date_style = DATE_STYLE,
        )
    }

    /// Complete card element
    pub fn to_html(&self) -> String {
        let inner = self
            .inner_html()
            .lines()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        format!("<div class=\"{}\">\n{}\n</div>", escape_html(&self.class_attr()), inner)
    }

    /// In-memory counterpart, unmeasured until rendered
    pub fn to_memory_card(&self) -> MemoryCard {
        let card = MemoryCard::random(None)
            .with_tags(self.tags.iter().cloned())
            .with_title(self.title.clone());
        if self.date.is_empty() {
            card
        } else {
            card.with_caption(self.date.clone())
        }
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
