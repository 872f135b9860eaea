//! Board descriptions for offline previews
//!
//! A board file stands in for the page markup: viewport size, the reserved
//! bands, the filter controls and any author-placed cards.
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//! header = 80
//! footer = 60
//! filter_bar = 40
//! filters = ["web", "design"]
//!
//! [layout]
//! overlap_ratio = 0.45
//!
//! [[cards]]
//! kind = "fixed"
//! x = 40
//! y = 120
//! width = 220
//! height = 140
//! title = "About me"
//! tags = ["about"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::BoardError;
use crate::layout::{BoundingBox, LayoutConfig, Size};
use crate::project::tag_class;
use crate::surface::{MemoryCard, MemorySurface};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
    pub header: Option<f64>,
    pub footer: Option<f64>,
    pub filter_bar: Option<f64>,
    pub filters: Vec<String>,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            header: Some(80.0),
            footer: Some(60.0),
            filter_bar: None,
            filters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Fixed,
    Random,
    Free,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardEntry {
    pub kind: CardKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CardEntry {
    fn size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(Size::new(w, h)),
            _ => None,
        }
    }

    fn bounds(&self, index: usize) -> Result<BoundingBox, BoardError> {
        match (self.x, self.y, self.size()) {
            (Some(x), Some(y), Some(size)) => Ok(BoundingBox::new(x, y, size.width, size.height)),
            _ => Err(BoardError::Invalid(format!(
                "card #{} is positioned by the author and needs x, y, width and height",
                index + 1
            ))),
        }
    }

    fn to_card(&self, index: usize) -> Result<MemoryCard, BoardError> {
        let card = match self.kind {
            CardKind::Fixed => MemoryCard::fixed(self.bounds(index)?),
            CardKind::Free => MemoryCard::free(self.bounds(index)?),
            CardKind::Random => MemoryCard::random(self.size()),
        };
        // Same class tokens as project cards, so one filter selects both
        let card = card.with_tags(self.tags.iter().filter_map(|t| tag_class(t)));
        let card = match &self.title {
            Some(title) => card.with_title(title.clone()),
            None => card,
        };
        Ok(match &self.caption {
            Some(caption) => card.with_caption(caption.clone()),
            None => card,
        })
    }
}

/// Parsed board file
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BoardSpec {
    pub viewport: ViewportSpec,
    pub layout: LayoutConfig,
    pub cards: Vec<CardEntry>,
}

impl BoardSpec {
    pub fn from_file(path: &Path) -> Result<Self, BoardError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, BoardError> {
        let board: BoardSpec = toml::from_str(content)?;
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<(), BoardError> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(BoardError::Invalid(format!(
                "viewport must have a positive size, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(0.0..=1.0).contains(&self.layout.overlap_ratio) {
            return Err(BoardError::Invalid(format!(
                "overlap_ratio must be between 0 and 1, got {}",
                self.layout.overlap_ratio
            )));
        }
        Ok(())
    }

    /// Build the in-memory page the board describes
    pub fn to_surface(&self) -> Result<MemorySurface, BoardError> {
        let vp = &self.viewport;
        let mut surface = MemorySurface::new(vp.width, vp.height);
        if let Some(h) = vp.header {
            surface = surface.with_header(h);
        }
        if let Some(h) = vp.footer {
            surface = surface.with_footer(h);
        }
        if vp.filter_bar.is_some() || !vp.filters.is_empty() {
            let filters = vp.filters.iter().filter_map(|t| tag_class(t));
            surface = surface.with_filter_bar(vp.filter_bar.unwrap_or(0.0), filters);
        }
        for (index, entry) in self.cards.iter().enumerate() {
            surface.push_card(entry.to_card(index)?);
        }
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CardId, PlacementKind};
    use crate::controller::BoardController;
    use crate::layout::FixedRandom;
    use crate::project::{CardSpec, ProjectRecord};
    use crate::surface::{Band, Surface};

    const BOARD: &str = r#"
[viewport]
width = 1024
height = 768
header = 80
footer = 60
filter_bar = 40
filters = ["web", "design"]

[layout]
max_attempts = 10

[[cards]]
kind = "fixed"
x = 10
y = 10
width = 200
height = 100
title = "About me"
tags = ["about"]

[[cards]]
kind = "random"
width = 250
height = 200
"#;

    #[test]
    fn test_parse_board() {
        let board = BoardSpec::from_str(BOARD).unwrap();
        assert_eq!(board.layout.max_attempts, 10);
        assert_eq!(board.layout.overlap_ratio, 0.45);
        assert_eq!(board.cards.len(), 2);

        let surface = board.to_surface().unwrap();
        assert_eq!(surface.band_height(Band::FilterBar), 40.0);
        assert_eq!(surface.cards_of_kind(PlacementKind::Fixed), vec![CardId(0)]);
        assert_eq!(surface.filter_active("design"), Some(false));
        assert_eq!(surface.card(CardId(0)).unwrap().title.as_deref(), Some("About me"));
    }

    #[test]
    fn test_empty_board_uses_defaults() {
        let board = BoardSpec::from_str("").unwrap();
        assert_eq!(board, BoardSpec::default());
        let surface = board.to_surface().unwrap();
        assert_eq!(surface.band_height(Band::Header), 80.0);
        assert_eq!(surface.band_height(Band::FilterBar), 0.0);
    }

    #[test]
    fn test_fixed_card_needs_geometry() {
        let board = BoardSpec::from_str("[[cards]]\nkind = \"fixed\"\nx = 1\n").unwrap();
        let err = board.to_surface().unwrap_err();
        assert!(err.to_string().contains("card #1"));
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let err = BoardSpec::from_str("[viewport]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, BoardError::Invalid(_)));
    }

    #[test]
    fn test_board_and_project_tags_filter_alike() {
        let board = BoardSpec::from_str(concat!(
            "[viewport]\nfilters = [\"data viz\"]\n",
            "[[cards]]\nkind = \"fixed\"\nx = 0\ny = 100\nwidth = 100\nheight = 100\ntags = [\"data viz\", \" \"]\n",
        ))
        .unwrap();
        let mut surface = board.to_surface().unwrap();
        let record = ProjectRecord::new("p", "Charts").with_tags(["data viz"]);
        surface.push_card(CardSpec::from_record(&record).to_memory_card());

        let tags: Vec<&str> = surface.card(CardId(0)).unwrap().tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["data-viz"]);
        assert_eq!(surface.filter_active("data-viz"), Some(false));

        let mut controller = BoardController::new(LayoutConfig::default(), FixedRandom(0.5));
        controller.toggle_filter(&mut surface, "data-viz");
        assert_eq!(surface.visibility(), vec![true, true]);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = BoardSpec::from_str("[[cards]]\nkind = \"floating\"\n").unwrap_err();
        assert!(matches!(err, BoardError::ParseError(_)));
    }
}
