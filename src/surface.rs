//! Capability interface between the placement/interaction logic and a page
//!
//! Everything the engine and controllers need from the rendering
//! environment goes through [`Surface`]. The browser binding implements it
//! over real DOM nodes; [`MemorySurface`] is a plain in-memory page used by
//! the CLI preview and by tests.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::layout::{BoundingBox, CardId, PlacementKind, Point, Size};

/// Reserved horizontal bands of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Header,
    Footer,
    FilterBar,
}

/// What the layout engine and interaction controllers may query or change
pub trait Surface {
    /// Size of the visible viewport
    fn viewport(&self) -> Size;

    /// Rendered height of a band, 0 when the band is absent
    fn band_height(&self, band: Band) -> f64;

    /// Every card in page order
    fn cards(&self) -> Vec<CardId>;

    /// Cards carrying the given placement kind, in page order
    fn cards_of_kind(&self, kind: PlacementKind) -> Vec<CardId>;

    /// Current box relative to the positioning container.
    ///
    /// Width and height are 0 when the card is not rendered.
    fn measure(&self, card: CardId) -> BoundingBox;

    fn has_tag(&self, card: CardId, tag: &str) -> bool;

    fn set_position(&mut self, card: CardId, position: Point);

    fn set_rotation(&mut self, card: CardId, degrees: f64);

    fn set_visible(&mut self, card: CardId, visible: bool);

    fn set_stacking(&mut self, card: CardId, z_index: u32);

    fn set_dragging(&mut self, card: CardId, dragging: bool);

    /// Mark every filter control carrying `tag` as engaged or not
    fn set_filter_active(&mut self, tag: &str, active: bool);
}

/// One card of a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryCard {
    pub kind: Option<PlacementKind>,
    pub position: Point,
    /// `None` until the card has a rendered size
    pub size: Option<Size>,
    pub tags: BTreeSet<String>,
    pub rotation: f64,
    pub visible: bool,
    pub z_index: Option<u32>,
    pub dragging: bool,
    pub title: Option<String>,
    pub caption: Option<String>,
}

impl MemoryCard {
    fn with_kind(kind: Option<PlacementKind>) -> Self {
        Self {
            kind,
            position: Point::default(),
            size: None,
            tags: BTreeSet::new(),
            rotation: 0.0,
            visible: true,
            z_index: None,
            dragging: false,
            title: None,
            caption: None,
        }
    }

    /// An author-positioned card
    pub fn fixed(bounds: BoundingBox) -> Self {
        let mut card = Self::with_kind(Some(PlacementKind::Fixed));
        card.position = bounds.origin();
        card.size = Some(bounds.size());
        card
    }

    /// A card the engine places, with an optional rendered size
    pub fn random(size: Option<Size>) -> Self {
        let mut card = Self::with_kind(Some(PlacementKind::Random));
        card.size = size;
        card
    }

    /// A card that is draggable and filterable but never laid out
    pub fn free(bounds: BoundingBox) -> Self {
        let mut card = Self::with_kind(None);
        card.position = bounds.origin();
        card.size = Some(bounds.size());
        card
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// In-memory page model
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySurface {
    viewport: Size,
    header: Option<f64>,
    footer: Option<f64>,
    filter_bar: Option<f64>,
    cards: Vec<MemoryCard>,
    filter_controls: BTreeMap<String, bool>,
}

impl MemorySurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            header: None,
            footer: None,
            filter_bar: None,
            cards: Vec::new(),
            filter_controls: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, height: f64) -> Self {
        self.header = Some(height);
        self
    }

    pub fn with_footer(mut self, height: f64) -> Self {
        self.footer = Some(height);
        self
    }

    pub fn with_filter_bar<I, S>(mut self, height: f64, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_bar = Some(height);
        for tag in tags {
            self.filter_controls.insert(tag.into(), false);
        }
        self
    }

    pub fn with_card(mut self, card: MemoryCard) -> Self {
        self.cards.push(card);
        self
    }

    /// Append a card and return its id
    pub fn push_card(&mut self, card: MemoryCard) -> CardId {
        self.cards.push(card);
        CardId(self.cards.len() - 1)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    pub fn card(&self, id: CardId) -> Option<&MemoryCard> {
        self.cards.get(id.0)
    }

    pub fn all_cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    /// Whether the filter control for `tag` is engaged
    pub fn filter_active(&self, tag: &str) -> Option<bool> {
        self.filter_controls.get(tag).copied()
    }

    pub fn filter_tags(&self) -> impl Iterator<Item = &str> {
        self.filter_controls.keys().map(String::as_str)
    }

    /// Visibility of every card in page order
    pub fn visibility(&self) -> Vec<bool> {
        self.cards.iter().map(|c| c.visible).collect()
    }

    /// Box spanning the viewport, used as the preview canvas
    pub fn viewport_bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }
}

impl Surface for MemorySurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn band_height(&self, band: Band) -> f64 {
        let height = match band {
            Band::Header => self.header,
            Band::Footer => self.footer,
            Band::FilterBar => self.filter_bar,
        };
        height.unwrap_or(0.0)
    }

    fn cards(&self) -> Vec<CardId> {
        (0..self.cards.len()).map(CardId).collect()
    }

    fn cards_of_kind(&self, kind: PlacementKind) -> Vec<CardId> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == Some(kind))
            .map(|(i, _)| CardId(i))
            .collect()
    }

    fn measure(&self, card: CardId) -> BoundingBox {
        match self.cards.get(card.0) {
            Some(c) => {
                // Hidden cards have no rendered extent, same as display: none
                let size = match (c.visible, c.size) {
                    (true, Some(size)) => size,
                    _ => Size::default(),
                };
                BoundingBox::from_origin(c.position, size)
            }
            None => BoundingBox::zero(),
        }
    }

    fn has_tag(&self, card: CardId, tag: &str) -> bool {
        self.cards
            .get(card.0)
            .is_some_and(|c| c.tags.contains(tag))
    }

    fn set_position(&mut self, card: CardId, position: Point) {
        if let Some(c) = self.cards.get_mut(card.0) {
            c.position = position;
        }
    }

    fn set_rotation(&mut self, card: CardId, degrees: f64) {
        if let Some(c) = self.cards.get_mut(card.0) {
            c.rotation = degrees;
        }
    }

    fn set_visible(&mut self, card: CardId, visible: bool) {
        if let Some(c) = self.cards.get_mut(card.0) {
            c.visible = visible;
        }
    }

    fn set_stacking(&mut self, card: CardId, z_index: u32) {
        if let Some(c) = self.cards.get_mut(card.0) {
            c.z_index = Some(z_index);
        }
    }

    fn set_dragging(&mut self, card: CardId, dragging: bool) {
        if let Some(c) = self.cards.get_mut(card.0) {
            c.dragging = dragging;
        }
    }

    fn set_filter_active(&mut self, tag: &str, active: bool) {
        if let Some(state) = self.filter_controls.get_mut(tag) {
            *state = active;
        }
    }
}
