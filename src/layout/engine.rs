//! Random, overlap-bounded placement of cards
//!
//! Each pass starts from scratch: fixed cards are re-measured and become
//! obstacles, then every random card draws candidate positions until one
//! overlaps no obstacle by more than the configured share of its own area.
//! When the retry budget runs out the last candidate is kept, so a pass
//! always completes and may leave cards partially overlapping.

use log::debug;

use crate::interaction::FilterSet;
use crate::surface::{Band, Surface};

use super::config::LayoutConfig;
use super::random::RandomSource;
use super::types::{BoundingBox, CardId, LayoutPass, Placement, PlacementKind, PlacementRecord, Point, Size};

/// Heights of the page bands cards must stay clear of
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReservedBands {
    pub header: f64,
    pub footer: f64,
    pub filter_bar: f64,
}

impl ReservedBands {
    /// Measure the bands as currently rendered
    pub fn measure<S: Surface + ?Sized>(surface: &S) -> Self {
        Self {
            header: surface.band_height(Band::Header),
            footer: surface.band_height(Band::Footer),
            filter_bar: surface.band_height(Band::FilterBar),
        }
    }

    /// First y coordinate below the header and filter bar
    pub fn top(&self) -> f64 {
        self.header + self.filter_bar
    }
}

/// Region from which candidate origins are drawn for one card
///
/// Ranges may be negative when the card does not fit the viewport; draws are
/// taken as-is and the card ends up partly outside the visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsableArea {
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl UsableArea {
    pub fn new(config: &LayoutConfig, viewport: Size, bands: &ReservedBands, card: Size) -> Self {
        Self {
            top: bands.top(),
            width: viewport.width - card.width - config.horizontal_margin,
            height: viewport.height
                - bands.header
                - bands.footer
                - bands.filter_bar
                - card.height
                - config.vertical_margin,
        }
    }

    /// Map two unit draws to a candidate origin
    pub fn candidate(&self, rx: f64, ry: f64) -> Point {
        Point::new(rx * self.width, self.top + ry * self.height)
    }
}

/// Places random cards around fixed ones
#[derive(Debug, Clone)]
pub struct LayoutEngine<R> {
    config: LayoutConfig,
    random: R,
}

impl<R: RandomSource> LayoutEngine<R> {
    pub fn new(config: LayoutConfig, random: R) -> Self {
        Self { config, random }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn random_mut(&mut self) -> &mut R {
        &mut self.random
    }

    /// Run one layout pass over the surface.
    ///
    /// Every random card gets a new position and rotation; every fixed and
    /// random card gets its visibility set from `filters`.
    pub fn layout_cards<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        filters: &FilterSet,
    ) -> LayoutPass {
        let bands = ReservedBands::measure(&*surface);
        let viewport = surface.viewport();
        let mut pass = LayoutPass::new();

        for card in surface.cards_of_kind(PlacementKind::Fixed) {
            let bounds = surface.measure(card);
            pass.obstacles.push(PlacementRecord::new(card, bounds));
            let visible = filters.allows_card(&*surface, card);
            surface.set_visible(card, visible);
        }

        for card in surface.cards_of_kind(PlacementKind::Random) {
            let size = self.card_size(surface.measure(card).size());
            let area = UsableArea::new(&self.config, viewport, &bands, size);
            let (position, attempts, exhausted) = self.find_position(size, &area, &pass.obstacles);

            surface.set_position(card, position);
            let visible = filters.allows_card(&*surface, card);
            surface.set_visible(card, visible);

            let rotation = self.draw_rotation();
            surface.set_rotation(card, rotation);

            let placement = Placement {
                card,
                position,
                size,
                rotation,
                attempts,
                exhausted,
            };
            pass.obstacles.push(PlacementRecord::new(card, placement.bounds()));
            pass.placements.push(placement);
        }

        debug!(
            "layout pass over {}x{}: {} obstacles, {} placed",
            viewport.width,
            viewport.height,
            pass.obstacles.len(),
            pass.placements.len()
        );
        pass
    }

    /// Measured size, with each empty dimension replaced by the default
    fn card_size(&self, measured: Size) -> Size {
        let fallback = self.config.default_size();
        Size::new(
            if measured.width > 0.0 { measured.width } else { fallback.width },
            if measured.height > 0.0 { measured.height } else { fallback.height },
        )
    }

    /// Rejection sampling against the obstacles placed so far.
    ///
    /// Returns the chosen origin, the number of candidates drawn and whether
    /// the budget ran out.
    fn find_position(
        &mut self,
        size: Size,
        area: &UsableArea,
        obstacles: &[PlacementRecord],
    ) -> (Point, u32, bool) {
        let budget = self.config.max_attempts.max(1);
        let limit = self.config.overlap_ratio * size.area();
        let mut candidate = Point::default();

        for attempt in 1..=budget {
            let rx = self.random.next_unit();
            let ry = self.random.next_unit();
            candidate = area.candidate(rx, ry);

            let bounds = BoundingBox::from_origin(candidate, size);
            let too_much = obstacles
                .iter()
                .any(|o| o.bounds().intersection_area(&bounds) > limit);
            if !too_much {
                return (candidate, attempt, false);
            }
        }

        (candidate, budget, true)
    }

    fn draw_rotation(&mut self) -> f64 {
        let spread = self.config.max_rotation;
        self.random.next_unit() * spread * 2.0 - spread
    }
}

/// Card ids of a pass's obstacles, in list order
pub fn obstacle_order(pass: &LayoutPass) -> Vec<CardId> {
    pass.obstacles.iter().map(|o| o.card).collect()
}
