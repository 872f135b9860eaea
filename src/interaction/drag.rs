//! Pointer dragging of cards
//!
//! Each card is either idle or pressed. Pressing records where the pointer
//! grabbed the card; while pressed, every move places the card so that the
//! grab point follows the pointer. Releases are observed page-wide, so a
//! drag survives the pointer leaving the card.

use std::collections::BTreeMap;

use log::trace;

use crate::layout::{CardId, Point};
use crate::surface::Surface;

/// First stacking index handed out is one above this
pub const BASE_Z_INDEX: u32 = 100;

/// Device a pointer event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A pointer position in the same coordinates as card positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub position: Point,
    pub source: PointerSource,
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            source: PointerSource::Mouse,
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            source: PointerSource::Touch,
        }
    }
}

/// State of one pressed card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub card: CardId,
    /// Pointer position minus card top-left at press time
    pub offset: Point,
    pub z_index: u32,
    pub source: PointerSource,
    /// At least one move happened while pressed
    pub moved: bool,
}

/// Tracks open drag sessions and the page-wide stacking counter
#[derive(Debug, Clone)]
pub struct DragController {
    sessions: BTreeMap<CardId, DragSession>,
    top_z_index: u32,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            sessions: BTreeMap::new(),
            top_z_index: BASE_Z_INDEX,
        }
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest stacking index handed out so far
    pub fn top_z_index(&self) -> u32 {
        self.top_z_index
    }

    pub fn session(&self, card: CardId) -> Option<&DragSession> {
        self.sessions.get(&card)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Pointer pressed on `card`: open (or reopen) its session
    pub fn pointer_down<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        card: CardId,
        input: PointerInput,
    ) -> DragSession {
        self.top_z_index += 1;
        let origin = surface.measure(card).origin();
        let session = DragSession {
            card,
            offset: input.position - origin,
            z_index: self.top_z_index,
            source: input.source,
            moved: false,
        };
        surface.set_stacking(card, session.z_index);
        surface.set_dragging(card, true);
        self.sessions.insert(card, session);
        trace!("card {} pressed at z {}", card.0, session.z_index);
        session
    }

    /// Pointer moved anywhere on the page.
    ///
    /// Returns true when the platform's default handling (touch scrolling)
    /// should be suppressed.
    pub fn pointer_move<S: Surface + ?Sized>(&mut self, surface: &mut S, input: PointerInput) -> bool {
        if self.sessions.is_empty() {
            return false;
        }
        for session in self.sessions.values_mut() {
            session.moved = true;
            surface.set_position(session.card, input.position - session.offset);
        }
        input.source == PointerSource::Touch
    }

    /// Pointer released anywhere on the page: close every open session
    pub fn pointer_up<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Vec<DragSession> {
        let closed: Vec<DragSession> = std::mem::take(&mut self.sessions).into_values().collect();
        for session in &closed {
            surface.set_dragging(session.card, false);
        }
        closed
    }
}
