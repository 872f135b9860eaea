//! Tag filtering of cards

use std::collections::BTreeSet;

use log::debug;

use crate::layout::CardId;
use crate::surface::Surface;

/// Set of engaged tag filters
///
/// Only membership matters; a card is shown when the set is empty or when it
/// carries at least one of the engaged tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    tags: BTreeSet<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `tag`, returning whether it is now engaged
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Visibility for a card whose tag membership is answered by `has_tag`
    pub fn allows(&self, mut has_tag: impl FnMut(&str) -> bool) -> bool {
        self.is_empty() || self.tags.iter().any(|t| has_tag(t.as_str()))
    }

    /// Visibility of a surface card under this filter
    pub fn allows_card<S: Surface + ?Sized>(&self, surface: &S, card: CardId) -> bool {
        self.allows(|tag| surface.has_tag(card, tag))
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Owns the active filter set and pushes its effect onto a surface
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    active: FilterSet,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &FilterSet {
        &self.active
    }

    /// Handle a click on the control carrying `tag`
    pub fn toggle<S: Surface + ?Sized>(&mut self, surface: &mut S, tag: &str) -> bool {
        let engaged = self.active.toggle(tag);
        surface.set_filter_active(tag, engaged);
        debug!(
            "filter '{}' {}, {} active",
            tag,
            if engaged { "engaged" } else { "released" },
            self.active.len()
        );
        self.apply(surface);
        engaged
    }

    /// Recompute visibility of every card
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        for card in surface.cards() {
            let visible = self.active.allows_card(&*surface, card);
            surface.set_visible(card, visible);
        }
    }
}
