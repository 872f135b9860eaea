//! Single owner of the page's mutable state
//!
//! The filter set, the stacking counter, open drag sessions and the resize
//! debouncer all live here; event handlers receive the controller and a
//! surface rather than reaching for shared globals. Independent controllers
//! can drive independent surfaces.

use crate::interaction::{Debouncer, DragController, DragSession, FilterController, FilterSet, PointerInput};
use crate::layout::{CardId, LayoutConfig, LayoutEngine, LayoutPass, RandomSource};
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct BoardController<R> {
    engine: LayoutEngine<R>,
    filters: FilterController,
    drag: DragController,
    resize: Debouncer,
}

impl<R: RandomSource> BoardController<R> {
    pub fn new(config: LayoutConfig, random: R) -> Self {
        Self {
            engine: LayoutEngine::new(config, random),
            filters: FilterController::new(),
            drag: DragController::new(),
            resize: Debouncer::default(),
        }
    }

    pub fn engine(&self) -> &LayoutEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine<R> {
        &mut self.engine
    }

    pub fn active_filters(&self) -> &FilterSet {
        self.filters.active()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Recompute every random card's position under the current filters
    pub fn layout<S: Surface + ?Sized>(&mut self, surface: &mut S) -> LayoutPass {
        self.engine.layout_cards(surface, self.filters.active())
    }

    /// Filter control for `tag` clicked
    pub fn toggle_filter<S: Surface + ?Sized>(&mut self, surface: &mut S, tag: &str) -> bool {
        self.filters.toggle(surface, tag)
    }

    pub fn pointer_down<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        card: CardId,
        input: PointerInput,
    ) -> DragSession {
        self.drag.pointer_down(surface, card, input)
    }

    /// Returns true when the platform default should be suppressed
    pub fn pointer_move<S: Surface + ?Sized>(&mut self, surface: &mut S, input: PointerInput) -> bool {
        self.drag.pointer_move(surface, input)
    }

    pub fn pointer_up<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Vec<DragSession> {
        self.drag.pointer_up(surface)
    }

    /// Viewport size changed at `now_ms`
    pub fn viewport_resized(&mut self, now_ms: f64) {
        self.resize.schedule(now_ms);
    }

    /// Run the deferred layout once the resize burst has settled
    pub fn poll_resize<S: Surface + ?Sized>(&mut self, surface: &mut S, now_ms: f64) -> Option<LayoutPass> {
        if self.resize.poll(now_ms) {
            Some(self.layout(surface))
        } else {
            None
        }
    }

    pub fn resize_delay_ms(&self) -> f64 {
        self.resize.delay_ms()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout::{BoundingBox, Point, RngSource, Size};
    use crate::surface::{MemoryCard, MemorySurface};

    fn page() -> MemorySurface {
        MemorySurface::new(1024.0, 768.0)
            .with_header(80.0)
            .with_footer(60.0)
            .with_filter_bar(40.0, ["web", "design"])
            .with_card(MemoryCard::fixed(BoundingBox::new(10.0, 10.0, 200.0, 100.0)))
            .with_card(MemoryCard::random(Some(Size::new(250.0, 200.0))).with_tags(["web"]))
            .with_card(MemoryCard::random(Some(Size::new(250.0, 200.0))).with_tags(["design"]))
            .with_card(MemoryCard::random(Some(Size::new(250.0, 200.0))).with_tags(["web", "design"]))
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = page();
        let mut b = page();
        let pass_a = BoardController::new(LayoutConfig::default(), RngSource::seeded(42)).layout(&mut a);
        let pass_b = BoardController::new(LayoutConfig::default(), RngSource::seeded(42)).layout(&mut b);
        assert_eq!(pass_a, pass_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_filter_then_relayout_keeps_visibility() {
        let mut surface = page();
        let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(1));
        controller.layout(&mut surface);
        controller.toggle_filter(&mut surface, "web");
        assert_eq!(surface.visibility(), vec![false, true, false, true]);

        controller.layout(&mut surface);
        assert_eq!(surface.visibility(), vec![false, true, false, true]);
    }

    #[test]
    fn test_resize_burst_triggers_single_layout() {
        let mut surface = page();
        let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(9));
        controller.viewport_resized(0.0);
        surface.resize(900.0, 700.0);
        controller.viewport_resized(120.0);
        assert!(controller.poll_resize(&mut surface, 250.0).is_none());
        let pass = controller.poll_resize(&mut surface, 320.0);
        assert_eq!(pass.map(|p| p.placements.len()), Some(3));
        assert!(controller.poll_resize(&mut surface, 900.0).is_none());
    }

    #[test]
    fn test_drag_after_layout() {
        let mut surface = page();
        let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(4));
        let pass = controller.layout(&mut surface);
        let placed = pass.placement(CardId(1)).unwrap().position;

        let grab = placed + Point::new(5.0, 5.0);
        controller.pointer_down(&mut surface, CardId(1), PointerInput::mouse(grab.x, grab.y));
        controller.pointer_move(&mut surface, PointerInput::mouse(grab.x + 40.0, grab.y - 10.0));
        controller.pointer_up(&mut surface);

        let card = surface.card(CardId(1)).unwrap();
        let expected = placed + Point::new(40.0, -10.0);
        assert!((card.position.x - expected.x).abs() < 1e-9);
        assert!((card.position.y - expected.y).abs() < 1e-9);
        assert!(!card.dragging);
        assert_eq!(card.z_index, Some(101));
    }
}
