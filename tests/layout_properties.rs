//! Properties of layout passes, filtering and dragging over many seeds

use portfolio_board::interaction::{FilterSet, PointerInput, BASE_Z_INDEX};
use portfolio_board::layout::{
    obstacle_order, BoundingBox, CardId, LayoutConfig, LayoutEngine, PlacementKind, Point, RngSource, Size,
};
use portfolio_board::{BoardController, MemoryCard, MemorySurface, Surface};

fn page() -> MemorySurface {
    MemorySurface::new(1280.0, 900.0)
        .with_header(80.0)
        .with_footer(60.0)
        .with_filter_bar(40.0, ["web", "design", "data"])
        .with_card(MemoryCard::fixed(BoundingBox::new(40.0, 140.0, 300.0, 180.0)).with_tags(["about"]))
        .with_card(MemoryCard::random(Some(Size::new(250.0, 200.0))).with_tags(["web"]))
        .with_card(MemoryCard::random(Some(Size::new(220.0, 180.0))).with_tags(["design"]))
        .with_card(MemoryCard::fixed(BoundingBox::new(900.0, 500.0, 200.0, 150.0)))
        .with_card(MemoryCard::random(None).with_tags(["web", "data"]))
        .with_card(MemoryCard::random(Some(Size::new(250.0, 200.0))))
}

#[test]
fn test_accepted_positions_respect_overlap_limit() {
    for seed in 0..200 {
        let mut surface = page();
        let mut engine = LayoutEngine::new(LayoutConfig::default(), RngSource::seeded(seed));
        let pass = engine.layout_cards(&mut surface, &FilterSet::default());

        for placement in pass.placements.iter().filter(|p| !p.exhausted) {
            let bounds = placement.bounds();
            let limit = 0.45 * bounds.area();
            let earlier = pass
                .obstacles
                .iter()
                .take_while(|o| o.card != placement.card);
            for obstacle in earlier {
                assert!(
                    obstacle.bounds().intersection_area(&bounds) <= limit,
                    "seed {}: card {} overlaps card {} too much",
                    seed,
                    placement.card.0,
                    obstacle.card.0
                );
            }
        }
    }
}

#[test]
fn test_positions_stay_in_usable_ranges() {
    for seed in 0..100 {
        let mut surface = page();
        let mut engine = LayoutEngine::new(LayoutConfig::default(), RngSource::seeded(seed));
        let pass = engine.layout_cards(&mut surface, &FilterSet::default());

        for placement in &pass.placements {
            let size = placement.size;
            let max_x = 1280.0 - size.width - 20.0;
            let top = 80.0 + 40.0;
            let max_y = top + (900.0 - 80.0 - 60.0 - 40.0 - size.height - 100.0);
            assert!(placement.position.x >= 0.0 && placement.position.x <= max_x);
            assert!(placement.position.y >= top && placement.position.y <= max_y);
            assert!(placement.rotation >= -15.0 && placement.rotation <= 15.0);
            assert!(placement.attempts >= 1 && placement.attempts <= 40);
        }
    }
}

#[test]
fn test_unmeasured_cards_use_default_size() {
    let mut surface = page();
    let mut engine = LayoutEngine::new(LayoutConfig::default(), RngSource::seeded(3));
    let pass = engine.layout_cards(&mut surface, &FilterSet::default());
    assert_eq!(pass.placement(CardId(4)).map(|p| p.size), Some(Size::new(250.0, 200.0)));
}

#[test]
fn test_obstacles_list_fixed_then_random() {
    let mut surface = page();
    let mut engine = LayoutEngine::new(LayoutConfig::default(), RngSource::seeded(11));
    let pass = engine.layout_cards(&mut surface, &FilterSet::default());

    assert_eq!(
        obstacle_order(&pass),
        vec![CardId(0), CardId(3), CardId(1), CardId(2), CardId(4), CardId(5)]
    );
    assert_eq!(pass.obstacles[0].bounds(), BoundingBox::new(40.0, 140.0, 300.0, 180.0));
}

#[test]
fn test_fixed_cards_never_move() {
    let mut surface = page();
    let before: Vec<Point> = surface
        .cards_of_kind(PlacementKind::Fixed)
        .into_iter()
        .map(|c| surface.measure(c).origin())
        .collect();
    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(5));
    controller.layout(&mut surface);
    controller.layout(&mut surface);
    let after: Vec<Point> = surface
        .cards_of_kind(PlacementKind::Fixed)
        .into_iter()
        .map(|c| surface.measure(c).origin())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_filters_show_cards_with_any_active_tag() {
    let mut surface = page();
    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(1));
    controller.layout(&mut surface);
    assert!(surface.visibility().iter().all(|v| *v));

    controller.toggle_filter(&mut surface, "web");
    assert_eq!(surface.visibility(), vec![false, true, false, false, true, false]);

    controller.toggle_filter(&mut surface, "design");
    assert_eq!(surface.visibility(), vec![false, true, true, false, true, false]);

    // Relayout keeps the filter applied
    controller.layout(&mut surface);
    assert_eq!(surface.visibility(), vec![false, true, true, false, true, false]);

    controller.toggle_filter(&mut surface, "web");
    controller.toggle_filter(&mut surface, "design");
    assert!(surface.visibility().iter().all(|v| *v));
    assert_eq!(surface.filter_active("web"), Some(false));
}

#[test]
fn test_drag_keeps_grab_offset() {
    let mut surface = page();
    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(8));
    controller.layout(&mut surface);

    let origin = surface.measure(CardId(0)).origin();
    let session = controller.pointer_down(&mut surface, CardId(0), PointerInput::mouse(origin.x + 30.0, origin.y + 10.0));
    assert_eq!(session.z_index, BASE_Z_INDEX + 1);

    controller.pointer_move(&mut surface, PointerInput::mouse(500.0, 400.0));
    assert_eq!(surface.measure(CardId(0)).origin(), Point::new(470.0, 390.0));
    assert!(surface.card(CardId(0)).is_some_and(|c| c.dragging));

    let closed = controller.pointer_up(&mut surface);
    assert_eq!(closed.len(), 1);
    assert!(!surface.card(CardId(0)).is_some_and(|c| c.dragging));

    // Moves after release do nothing
    controller.pointer_move(&mut surface, PointerInput::mouse(10.0, 10.0));
    assert_eq!(surface.measure(CardId(0)).origin(), Point::new(470.0, 390.0));

    let again = controller.pointer_down(&mut surface, CardId(1), PointerInput::touch(0.0, 0.0));
    assert_eq!(again.z_index, BASE_Z_INDEX + 2);
}

#[test]
fn test_touch_moves_suppress_scrolling_only_while_dragging() {
    let mut surface = page();
    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(8));
    assert!(!controller.pointer_move(&mut surface, PointerInput::touch(1.0, 1.0)));

    controller.pointer_down(&mut surface, CardId(3), PointerInput::touch(950.0, 550.0));
    assert!(controller.pointer_move(&mut surface, PointerInput::touch(960.0, 560.0)));
    assert!(!controller.pointer_move(&mut surface, PointerInput::mouse(960.0, 560.0)));
}

#[test]
fn test_resize_burst_relayouts_once() {
    let mut surface = page();
    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(2));
    controller.layout(&mut surface);

    for t in [0.0, 50.0, 120.0, 180.0] {
        controller.viewport_resized(t);
        assert!(controller.poll_resize(&mut surface, t).is_none());
    }
    surface.resize(800.0, 700.0);
    assert!(controller.poll_resize(&mut surface, 379.0).is_none());
    let pass = controller.poll_resize(&mut surface, 380.0);
    assert!(pass.is_some());
    assert!(controller.poll_resize(&mut surface, 1000.0).is_none());
}

#[test]
fn test_empty_page_is_a_noop() {
    let mut surface = MemorySurface::new(1024.0, 768.0);
    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(0));
    let pass = controller.layout(&mut surface);
    assert!(pass.obstacles.is_empty());
    assert!(pass.placements.is_empty());
}
