//! The sync writes the project file, the board reads it back
#![cfg(not(target_arch = "wasm32"))]

use portfolio_board::interaction::PointerInput;
use portfolio_board::layout::{CardId, LayoutConfig, Point, RngSource};
use portfolio_board::project::{load_projects, load_projects_lenient};
use portfolio_board::sync::{sync_projects, PageSource, QueryResponse, SyncError};
use portfolio_board::{preview, BoardController, BoardSpec, CardSpec, PreviewConfig, Surface};
use tempfile::TempDir;

struct OnePage;

impl PageSource for OnePage {
    fn query(&self, cursor: Option<String>) -> Result<QueryResponse, SyncError> {
        assert!(cursor.is_none());
        let json = r#"{
            "results": [
                {
                    "id": "p-1",
                    "properties": {
                        "Name": {"type": "title", "title": [{"plain_text": "Mini Blog"}]},
                        "Tags": {"type": "multi_select", "multi_select": [{"name": "web"}, {"name": "side project"}]},
                        "Date": {"type": "rich_text", "rich_text": [{"plain_text": "2023.11"}]}
                    }
                },
                {"id": "p-2", "properties": {}}
            ],
            "has_more": false,
            "next_cursor": null
        }"#;
        Ok(serde_json::from_str(json)?)
    }
}

#[test]
fn test_synced_projects_become_cards() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("projects.json");
    let written = sync_projects(&OnePage, &output).unwrap();
    let loaded = load_projects(&output).unwrap();
    assert_eq!(written, loaded);

    let spec = CardSpec::from_record(&loaded[0]);
    assert_eq!(spec.class_attr(), "card random projects web side-project");
    assert_eq!(spec.href, "project_detail.html?id=p-1");

    let preview = preview(&BoardSpec::default(), &loaded, &PreviewConfig::new().with_seed(5)).unwrap();
    assert_eq!(preview.pass.placements.len(), 2);
    assert_eq!(
        preview.surface.all_cards()[1].title.as_deref(),
        Some("Untitled")
    );
}

#[test]
fn test_unreadable_project_file_means_no_cards() {
    let projects = load_projects_lenient(std::path::Path::new("/nonexistent/projects.json"));
    let preview = preview(&BoardSpec::default(), &projects, &PreviewConfig::default()).unwrap();
    assert!(preview.pass.placements.is_empty());
    assert!(preview.pass.obstacles.is_empty());
}

const FIXED_BOARD: &str = r#"
[viewport]
filter_bar = 40
filters = ["about", "contact"]

[[cards]]
kind = "fixed"
x = 40
y = 140
width = 300
height = 180
title = "About me"
tags = ["about"]

[[cards]]
kind = "fixed"
x = 900
y = 500
width = 200
height = 150
title = "Say hello"
tags = ["contact"]
"#;

#[test]
fn test_missing_project_file_keeps_fixed_cards_interactive() {
    let dir = TempDir::new().unwrap();
    let projects = load_projects_lenient(&dir.path().join("projects.json"));
    assert!(projects.is_empty());

    let board = BoardSpec::from_str(FIXED_BOARD).unwrap();
    let mut preview = preview(&board, &projects, &PreviewConfig::new().with_seed(3)).unwrap();
    let surface = &mut preview.surface;

    // Both fixed cards are obstacles and stay where the author put them
    assert!(preview.pass.placements.is_empty());
    assert_eq!(preview.pass.obstacles.len(), 2);
    assert_eq!(surface.measure(CardId(0)).origin(), Point::new(40.0, 140.0));
    assert_eq!(surface.measure(CardId(1)).origin(), Point::new(900.0, 500.0));
    assert_eq!(surface.visibility(), vec![true, true]);

    let mut controller = BoardController::new(LayoutConfig::default(), RngSource::seeded(3));
    controller.layout(surface);
    assert_eq!(surface.measure(CardId(0)).origin(), Point::new(40.0, 140.0));

    // Grabbed 20px right and 15px below the corner, the card keeps that offset
    controller.pointer_down(surface, CardId(1), PointerInput::mouse(920.0, 515.0));
    assert!(!controller.pointer_move(surface, PointerInput::mouse(620.0, 315.0)));
    assert_eq!(surface.measure(CardId(1)).origin(), Point::new(600.0, 300.0));
    assert_eq!(controller.pointer_up(surface).len(), 1);

    assert!(controller.toggle_filter(surface, "about"));
    assert_eq!(surface.visibility(), vec![true, false]);
    assert_eq!(surface.filter_active("about"), Some(true));

    assert!(!controller.toggle_filter(surface, "about"));
    assert_eq!(surface.visibility(), vec![true, true]);
    assert_eq!(surface.filter_active("about"), Some(false));
}
