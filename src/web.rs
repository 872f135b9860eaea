//! Browser binding
//!
//! Implements [`Surface`] over the page's DOM and wires pointer, filter and
//! resize events to a [`BoardController`]. Loaded as a wasm module by the
//! portfolio page; the page supplies `header`, `footer`, `main`, a
//! `.card-filter` bar with `button[data-filter]` controls, and any
//! author-placed `.card.fixed` elements.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Response, TouchEvent, Window};

use crate::controller::BoardController;
use crate::interaction::PointerInput;
use crate::layout::{BoundingBox, CardId, LayoutConfig, PlacementKind, Point, RandomSource, Size};
use crate::project::{parse_projects, CardSpec, ProjectRecord};
use crate::surface::{Band, Surface};

const PROJECTS_URL: &str = "projects.json";

/// Draws from the browser's `Math.random`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// The live page
pub struct DomSurface {
    window: Window,
    document: Document,
    cards: Vec<HtmlElement>,
    filter_buttons: Vec<HtmlElement>,
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn query_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        let mut surface = Self {
            window,
            document,
            cards: Vec::new(),
            filter_buttons: Vec::new(),
        };
        surface.refresh();
        surface
    }

    /// Re-read the card and filter elements; card ids follow document order
    pub fn refresh(&mut self) {
        self.cards = query_all(&self.document, ".card");
        self.filter_buttons = query_all(&self.document, ".card-filter button[data-filter]");
    }

    pub fn card_elements(&self) -> &[HtmlElement] {
        &self.cards
    }

    /// Filter controls with the tag each one toggles
    pub fn filter_controls(&self) -> Vec<(HtmlElement, String)> {
        self.filter_buttons
            .iter()
            .filter_map(|b| b.get_attribute("data-filter").map(|tag| (b.clone(), tag)))
            .collect()
    }

    fn element(&self, card: CardId) -> Option<&HtmlElement> {
        self.cards.get(card.0)
    }

    fn set_style(&self, card: CardId, property: &str, value: &str) {
        if let Some(el) = self.element(card) {
            let _ = el.style().set_property(property, value);
        }
    }
}

impl Surface for DomSurface {
    fn viewport(&self) -> Size {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Size::new(read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn band_height(&self, band: Band) -> f64 {
        let selector = match band {
            Band::Header => "header",
            Band::Footer => "footer",
            Band::FilterBar => ".card-filter",
        };
        query_one(&self.document, selector)
            .map(|el| el.offset_height() as f64)
            .unwrap_or(0.0)
    }

    fn cards(&self) -> Vec<CardId> {
        (0..self.cards.len()).map(CardId).collect()
    }

    fn cards_of_kind(&self, kind: PlacementKind) -> Vec<CardId> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, el)| el.class_list().contains(kind.class_name()))
            .map(|(i, _)| CardId(i))
            .collect()
    }

    fn measure(&self, card: CardId) -> BoundingBox {
        match self.element(card) {
            Some(el) => BoundingBox::new(
                el.offset_left() as f64,
                el.offset_top() as f64,
                el.offset_width() as f64,
                el.offset_height() as f64,
            ),
            None => BoundingBox::zero(),
        }
    }

    fn has_tag(&self, card: CardId, tag: &str) -> bool {
        self.element(card).is_some_and(|el| el.class_list().contains(tag))
    }

    fn set_position(&mut self, card: CardId, position: Point) {
        self.set_style(card, "left", &format!("{}px", position.x));
        self.set_style(card, "top", &format!("{}px", position.y));
    }

    fn set_rotation(&mut self, card: CardId, degrees: f64) {
        self.set_style(card, "transform", &format!("rotate({}deg)", degrees));
    }

    fn set_visible(&mut self, card: CardId, visible: bool) {
        self.set_style(card, "display", if visible { "block" } else { "none" });
    }

    fn set_stacking(&mut self, card: CardId, z_index: u32) {
        self.set_style(card, "z-index", &z_index.to_string());
    }

    fn set_dragging(&mut self, card: CardId, dragging: bool) {
        if let Some(el) = self.element(card) {
            let _ = el.class_list().toggle_with_force("dragging", dragging);
        }
    }

    fn set_filter_active(&mut self, tag: &str, active: bool) {
        for button in &self.filter_buttons {
            if button.get_attribute("data-filter").as_deref() == Some(tag) {
                let _ = button.class_list().toggle_with_force("active", active);
            }
        }
    }
}

/// Controller and page, shared by every event handler
struct Board {
    controller: BoardController<JsRandom>,
    surface: DomSurface,
}

type SharedBoard = Rc<RefCell<Board>>;

#[wasm_bindgen(start)]
pub fn start() {
    spawn_local(async {
        if let Err(e) = run().await {
            gloo::console::error!("portfolio board failed to start", e);
        }
    });
}

async fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let projects = match fetch_projects(&window).await {
        Ok(projects) => projects,
        Err(e) => {
            gloo::console::log!("project data unavailable, continuing without project cards", e);
            Vec::new()
        }
    };
    materialize(&document, &projects)?;

    let surface = DomSurface::new(window.clone(), document.clone());
    let board: SharedBoard = Rc::new(RefCell::new(Board {
        controller: BoardController::new(LayoutConfig::default(), JsRandom),
        surface,
    }));

    {
        let mut guard = board.borrow_mut();
        let Board { controller, surface } = &mut *guard;
        controller.layout(surface);
    }

    attach_drag(&board, &document);
    attach_filters(&board);
    attach_resize(&board, &window);
    Ok(())
}

async fn fetch_projects(window: &Window) -> Result<Vec<ProjectRecord>, JsValue> {
    let response: Response = JsFuture::from(window.fetch_with_str(PROJECTS_URL))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("{} answered {}", PROJECTS_URL, response.status())));
    }
    let text = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
    parse_projects(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Append one card element per record to `main`
pub fn materialize(document: &Document, projects: &[ProjectRecord]) -> Result<(), JsValue> {
    let Some(main) = document.query_selector("main")? else {
        return Ok(());
    };
    for record in projects {
        let spec = CardSpec::from_record(record);
        let card: Element = document.create_element("div")?;
        card.set_class_name(&spec.class_attr());
        card.set_inner_html(&spec.inner_html());
        main.append_child(&card)?;
    }
    Ok(())
}

fn touch_point(event: &TouchEvent) -> Option<PointerInput> {
    event
        .touches()
        .get(0)
        .map(|t| PointerInput::touch(t.client_x() as f64, t.client_y() as f64))
}

fn mouse_point(event: &MouseEvent) -> PointerInput {
    PointerInput::mouse(event.client_x() as f64, event.client_y() as f64)
}

fn active_options() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

fn attach_drag(board: &SharedBoard, document: &Document) {
    let elements = board.borrow().surface.card_elements().to_vec();
    for (index, element) in elements.iter().enumerate() {
        let card = CardId(index);

        let press = board.clone();
        EventListener::new(element, "mousedown", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let mut guard = press.borrow_mut();
                let Board { controller, surface } = &mut *guard;
                controller.pointer_down(surface, card, mouse_point(event));
            }
        })
        .forget();

        let press = board.clone();
        EventListener::new_with_options(element, "touchstart", active_options(), move |event: &Event| {
            if let Some(input) = event.dyn_ref::<TouchEvent>().and_then(touch_point) {
                let mut guard = press.borrow_mut();
                let Board { controller, surface } = &mut *guard;
                controller.pointer_down(surface, card, input);
            }
        })
        .forget();
    }

    let moving = board.clone();
    EventListener::new(document, "mousemove", move |event: &Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let mut guard = moving.borrow_mut();
            let Board { controller, surface } = &mut *guard;
            controller.pointer_move(surface, mouse_point(event));
        }
    })
    .forget();

    let moving = board.clone();
    EventListener::new_with_options(document, "touchmove", active_options(), move |event: &Event| {
        if let Some(input) = event.dyn_ref::<TouchEvent>().and_then(touch_point) {
            let mut guard = moving.borrow_mut();
            let Board { controller, surface } = &mut *guard;
            if controller.pointer_move(surface, input) {
                event.prevent_default();
            }
        }
    })
    .forget();

    for name in ["mouseup", "touchend"] {
        let release = board.clone();
        EventListener::new(document, name, move |_: &Event| {
            let mut guard = release.borrow_mut();
            let Board { controller, surface } = &mut *guard;
            controller.pointer_up(surface);
        })
        .forget();
    }
}

fn attach_filters(board: &SharedBoard) {
    let controls = board.borrow().surface.filter_controls();
    for (button, tag) in controls {
        let board = board.clone();
        EventListener::new(&button, "click", move |_: &Event| {
            let mut guard = board.borrow_mut();
            let Board { controller, surface } = &mut *guard;
            controller.toggle_filter(surface, &tag);
        })
        .forget();
    }
}

fn attach_resize(board: &SharedBoard, window: &Window) {
    // Replacing the pending timeout drops, and so cancels, the previous one
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let board = board.clone();
    EventListener::new(window, "resize", move |_: &Event| {
        let now = js_sys::Date::now();
        let delay = {
            let mut guard = board.borrow_mut();
            guard.controller.viewport_resized(now);
            guard.controller.resize_delay_ms()
        };
        let due = now + delay;
        let fire = board.clone();
        let timeout = Timeout::new(delay as u32, move || {
            let mut guard = fire.borrow_mut();
            let Board { controller, surface } = &mut *guard;
            controller.poll_resize(surface, due);
        });
        pending.borrow_mut().replace(timeout);
    })
    .forget();
}
