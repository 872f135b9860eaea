//! Portfolio Board - a scattered card layout for portfolio pages
//!
//! This library places project cards on a page by rejection sampling,
//! lets visitors drag them around and filter them by tag, and keeps the
//! project list in sync with an external content database.
//!
//! # Example
//!
//! ```rust
//! use portfolio_board::render;
//!
//! let svg = render("", r#"[{"id": "p1", "title": "Timer", "tags": ["web"]}]"#).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Timer"));
//! ```

pub mod board;
pub mod controller;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod palette;
pub mod project;
pub mod renderer;
pub mod surface;
#[cfg(not(target_arch = "wasm32"))]
pub mod sync;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::BoardSpec;
pub use controller::BoardController;
pub use error::{BoardError, ProjectError};
pub use layout::{LayoutConfig, LayoutPass};
pub use palette::{Palette, PaletteError};
pub use project::{CardSpec, ProjectRecord};
pub use renderer::{render_svg, render_svg_with_palette, SvgConfig};
pub use surface::{MemoryCard, MemorySurface, Surface};

use log::info;
use serde::Serialize;
use thiserror::Error;

use layout::{RngSource, Size};

/// Errors that can occur while building a preview
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("failed to serialize layout: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the complete preview pipeline
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Replaces the board's own layout settings when set
    pub layout: Option<LayoutConfig>,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Palette for color resolution
    pub palette: Palette,
    /// Seed for the placement draws
    pub seed: u64,
    /// Tags toggled on before the layout pass
    pub filters: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            layout: None,
            svg: SvgConfig::default(),
            palette: Palette::default(),
            seed: 0,
            filters: Vec::new(),
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = Some(config);
        self
    }

    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_filter(mut self, tag: impl Into<String>) -> Self {
        self.filters.push(tag.into());
        self
    }
}

/// A laid-out board, ready to be rendered
#[derive(Debug, Clone)]
pub struct Preview {
    pub surface: MemorySurface,
    pub pass: LayoutPass,
}

#[derive(Serialize)]
struct PreviewReport<'a> {
    viewport: Size,
    pass: &'a LayoutPass,
    /// Placements that kept their last candidate
    exhausted: usize,
    cards: &'a [MemoryCard],
}

impl Preview {
    pub fn to_svg(&self, config: &SvgConfig, palette: &Palette) -> String {
        render_svg_with_palette(&self.surface, config, palette)
    }

    /// Layout pass and final card state as pretty JSON
    pub fn to_json(&self) -> Result<String, Error> {
        let report = PreviewReport {
            viewport: self.surface.viewport(),
            pass: &self.pass,
            exhausted: self.pass.exhausted_count(),
            cards: self.surface.all_cards(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

/// Materialize `projects` onto the board and run one layout pass
pub fn preview(board: &BoardSpec, projects: &[ProjectRecord], config: &PreviewConfig) -> Result<Preview, Error> {
    let layout = config.layout.clone().unwrap_or_else(|| board.layout.clone());
    let mut surface = board.to_surface()?;

    // Project cards render at the default size in a preview
    for record in projects {
        let mut card = CardSpec::from_record(record).to_memory_card();
        card.size = Some(layout.default_size());
        surface.push_card(card);
    }

    let mut controller = BoardController::new(layout, RngSource::seeded(config.seed));
    for tag in &config.filters {
        controller.toggle_filter(&mut surface, tag);
    }
    let pass = controller.layout(&mut surface);

    info!(
        "laid out {} cards around {} obstacles (seed {})",
        pass.placements.len(),
        pass.obstacles.len(),
        config.seed
    );

    Ok(Preview { surface, pass })
}

/// Render a board TOML and a project list JSON to SVG with default configuration
pub fn render(board: &str, projects: &str) -> Result<String, Error> {
    render_with_config(board, projects, &PreviewConfig::default())
}

/// Render a board TOML and a project list JSON to SVG with custom configuration
pub fn render_with_config(board: &str, projects: &str, config: &PreviewConfig) -> Result<String, Error> {
    let board = BoardSpec::from_str(board)?;
    let projects = project::parse_projects(projects)?;
    let preview = preview(&board, &projects, config)?;
    Ok(preview.to_svg(&config.svg, &config.palette))
}
