//! SVG renderer for board previews
//!
//! This module takes a laid-out in-memory board and produces an SVG string
//! with CSS classes and palette variables for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_palette};
