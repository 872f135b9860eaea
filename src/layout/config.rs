//! Configuration for the layout engine

use serde::Deserialize;

use super::types::Size;

/// Configuration options for card placement
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Box used for cards that report no rendered size (width, height)
    pub default_card_size: (f64, f64),

    /// Subtracted from the viewport width when computing the horizontal range
    pub horizontal_margin: f64,

    /// Subtracted from the viewport height when computing the vertical range
    pub vertical_margin: f64,

    /// Candidates drawn per card before the last one is kept
    pub max_attempts: u32,

    /// Largest tolerated overlap with any single obstacle, as a share of the card's area
    pub overlap_ratio: f64,

    /// Rotation is drawn from [-max_rotation, +max_rotation) degrees
    pub max_rotation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_card_size: (250.0, 200.0),
            horizontal_margin: 20.0,
            vertical_margin: 100.0,
            max_attempts: 40,
            overlap_ratio: 0.45,
            max_rotation: 15.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback card size
    pub fn with_card_size(mut self, width: f64, height: f64) -> Self {
        self.default_card_size = (width, height);
        self
    }

    /// Set the horizontal and vertical safety margins
    pub fn with_margins(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_margin = horizontal;
        self.vertical_margin = vertical;
        self
    }

    /// Set the retry budget
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the overlap budget
    pub fn with_overlap_ratio(mut self, ratio: f64) -> Self {
        self.overlap_ratio = ratio;
        self
    }

    /// Set the rotation range
    pub fn with_max_rotation(mut self, degrees: f64) -> Self {
        self.max_rotation = degrees;
        self
    }

    pub fn default_size(&self) -> Size {
        Size::new(self.default_card_size.0, self.default_card_size.1)
    }
}
