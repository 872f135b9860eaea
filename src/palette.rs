//! Color palette for board previews
//!
//! Preview colors are symbolic tokens emitted as CSS custom properties, so a
//! preview can be re-themed by loading a different TOML palette.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Token name -> color value
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: Option<String>,
    pub colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlPalette {
    name: Option<String>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

const DEFAULT_PALETTE: &str = r##"
name = "paper"

[colors]
page = "#fafaf7"
band = "#ececec"
band-text = "#555555"
card-fill = "#ffffff"
card-stroke = "#2b2b2b"
fixed-fill = "#fff6d6"
text = "#1a1a1a"
text-muted = "#8a8a8a"
"##;

impl Palette {
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a palette; tokens it does not define fall back to the default palette
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        Ok(Palette {
            name: parsed.name,
            colors: parsed.colors,
        })
    }

    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// This palette's colors layered over the default palette
    pub fn merged_with_default(&self) -> BTreeMap<String, String> {
        let mut colors = Self::default().colors;
        colors.extend(self.colors.iter().map(|(k, v)| (k.clone(), v.clone())));
        colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        let parsed: TomlPalette = toml::from_str(DEFAULT_PALETTE).unwrap_or(TomlPalette {
            name: None,
            colors: BTreeMap::new(),
        });
        Palette {
            name: parsed.name,
            colors: parsed.colors,
        }
    }
}
