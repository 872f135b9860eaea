//! Options for SVG board previews

/// How a preview is written out
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Extra space around the page in the viewBox
    pub viewbox_padding: f64,

    /// Emit an XML declaration so the file opens on its own
    pub standalone: bool,

    /// One element per line, indented by nesting depth
    pub pretty_print: bool,

    /// Prepended to every generated class, `pb-` gives `pb-card`
    pub class_prefix: Option<String>,

    /// Corner radius of card frames
    pub corner_radius: f64,

    /// Draw filtered-out cards faintly instead of leaving them out
    pub show_hidden: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 0.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("pb-".to_string()),
            corner_radius: 6.0,
            show_hidden: false,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Emit bare class names
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }
}
