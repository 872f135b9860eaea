//! SVG generation from a laid-out board

use crate::layout::{BoundingBox, Point};
use crate::palette::Palette;
use crate::surface::{Band, MemoryCard, MemorySurface, Surface};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    bands: Vec<String>,
    cards: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            bands: vec![],
            cards: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add CSS custom properties and the class rules that use them
    pub fn add_palette(&mut self, palette: &Palette) {
        let mut css = String::from(":root {");
        for (token, value) in palette.merged_with_default() {
            css.push_str(&format!(" --{}: {};", token, value));
        }
        css.push_str(" }");
        self.styles.push(css);

        let p = self.prefix();
        self.styles.push(format!(
            ".{p}page {{ fill: var(--page); }} .{p}band {{ fill: var(--band); }} .{p}band-label {{ fill: var(--band-text); font-size: 12px; }}"
        ));
        self.styles.push(format!(
            ".{p}card rect {{ fill: var(--card-fill); stroke: var(--card-stroke); stroke-width: 1.5; }} .{p}fixed rect {{ fill: var(--fixed-fill); }} .{p}hidden {{ opacity: 0.15; }}"
        ));
        self.styles.push(format!(
            ".{p}title {{ fill: var(--text); font-size: 14px; }} .{p}caption {{ fill: var(--text-muted); font-size: 11px; }}"
        ));
    }

    /// Add a reserved band across the page
    pub fn add_band(&mut self, name: &str, bounds: BoundingBox) {
        let prefix = self.prefix();
        self.bands.push(format!(
            r#"{}<rect class="{}band" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            prefix,
            fmt_num(bounds.x),
            fmt_num(bounds.y),
            fmt_num(bounds.width),
            fmt_num(bounds.height)
        ));
        self.bands.push(format!(
            r#"{}<text class="{}band-label" x="{}" y="{}" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            fmt_num(bounds.x + 12.0),
            fmt_num(bounds.y + bounds.height / 2.0),
            escape_xml(name)
        ));
    }

    /// Add a card as a group holding its frame and text
    pub fn add_card(
        &mut self,
        id: &str,
        bounds: BoundingBox,
        rotation: f64,
        classes: &[String],
        title: Option<&str>,
        caption: Option<&str>,
    ) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}card", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        let transform = if rotation == 0.0 {
            String::new()
        } else {
            let c = bounds.center();
            format!(
                r#" transform="rotate({} {} {})""#,
                fmt_num(rotation),
                fmt_num(c.x),
                fmt_num(c.y)
            )
        };

        self.cards.push(format!(
            r#"{}<g id="{}" class="{}"{}>"#,
            self.indent_str(),
            escape_xml(id),
            class_list,
            transform
        ));
        self.indent += 1;
        self.cards.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}" rx="{}"/>"#,
            self.indent_str(),
            fmt_num(bounds.x),
            fmt_num(bounds.y),
            fmt_num(bounds.width),
            fmt_num(bounds.height),
            fmt_num(self.config.corner_radius)
        ));
        let text_at = Point::new(bounds.x + 12.0, bounds.y + 24.0);
        if let Some(title) = title {
            self.cards.push(format!(
                r#"{}<text class="{}title" x="{}" y="{}">{}</text>"#,
                self.indent_str(),
                prefix,
                fmt_num(text_at.x),
                fmt_num(text_at.y),
                escape_xml(title)
            ));
        }
        if let Some(caption) = caption {
            self.cards.push(format!(
                r#"{}<text class="{}caption" x="{}" y="{}">{}</text>"#,
                self.indent_str(),
                prefix,
                fmt_num(text_at.x),
                fmt_num(text_at.y + 20.0),
                escape_xml(caption)
            ));
        }
        self.indent = self.indent.saturating_sub(1);
        self.cards.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewport: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewport.x - padding;
        let vb_y = viewport.y - padding;
        let vb_w = viewport.width + 2.0 * padding;
        let vb_h = viewport.height + 2.0 * padding;

        let nl = self.newline();
        let prefix = self.prefix();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            fmt_num(vb_x),
            fmt_num(vb_y),
            fmt_num(vb_w),
            fmt_num(vb_h),
            fmt_num(vb_w),
            fmt_num(vb_h)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"{}<rect class="{}page" x="{}" y="{}" width="{}" height="{}"/>"#,
            if self.config.pretty_print { "  " } else { "" },
            prefix,
            fmt_num(viewport.x),
            fmt_num(viewport.y),
            fmt_num(viewport.width),
            fmt_num(viewport.height)
        ));
        svg.push_str(nl);

        for band in &self.bands {
            svg.push_str(band);
            svg.push_str(nl);
        }

        // Cards last, in stacking order
        for card in &self.cards {
            svg.push_str(card);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a board to an SVG string with the default palette
pub fn render_svg(surface: &MemorySurface, config: &SvgConfig) -> String {
    render_svg_with_palette(surface, config, &Palette::default())
}

/// Render a board to an SVG string with a custom palette
pub fn render_svg_with_palette(surface: &MemorySurface, config: &SvgConfig, palette: &Palette) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_palette(palette);

    let viewport = surface.viewport_bounds();
    let header = surface.band_height(Band::Header);
    let filter_bar = surface.band_height(Band::FilterBar);
    let footer = surface.band_height(Band::Footer);

    if header > 0.0 {
        builder.add_band("header", BoundingBox::new(0.0, 0.0, viewport.width, header));
    }
    if filter_bar > 0.0 {
        let tags = surface
            .filter_tags()
            .map(|tag| match surface.filter_active(tag) {
                Some(true) => format!("[{}]", tag),
                _ => tag.to_string(),
            })
            .collect::<Vec<_>>();
        let label = if tags.is_empty() {
            "filters".to_string()
        } else {
            tags.join(" ")
        };
        builder.add_band(&label, BoundingBox::new(0.0, header, viewport.width, filter_bar));
    }
    if footer > 0.0 {
        builder.add_band(
            "footer",
            BoundingBox::new(0.0, viewport.height - footer, viewport.width, footer),
        );
    }

    let mut order: Vec<(usize, &MemoryCard)> = surface.all_cards().iter().enumerate().collect();
    order.sort_by_key(|(_, card)| card.z_index.unwrap_or(0));

    for (index, card) in order {
        if !card.visible && !config.show_hidden {
            continue;
        }
        render_card(index, card, config, &mut builder);
    }

    builder.build(viewport)
}

fn render_card(index: usize, card: &MemoryCard, config: &SvgConfig, builder: &mut SvgBuilder) {
    let prefix = config.class_prefix.clone().unwrap_or_default();
    let mut classes = Vec::new();
    if let Some(kind) = card.kind {
        classes.push(format!("{}{}", prefix, kind.class_name()));
    }
    if !card.visible {
        classes.push(format!("{}hidden", prefix));
    }
    classes.extend(card.tags.iter().cloned());

    // Unmeasured cards have no extent
    let size = card.size.unwrap_or_default();
    let bounds = BoundingBox::from_origin(card.position, size);
    builder.add_card(
        &format!("card-{}", index),
        bounds,
        card.rotation,
        &classes,
        card.title.as_deref(),
        card.caption.as_deref(),
    );
}

/// Format a coordinate with at most two decimals
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
