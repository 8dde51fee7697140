//! Text labels for chart nodes.
//!
//! - [`LabelStyle`] - Reusable font configuration
//! - [`Label`] - Multi-line text anchored beside a node bar
//!
//! A label is rendered as one SVG `<text>` element with one `<tspan>` per
//! line. Lines are centred vertically on the anchor point, so a two-line
//! label sits symmetrically beside the middle of its bar.
//!
//! ```
//! # use ledgerflow_core::draw::{Drawable, Label, LabelStyle, TextAnchor};
//! # use ledgerflow_core::geometry::Point;
//! let style = LabelStyle::default();
//! let label = Label::new(&style, "Revenue\n$72.28M", Point::new(100.0, 50.0), TextAnchor::Start);
//! assert_eq!(label.lines().count(), 2);
//! assert!(!label.render_to_layers().is_empty());
//! ```

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Rgba,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::Point,
};

/// Ratio of line height to font size.
const LINE_HEIGHT: f32 = 1.2;

/// Offset from a line's vertical centre to its baseline, as a fraction of the font size.
const BASELINE_SHIFT: f32 = 0.35;

/// Font settings shared by all node labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    font_family: String,
    font_size: u16,
    color: Rgba,
}

impl LabelStyle {
    pub fn new(font_family: impl Into<String>, font_size: u16, color: Rgba) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    fn line_height(&self) -> f32 {
        f32::from(self.font_size) * LINE_HEIGHT
    }
}

impl Default for LabelStyle {
    /// Bold black 14px Arial.
    fn default() -> Self {
        Self::new("Arial, sans-serif", 14, Rgba::new(0, 0, 0, 1.0))
    }
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor and extends rightward
    Start,
    /// Text ends at the anchor
    End,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// A multi-line text label.
#[derive(Debug, Clone)]
pub struct Label<'a> {
    style: &'a LabelStyle,
    content: String,
    position: Point,
    anchor: TextAnchor,
}

impl<'a> Label<'a> {
    /// Creates a label whose lines are centred vertically on `position`.
    pub fn new(
        style: &'a LabelStyle,
        content: impl Into<String>,
        position: Point,
        anchor: TextAnchor,
    ) -> Self {
        Self {
            style,
            content: content.into(),
            position,
            anchor,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    /// Baseline y-coordinate for each line.
    fn baselines(&self) -> impl Iterator<Item = f32> + '_ {
        let line_height = self.style.line_height();
        let count = self.lines().count();
        let first_center = self.position.y() - (count.saturating_sub(1) as f32) * line_height / 2.0;
        let shift = f32::from(self.style.font_size()) * BASELINE_SHIFT;

        (0..count).map(move |i| first_center + i as f32 * line_height + shift)
    }
}

impl Drawable for Label<'_> {
    fn render_to_layers(&self) -> LayeredOutput {
        let color = self.style.color();
        let mut text = svg_element::Text::new("")
            .set("text-anchor", self.anchor.to_svg_value())
            .set("font-family", self.style.font_family())
            .set("font-size", self.style.font_size())
            .set("fill", &color)
            .set("fill-opacity", color.alpha())
            .set("font-weight", "bold");

        for (line, baseline) in self.lines().zip(self.baselines()) {
            let tspan = svg_element::TSpan::new("")
                .set("x", self.position.x())
                .set("y", baseline)
                .add(SvgText::new(line));
            text = text.add(tspan);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(text));
        output
    }
}
