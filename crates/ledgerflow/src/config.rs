//! Configuration types for Ledgerflow chart rendering.
//!
//! Every section implements [`serde::Deserialize`] and falls back to its
//! defaults field by field, so a configuration file only needs to mention
//! the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Configuration root.
//! - [`OutputConfig`] - Where artifacts are written and in which formats.
//! - [`LayoutConfig`] - Canvas size, margins, bar geometry and raster scale.
//! - [`StyleConfig`] - Fonts, background, palette and link transparency.
//! - [`ValidationConfig`] - How flow imbalances are treated.
//!
//! # Example
//!
//! ```
//! # use ledgerflow::config::{AppConfig, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.output().format(), OutputFormat::Both);
//! assert_eq!(config.layout().width(), 1600);
//! assert!(config.style().palette().is_ok());
//! ```

use std::{fmt, path::PathBuf, str::FromStr};

use serde::Deserialize;

use ledgerflow_core::{
    color::{Color, ColorError, Rgba},
    draw::LabelStyle,
    geometry::{Insets, Size},
    palette::{COST_HEX, PROFIT_HEX, Palette, REVENUE_HEX},
};

use crate::layout::LayoutOptions;

/// Configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    output: OutputConfig,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    pub fn new(
        output: OutputConfig,
        layout: LayoutConfig,
        style: StyleConfig,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            output,
            layout,
            style,
            validation,
        }
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Mutable access for applying command line overrides.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }
}

/// Artifacts to write.
///
/// Parsed case-insensitively, from the command line and from TOML alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    Html,
    Png,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn includes_html(self) -> bool {
        matches!(self, Self::Html | Self::Both)
    }

    pub fn includes_png(self) -> bool {
        matches!(self, Self::Png | Self::Both)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Png => "png",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            "both" => Ok(Self::Both),
            _ => Err(format!(
                "unknown output format `{s}` (expected html, png or both)"
            )),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Output location and artifact selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    dir: PathBuf,
    format: OutputFormat,
    name: String,
    preview: bool,
}

impl OutputConfig {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            format,
            name: name.into(),
            preview: true,
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// File stem shared by every artifact.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preview(&self) -> bool {
        self.preview
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new("output", OutputFormat::Both, "sankey_chart")
    }
}

/// Margins in logical pixels. Sides left out keep their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

impl MarginConfig {
    /// Fills every unset side from `defaults`.
    pub fn resolve(&self, defaults: Insets) -> Insets {
        Insets::new(
            self.top.unwrap_or(defaults.top()),
            self.right.unwrap_or(defaults.right()),
            self.bottom.unwrap_or(defaults.bottom()),
            self.left.unwrap_or(defaults.left()),
        )
    }
}

/// Canvas and bar geometry.
///
/// `width` and `height` are logical pixels; the PNG artifact is rasterized
/// at `scale` times that size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    width: u32,
    height: u32,
    pad: f32,
    thickness: f32,
    scale: f32,
    margin: MarginConfig,
}

impl LayoutConfig {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Configured margins merged over the 40px/80px defaults.
    pub fn margin(&self) -> Insets {
        self.margin.resolve(LayoutOptions::default().margin())
    }

    pub fn canvas(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Options for [`crate::layout::SankeyLayout::compute`].
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::new(self.canvas(), self.margin(), self.pad, self.thickness)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            pad: 40.0,
            thickness: 40.0,
            scale: 2.0,
            margin: MarginConfig::default(),
        }
    }
}

/// Category colors as hex strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    revenue: String,
    profit: String,
    cost: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            revenue: REVENUE_HEX.to_string(),
            profit: PROFIT_HEX.to_string(),
            cost: COST_HEX.to_string(),
        }
    }
}

/// Visual styling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    font_size: u16,
    font_color: String,
    background_color: String,
    link_alpha: f32,
    palette: PaletteConfig,
}

impl StyleConfig {
    /// Returns the category palette.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] if a palette entry is not a six
    /// digit hex color.
    pub fn palette(&self) -> Result<Palette, ColorError> {
        Palette::from_hex(&self.palette.revenue, &self.palette.profit, &self.palette.cost)
    }

    /// Returns the parsed label color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn font_color(&self) -> Result<Rgba, ColorError> {
        Color::new(&self.font_color).map(Color::to_rgba)
    }

    /// Returns the parsed background color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Rgba, ColorError> {
        Color::new(&self.background_color).map(Color::to_rgba)
    }

    /// Bold label style built from the font settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the font color cannot be parsed.
    pub fn label_style(&self) -> Result<LabelStyle, ColorError> {
        Ok(LabelStyle::new(
            self.font_family.clone(),
            self.font_size,
            self.font_color()?,
        ))
    }

    /// Opacity applied to link colors, clamped to `0.0..=1.0`.
    pub fn link_alpha(&self) -> f32 {
        self.link_alpha.clamp(0.0, 1.0)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            font_size: 14,
            font_color: "black".to_string(),
            background_color: "white".to_string(),
            link_alpha: 0.5,
            palette: PaletteConfig::default(),
        }
    }
}

/// Treatment of nodes whose incoming and outgoing totals disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceCheck {
    /// Skip the check
    Off,
    /// Log each imbalance and render anyway
    #[default]
    Warn,
    /// Fail with every imbalance found
    Deny,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    balance: BalanceCheck,
    tolerance: f64,
}

impl ValidationConfig {
    pub fn new(balance: BalanceCheck, tolerance: f64) -> Self {
        Self { balance, tolerance }
    }

    pub fn balance(&self) -> BalanceCheck {
        self.balance
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(BalanceCheck::Warn, 1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_colors() {
        let style = StyleConfig::default();

        assert_eq!(style.font_color().unwrap(), Rgba::new(0, 0, 0, 1.0));
        assert_eq!(
            style.background_color().unwrap(),
            Rgba::new(255, 255, 255, 1.0)
        );
        assert_eq!(style.palette().unwrap(), Palette::default());
        assert_eq!(style.link_alpha(), 0.5);

        let label = style.label_style().unwrap();
        assert_eq!(label.font_size(), 14);
        assert_eq!(label.font_family(), "Arial, sans-serif");
    }

    #[test]
    fn test_invalid_palette_is_reported() {
        let style = StyleConfig {
            palette: PaletteConfig {
                cost: "#C0392".to_string(),
                ..PaletteConfig::default()
            },
            ..StyleConfig::default()
        };

        let err = style.palette().unwrap_err();
        assert_eq!(err, ColorError::InvalidHex("#C0392".to_string()));
    }

    #[test]
    fn test_invalid_font_color_is_a_color_error() {
        let style = StyleConfig {
            font_color: "nope".to_string(),
            ..StyleConfig::default()
        };

        assert!(matches!(
            style.font_color(),
            Err(ColorError::InvalidCss { ref input, .. }) if input == "nope"
        ));
        assert!(style.label_style().is_err());
        assert!(style.background_color().is_ok());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!(OutputFormat::try_from("Both".to_string()), Ok(OutputFormat::Both));
        assert_eq!("both".parse::<OutputFormat>(), Ok(OutputFormat::Both));
        assert!("pdf".parse::<OutputFormat>().is_err());

        assert!(OutputFormat::Html.includes_html());
        assert!(!OutputFormat::Html.includes_png());
        assert!(OutputFormat::Both.includes_html() && OutputFormat::Both.includes_png());
        assert_eq!(OutputFormat::Png.to_string(), "png");
    }

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        let options = layout.layout_options();

        assert_eq!(options.canvas(), Size::new(1600.0, 900.0));
        assert_eq!(layout.margin().left(), 80.0);
        assert_eq!(layout.margin().top(), 40.0);
        assert_eq!(layout.scale(), 2.0);
    }

    #[test]
    fn test_margin_sides_fall_back_independently() {
        let defaults = Insets::new(40.0, 80.0, 40.0, 80.0);
        let partial = MarginConfig {
            left: Some(100.0),
            bottom: Some(0.0),
            ..MarginConfig::default()
        };

        assert_eq!(partial.resolve(defaults), Insets::new(40.0, 80.0, 0.0, 100.0));
        assert_eq!(MarginConfig::default().resolve(defaults), defaults);
    }

    #[test]
    fn test_output_builders() {
        let output = OutputConfig::default()
            .with_dir("charts")
            .with_format(OutputFormat::Html)
            .with_name("q3")
            .with_preview(false);

        assert_eq!(output.dir(), &PathBuf::from("charts"));
        assert_eq!(output.format(), OutputFormat::Html);
        assert_eq!(output.name(), "q3");
        assert!(!output.preview());
    }
}
