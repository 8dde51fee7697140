//! PNG export through `resvg`.

use log::debug;
use resvg::{tiny_skia, usvg};

use crate::export::{Error, Exporter};

/// Writes `<name>.png`, rasterized at `scale` times the SVG size.
#[derive(Debug, Clone, Copy)]
pub struct PngExporter {
    scale: f32,
}

impl PngExporter {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Rasterizes `document` and returns the encoded PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the SVG cannot be parsed, the scaled
    /// size is empty, or encoding fails.
    pub fn rasterize(&self, document: &svg::Document) -> Result<Vec<u8>, Error> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::Render(format!("invalid raster scale {}", self.scale)));
        }

        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(&document.to_string(), &options)
            .map_err(|err| Error::Render(format!("failed to parse SVG: {err}")))?;

        let size = tree.size();
        let width = (size.width() * self.scale).round() as u32;
        let height = (size.height() * self.scale).round() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| Error::Render(format!("cannot allocate {width}x{height} pixmap")))?;

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(self.scale, self.scale),
            &mut pixmap.as_mut(),
        );
        debug!(width, height; "SVG rasterized");

        pixmap
            .encode_png()
            .map_err(|err| Error::Render(format!("failed to encode PNG: {err}")))
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Exporter for PngExporter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn encode(&self, document: &svg::Document) -> Result<Vec<u8>, Error> {
        self.rasterize(document)
    }
}
