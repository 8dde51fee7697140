//! HTML export.
//!
//! The page embeds the SVG inline and styles hover highlighting with CSS, so
//! it opens offline with no external scripts or stylesheets. Hover text comes
//! from the `<title>` elements already present in the SVG.

use crate::export::{Error, Exporter};

const STYLE: &str = "\
body { margin: 0; background: #ffffff; }
.chart { display: flex; justify-content: center; }
.chart svg { max-width: 100%; height: auto; }
.chart .link { transition: fill-opacity 0.15s ease-in-out; }
.chart .link:hover { fill-opacity: 0.8; }
.chart .node:hover { fill-opacity: 0.8; }
";

/// Writes `<name>.html`.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
}

impl HtmlExporter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Wraps `document` in a standalone HTML page.
    pub fn render(&self, document: &svg::Document) -> String {
        let markup = document.to_string();
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <style>\n{STYLE}</style>\n\
             </head>\n\
             <body>\n\
             <div class=\"chart\">\n{svg}\n</div>\n\
             </body>\n\
             </html>\n",
            title = escape(&self.title),
            svg = strip_xml_declaration(&markup),
        )
    }
}

impl Exporter for HtmlExporter {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn encode(&self, document: &svg::Document) -> Result<Vec<u8>, Error> {
        Ok(self.render(document).into_bytes())
    }
}

/// An XML declaration is not allowed inside an HTML body.
fn strip_xml_declaration(markup: &str) -> &str {
    let trimmed = markup.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return trimmed[end + 2..].trim_start();
        }
    }
    trimmed
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_embeds_svg_inline() {
        let document = svg::Document::new().set("width", 10);
        let page = HtmlExporter::new("sankey_chart").render(&document);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>sankey_chart</title>"));
        assert!(page.contains("<svg"));
        assert!(!page.contains("<script"));
        assert!(!page.contains("<?xml"));
    }

    #[test]
    fn test_strip_xml_declaration() {
        assert_eq!(
            strip_xml_declaration("<?xml version=\"1.0\"?>\n<svg/>"),
            "<svg/>"
        );
        assert_eq!(strip_xml_declaration("<svg/>"), "<svg/>");
    }

    #[test]
    fn test_title_is_escaped() {
        let page = HtmlExporter::new("P&L <Q3>").render(&svg::Document::new());
        assert!(page.contains("<title>P&amp;L &lt;Q3&gt;</title>"));
    }
}
