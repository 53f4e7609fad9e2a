//! Standalone HTML snapshots
//!
//! A snapshot is a self-contained document: viewer assets per the resource
//! descriptor, a mount element, and the resolved page embedded as JSON.

use crate::rendering::layout::Page;
use crate::resources::{ResourceMode, Resources};
use crate::Result;

const INLINE_CSS_MIN: &str = ".fs-root{display:flex;margin:0 auto}";
const INLINE_CSS: &str = ".fs-root {\n  display: flex;\n  margin: 0 auto;\n}";
const INLINE_JS_MIN: &str = "window.figshot={doc:\"fs-doc\"};";
const INLINE_JS: &str = "window.figshot = {\n  doc: \"fs-doc\"\n};";

/// Render the resolved page as a standalone HTML document.
pub fn page_html(page: &Page) -> Result<String> {
    let doc = serde_json::to_string(page)?;
    // keep the embedded JSON safe inside a <script> element
    let doc = doc.replace("</", "<\\/");

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&page.title)));
    out.push_str(&resource_tags(&page.resources));
    out.push_str("</head>\n<body>\n<div class=\"fs-root\"></div>\n");
    out.push_str(&format!(
        "<script type=\"application/json\" id=\"fs-doc\">{doc}</script>\n"
    ));
    out.push_str("</body>\n</html>\n");
    Ok(out)
}

fn resource_tags(resources: &Resources) -> String {
    match resources.mode {
        ResourceMode::Linked => {
            let suffix = if resources.minified { ".min" } else { "" };
            format!(
                "<link rel=\"stylesheet\" href=\"figshot{suffix}.css\">\n<script src=\"figshot{suffix}.js\"></script>\n"
            )
        }
        ResourceMode::Inline => {
            let (css, js) = if resources.minified {
                (INLINE_CSS_MIN, INLINE_JS_MIN)
            } else {
                (INLINE_CSS, INLINE_JS)
            };
            format!("<style>\n{css}\n</style>\n<script>\n{js}\n</script>\n")
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
