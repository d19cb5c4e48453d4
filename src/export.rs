use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use crate::error::ExportError;
use crate::graph::{Diagram, Node};
use crate::palette::{FLOW_HEIGHT, FLOW_WIDTH};
use crate::svg::{colorize, data_url, escape_xml};

pub const DEFAULT_PNG_FILENAME: &str = "cloud-diagram.png";

const PRINT_PAGE_PADDING: f32 = 24.0;
const PRINT_TITLE: &str = "CloudBread Diagram Export";
const PRINT_TITLE_HEIGHT: f32 = 28.0;

/// Synthesize the self-contained export document: a fixed-size white
/// canvas with each node's colorized icon and its label below. Only the
/// graph store's nodes participate; selection state never leaks into an
/// export.
pub fn build_export_svg(nodes: &[Node]) -> String {
    let mut body = String::new();

    for node in nodes {
        let cx = node.x + 70.0;
        let cy = node.y + 45.0;
        let icon = data_url(&colorize(node.icon, &node.color));

        body.push_str(&format!(
            r#"<image href="{}" x="{:.2}" y="{:.2}" width="60" height="60" />"#,
            icon,
            cx - 30.0,
            cy - 30.0,
        ));
        body.push_str(&format!(
            r##"<text x="{:.2}" y="{:.2}" font-size="13" font-family="Arial" font-weight="600" fill="#0f172a" text-anchor="middle">{}</text>"##,
            cx,
            cy + 52.0,
            escape_xml(&node.label),
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="#ffffff"/>{body}</svg>"##,
        w = FLOW_WIDTH,
        h = FLOW_HEIGHT,
        body = body,
    )
}

/// Export the diagram's nodes to PNG bytes on the fixed 1200x650
/// canvas, rasterized at `scale` (1.0 for native size).
///
/// One-shot: a decode or surface failure aborts this call without
/// partial output, and the staged document is dropped on every path.
pub fn export_png(diagram: &Diagram, scale: f32) -> Result<Vec<u8>, ExportError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ExportError::InvalidScale(scale));
    }

    let document = build_export_svg(diagram.nodes());

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();
        configure_font_fallbacks(fontdb);
    }

    let tree = usvg::Tree::from_str(&document, &opts)
        .map_err(|e| ExportError::ImageDecode(e.to_string()))?;

    let width = (FLOW_WIDTH * scale).ceil() as u32;
    let height = (FLOW_HEIGHT * scale).ceil() as u32;
    let mut pixmap =
        Pixmap::new(width, height).ok_or(ExportError::MissingDrawSurface { width, height })?;

    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| ExportError::PngEncode(e.to_string()))
}

/// Build the standalone print document around a viewport snapshot and
/// convert it to PDF bytes. A missing viewport is a no-op (`Ok(None)`).
///
/// The snapshot is the bare canvas markup, so interactive chrome such
/// as controls or a minimap never reaches the printed page.
pub fn export_print_document(viewport_svg: Option<&str>) -> Result<Option<Vec<u8>>, ExportError> {
    let Some(viewport) = viewport_svg else {
        return Ok(None);
    };

    let page_w = FLOW_WIDTH + PRINT_PAGE_PADDING * 2.0;
    let page_h = FLOW_HEIGHT + PRINT_TITLE_HEIGHT + PRINT_PAGE_PADDING * 2.0;
    let canvas_y = PRINT_PAGE_PADDING + PRINT_TITLE_HEIGHT;

    let document = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{page_w}" height="{page_h}" viewBox="0 0 {page_w} {page_h}">
<rect width="100%" height="100%" fill="#ffffff"/>
<text x="{pad}" y="{title_y}" font-size="16" font-family="Arial" font-weight="700" fill="#0f172a">{title}</text>
<rect x="{pad}" y="{canvas_y}" width="{w}" height="{h}" fill="none" stroke="#e2e8f0" stroke-width="1"/>
<g transform="translate({pad},{canvas_y})">{viewport}</g>
</svg>"##,
        page_w = page_w,
        page_h = page_h,
        pad = PRINT_PAGE_PADDING,
        title_y = PRINT_PAGE_PADDING + 16.0,
        title = PRINT_TITLE,
        canvas_y = canvas_y,
        w = FLOW_WIDTH,
        h = FLOW_HEIGHT,
        viewport = viewport,
    );

    let mut fontdb = svg2pdf::usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    configure_font_fallbacks_svg2pdf(&mut fontdb);

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(fontdb),
        ..Default::default()
    };

    let tree = svg2pdf::usvg::Tree::from_str(&document, &opts)
        .map_err(|e| ExportError::ImageDecode(e.to_string()))?;

    // Keep text as paths for broader viewer/font compatibility.
    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };
    let page_options = svg2pdf::PageOptions::default();

    svg2pdf::to_pdf(&tree, options, page_options)
        .map(Some)
        .map_err(|e| ExportError::PdfConvert(e.to_string()))
}

fn configure_font_fallbacks(fontdb: &mut usvg::fontdb::Database) {
    let mut sans_family: Option<String> = None;
    let mut first_family: Option<String> = None;

    for face in fontdb.faces() {
        for (family, _) in &face.families {
            if first_family.is_none() {
                first_family = Some(family.clone());
            }
            if sans_family.is_none() && family.to_ascii_lowercase().contains("sans") {
                sans_family = Some(family.clone());
            }
        }
    }

    if let Some(family) = sans_family.as_deref().or(first_family.as_deref()) {
        fontdb.set_sans_serif_family(family);
        fontdb.set_serif_family(family);
    }
}

fn configure_font_fallbacks_svg2pdf(fontdb: &mut svg2pdf::usvg::fontdb::Database) {
    let mut sans_family: Option<String> = None;
    let mut first_family: Option<String> = None;

    for face in fontdb.faces() {
        for (family, _) in &face.families {
            if first_family.is_none() {
                first_family = Some(family.clone());
            }
            if sans_family.is_none() && family.to_ascii_lowercase().contains("sans") {
                sans_family = Some(family.clone());
            }
        }
    }

    if let Some(family) = sans_family.as_deref().or(first_family.as_deref()) {
        fontdb.set_sans_serif_family(family);
        fontdb.set_serif_family(family);
    }
}
