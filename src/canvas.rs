use crate::decorate::{EDGE_STROKE, EDGE_STROKE_WIDTH, Role, decorate};
use crate::fonts::TextMeasure;
use crate::geometry::BBox;
use crate::graph::{Diagram, Node};
use crate::palette::{FALLBACK_NODE_HEIGHT, FALLBACK_NODE_WIDTH, FLOW_HEIGHT, FLOW_WIDTH};
use crate::selection::Selection;
use crate::svg::{colorize, data_url, escape_xml};

pub const ICON_SIZE: f32 = 60.0;
pub const LABEL_FONT_SIZE: f32 = 13.0;
pub const LABEL_FONT_WEIGHT: u16 = 600;

const GRID_GAP: f32 = 48.0;
const GRID_DOT_RADIUS: f32 = 1.4;
const GRID_DOT_COLOR: &str = "#94a3b8";
const LABEL_COLOR: &str = "#0f172a";
const SOURCE_RING: &str = "#2563eb";
const TARGET_RING: &str = "#f97316";

/// Painted size of a node: wide enough for its label, never narrower
/// than the default box. Hosts feed the result into
/// `Diagram::set_node_size` after the first paint.
pub fn measured_node_size<T: TextMeasure>(node: &Node, measure: &mut T) -> (f32, f32) {
    let (label_width, _) = measure.measure_text(&node.label, LABEL_FONT_SIZE, LABEL_FONT_WEIGHT);
    let width = FALLBACK_NODE_WIDTH.max(label_width + 16.0);
    (width, FALLBACK_NODE_HEIGHT)
}

/// Render the live viewport as a standalone SVG document: dotted
/// background, floating edges with arrowheads, and each node's
/// colorized icon, label and selection highlight. This is the markup a
/// hosting canvas paints, and what the print export snapshots.
pub fn render_canvas_svg(diagram: &Diagram, selection: &Selection) -> String {
    let (nodes, edges) = decorate(diagram, selection);
    let mut body = String::new();

    for view in &edges {
        body.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.1}" />"#,
            view.start.x, view.start.y, view.end.x, view.end.y, EDGE_STROKE, EDGE_STROKE_WIDTH,
        ));
        body.push_str(&arrow_head(
            view.end.x,
            view.end.y,
            (view.end.y - view.start.y).atan2(view.end.x - view.start.x),
        ));
    }

    for view in &nodes {
        let node = view.node;
        let bbox = BBox::of_node(node);
        let icon = data_url(&colorize(node.icon, &node.color));

        if let Some(ring) = match view.role {
            Role::Source => Some(SOURCE_RING),
            Role::Target => Some(TARGET_RING),
            Role::None => None,
        } {
            body.push_str(&format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="12" fill="none" stroke="{}" stroke-width="3" />"#,
                bbox.center.x - ICON_SIZE / 2.0 - 6.0,
                bbox.center.y - ICON_SIZE / 2.0 - 6.0,
                ICON_SIZE + 12.0,
                ICON_SIZE + 12.0,
                ring,
            ));
        }

        body.push_str(&format!(
            r#"<image href="{}" x="{:.2}" y="{:.2}" width="{:.0}" height="{:.0}" />"#,
            icon,
            bbox.center.x - ICON_SIZE / 2.0,
            bbox.center.y - ICON_SIZE / 2.0,
            ICON_SIZE,
            ICON_SIZE,
        ));
        body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{:.0}" font-family="Arial" font-weight="{}" fill="{}" text-anchor="middle">{}</text>"#,
            bbox.center.x,
            bbox.center.y + 52.0,
            LABEL_FONT_SIZE,
            LABEL_FONT_WEIGHT,
            LABEL_COLOR,
            escape_xml(&node.label),
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<defs><pattern id="dot-grid" width="{gap}" height="{gap}" patternUnits="userSpaceOnUse"><circle cx="{half_gap}" cy="{half_gap}" r="{dot_r}" fill="{dot_fill}"/></pattern></defs>
<rect width="100%" height="100%" fill="#ffffff"/>
<rect width="100%" height="100%" fill="url(#dot-grid)"/>
{body}
</svg>"##,
        w = FLOW_WIDTH,
        h = FLOW_HEIGHT,
        gap = GRID_GAP,
        half_gap = GRID_GAP / 2.0,
        dot_r = GRID_DOT_RADIUS,
        dot_fill = GRID_DOT_COLOR,
        body = body,
    )
}

fn arrow_head(x: f32, y: f32, angle: f32) -> String {
    let cos = angle.cos();
    let sin = angle.sin();
    let p1 = (x - cos * 12.0 + sin * 6.0, y - sin * 12.0 - cos * 6.0);
    let p2 = (x - cos * 12.0 - sin * 6.0, y - sin * 12.0 + cos * 6.0);
    format!(
        r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}" />"#,
        x, y, p1.0, p1.1, p2.0, p2.1, EDGE_STROKE,
    )
}
