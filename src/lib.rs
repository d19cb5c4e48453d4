//! Cloud architecture diagram engine: a palette of iconic node kinds, a
//! directed graph store, a click-driven connection selection machine,
//! floating-edge geometry, and SVG/PNG/PDF export.

pub mod canvas;
pub mod decorate;
pub mod error;
pub mod export;
pub mod fonts;
pub mod geometry;
pub mod graph;
pub mod palette;
pub mod selection;
pub mod svg;

pub use canvas::{measured_node_size, render_canvas_svg};
pub use decorate::{Role, decorate};
pub use error::{DiagramError, ExportError};
pub use export::{DEFAULT_PNG_FILENAME, export_png, export_print_document};
pub use geometry::{BBox, Point, edge_endpoints};
pub use graph::{Diagram, Edge, Node};
pub use palette::{PaletteEntry, palette, palette_entry};
pub use selection::{Editor, Selection};
