use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use cloudgram::export::DEFAULT_PNG_FILENAME;
use cloudgram::fonts::CosmicTextMeasure;
use cloudgram::selection::Editor;
use cloudgram::{canvas, export};

/// Compose cloud architecture diagrams and export them
#[derive(Parser, Debug)]
#[command(name = "cloudgram")]
#[command(about = "Render a cloud diagram description to SVG, PNG or PDF", long_about = None)]
struct Args {
    /// Input diagram description in JSON (use "-" for stdin)
    #[arg(value_name = "INPUT", required_unless_present = "list_palette")]
    input: Option<PathBuf>,

    /// Output file path (extension determines format: .svg, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_PNG_FILENAME)]
    output: PathBuf,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// List the palette kinds and exit
    #[arg(long)]
    list_palette: bool,
}

/// One node of the input description.
#[derive(Debug, Deserialize)]
struct NodeSpec {
    kind: String,
    x: f32,
    y: f32,
    label: Option<String>,
    color: Option<String>,
}

/// JSON description of a diagram: placed nodes plus directed
/// connections given as (source, target) indices into `nodes`.
#[derive(Debug, Deserialize)]
struct DiagramSpec {
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    connections: Vec<(usize, usize)>,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    if args.list_palette {
        for entry in cloudgram::palette() {
            println!("{}\t{}\t{}", entry.key, entry.label, entry.color);
        }
        return Ok(());
    }

    let input = args.input.ok_or("Missing input file")?;
    let source = if input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(&input)
            .map_err(|e| format!("Failed to read input file: {}", e))?
    };

    let description: DiagramSpec =
        serde_json::from_str(&source).map_err(|e| format!("Failed to parse diagram JSON: {}", e))?;

    let editor = build_editor(&description)?;

    let output_ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or("Output file has no extension")?
        .to_ascii_lowercase();

    match output_ext.as_str() {
        "svg" => {
            let svg = canvas::render_canvas_svg(editor.diagram(), editor.selection());
            std::fs::write(&args.output, svg).map_err(|e| format!("Failed to write SVG: {}", e))?;
            eprintln!("SVG saved to: {}", args.output.display());
        }
        "png" => {
            let png_data = export::export_png(editor.diagram(), args.png_scale)
                .map_err(|e| e.to_string())?;
            std::fs::write(&args.output, png_data)
                .map_err(|e| format!("Failed to write PNG: {}", e))?;
            eprintln!("PNG saved to: {}", args.output.display());
        }
        "pdf" => {
            let viewport = canvas::render_canvas_svg(editor.diagram(), editor.selection());
            let pdf_data = export::export_print_document(Some(&viewport))
                .map_err(|e| e.to_string())?
                .ok_or("Print export produced no document")?;
            std::fs::write(&args.output, pdf_data)
                .map_err(|e| format!("Failed to write PDF: {}", e))?;
            eprintln!("PDF saved to: {}", args.output.display());
        }
        _ => {
            return Err(format!(
                "Unsupported output format: .{} (use .svg, .png or .pdf)",
                output_ext
            ));
        }
    }

    Ok(())
}

/// Replay the description through the editor: place nodes, apply
/// overrides, measure labels, then connect. Unknown palette kinds are
/// dropped with a warning, as a host canvas would drop an unknown
/// drag-and-drop payload.
fn build_editor(spec: &DiagramSpec) -> Result<Editor, String> {
    let mut editor = Editor::new();
    let mut measure = CosmicTextMeasure::new()?;

    let mut placed_ids: Vec<Option<String>> = Vec::with_capacity(spec.nodes.len());
    for node_spec in &spec.nodes {
        match editor.add_node(&node_spec.kind, node_spec.x, node_spec.y) {
            Ok(node) => placed_ids.push(Some(node.id.clone())),
            Err(e) => {
                eprintln!("Skipping node: {}", e);
                placed_ids.push(None);
            }
        }
    }

    for (node_spec, id) in spec.nodes.iter().zip(&placed_ids) {
        let Some(id) = id else { continue };
        if let Some(ref label) = node_spec.label {
            editor.update_node_label(id, label);
        }
        if let Some(ref color) = node_spec.color {
            editor.update_node_color(id, color);
        }
        let (w, h) = {
            let node = editor
                .diagram()
                .node(id)
                .ok_or("Placed node vanished from the store")?;
            canvas::measured_node_size(node, &mut measure)
        };
        editor.set_node_size(id, w, h);
    }

    for &(from, to) in &spec.connections {
        let (Some(Some(source)), Some(Some(target))) = (placed_ids.get(from), placed_ids.get(to))
        else {
            eprintln!("Skipping connection {} -> {}: no such node", from, to);
            continue;
        };
        editor.connect(source, &[target.clone()]);
    }

    Ok(editor)
}
