use thiserror::Error;

/// Graph store mutation failures.
#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    #[error("unknown palette kind: {0}")]
    UnknownPaletteKind(String),
}

/// Export pipeline failures. Each one is terminal for the single export
/// call that raised it; no partial output is produced.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid raster scale: {0}")]
    InvalidScale(f32),
    #[error("failed to decode export document: {0}")]
    ImageDecode(String),
    #[error("failed to acquire a {width}x{height} drawing surface")]
    MissingDrawSurface { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    PngEncode(String),
    #[error("failed to convert document to PDF: {0}")]
    PdfConvert(String),
}
