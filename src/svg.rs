use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Inject a fill color into an icon's root `<svg>` start tag.
///
/// Plain text substitution on the first occurrence. The palette icons
/// carry no fill attribute on their root element (checked by the
/// palette tests), so the injected fill cascades to every path.
pub fn colorize(icon: &str, color: &str) -> String {
    icon.replacen("<svg ", &format!("<svg fill=\"{}\" ", color), 1)
}

/// Encode an SVG document as a `data:` URL suitable for `<image href>`.
pub fn data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64.encode(svg))
}

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escape label text for embedding in SVG markup, dropping characters
/// that are not valid XML at all.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
