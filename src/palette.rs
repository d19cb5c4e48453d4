use std::sync::LazyLock;

use crate::svg::{colorize, data_url};

pub const FLOW_WIDTH: f32 = 1200.0;
pub const FLOW_HEIGHT: f32 = 650.0;

/// Node size assumed until the host reports a measured size.
pub const FALLBACK_NODE_WIDTH: f32 = 76.0;
pub const FALLBACK_NODE_HEIGHT: f32 = 90.0;

/// A placeable node kind: key, display label, default fill color and
/// the raw vector icon markup.
#[derive(Debug, Clone)]
pub struct PaletteEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    /// Colorized icon as a data URL, precomputed for palette previews.
    pub preview: String,
}

const RAW_PALETTE: &[(&str, &str, &str, &str)] = &[
    (
        "Application",
        "Application",
        "#2563eb",
        include_str!("../assets/icons/application.svg"),
    ),
    (
        "API GateWay",
        "API Gateway",
        "#16a34a",
        include_str!("../assets/icons/api-gateway.svg"),
    ),
    (
        "Database",
        "Database",
        "#0ea5e9",
        include_str!("../assets/icons/database.svg"),
    ),
    (
        "Server",
        "Server",
        "#6366f1",
        include_str!("../assets/icons/server.svg"),
    ),
    (
        "Cache",
        "Cache",
        "#f59e0b",
        include_str!("../assets/icons/cache.svg"),
    ),
    (
        "Message Broker",
        "Message Broker",
        "#f97316",
        include_str!("../assets/icons/message-broker.svg"),
    ),
    (
        "Object Storage",
        "Object Storage",
        "#06b6d4",
        include_str!("../assets/icons/object-storage.svg"),
    ),
    (
        "Auth Service",
        "Auth Service",
        "#7c3aed",
        include_str!("../assets/icons/auth-service.svg"),
    ),
    (
        "Logging Service",
        "Logging Service",
        "#ef4444",
        include_str!("../assets/icons/logging-service.svg"),
    ),
    (
        "Monitoring",
        "Monitoring",
        "#10b981",
        include_str!("../assets/icons/monitoring.svg"),
    ),
    (
        "User",
        "User",
        "#334155",
        include_str!("../assets/icons/user.svg"),
    ),
];

static PALETTE: LazyLock<Vec<PaletteEntry>> = LazyLock::new(|| {
    RAW_PALETTE
        .iter()
        .map(|&(key, label, color, icon)| PaletteEntry {
            key,
            label,
            color,
            icon,
            preview: data_url(&colorize(icon, color)),
        })
        .collect()
});

/// The full catalog, in palette display order.
pub fn palette() -> &'static [PaletteEntry] {
    &PALETTE
}

/// Look up a catalog entry by kind key.
pub fn palette_entry(key: &str) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|entry| entry.key == key)
}
