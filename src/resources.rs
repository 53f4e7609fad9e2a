//! Resource-bundling descriptor for HTML snapshots

use serde::{Deserialize, Serialize};

/// How viewer assets are referenced from an HTML snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    /// Embed the assets into the document
    #[default]
    Inline,
    /// Reference the assets by file name
    Linked,
}

/// Resource-bundling descriptor accepted by every export entry point.
///
/// Only the HTML snapshot consumes it; raster and vector output are
/// identical for every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub mode: ResourceMode,
    pub minified: bool,
}

impl Default for Resources {
    fn default() -> Self {
        Resources { mode: ResourceMode::Inline, minified: true }
    }
}
