//! Document themes: attribute overrides applied to unset model properties

use serde::{Deserialize, Serialize};

use crate::model::Color;
use crate::Result;

/// A document theme, mirroring the JSON shape `{"attrs": {"Plot": {...}}}`.
///
/// Themed values apply only to attributes the document leaves unset;
/// explicitly set colors (including explicit transparency) always win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub attrs: ThemeAttrs,
}

/// Per-type attribute overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeAttrs {
    #[serde(rename = "Plot", default, skip_serializing_if = "PlotAttrs::is_empty")]
    pub plot: PlotAttrs,
}

/// Overrides for plot styling attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_fill_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_line_color: Option<Color>,
}

impl PlotAttrs {
    pub fn is_empty(&self) -> bool {
        self.background_fill_color.is_none()
            && self.border_fill_color.is_none()
            && self.outline_line_color.is_none()
    }
}

impl Theme {
    /// Parse a theme from its JSON representation.
    pub fn from_json(json: &str) -> Result<Theme> {
        Ok(serde_json::from_str(json)?)
    }
}
