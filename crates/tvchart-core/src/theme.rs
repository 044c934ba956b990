// File: crates/tvchart-core/src/theme.rs
// Summary: Light/Dark theme presets and the top-level layout config sent with each payload.

use serde::{Deserialize, Serialize};

/// Top-level chart colours, decoded from the payload's `config` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub grid_color: Option<String>,
    pub border_color: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub grid: &'static str,
    pub candle_up: &'static str,
    pub candle_down: &'static str,
    pub wick_up: &'static str,
    pub wick_down: &'static str,
    /// Colours handed out to line overlays in order, wrapping around.
    pub line_palette: &'static [&'static str],
    pub volume_up: &'static str,
    pub volume_down: &'static str,
}

const PALETTE: &[&str] = &[
    "rgba(69,114,167,255)",
    "rgba(170,70,67,255)",
    "rgba(137,165,78,255)",
    "rgba(113,88,143,255)",
    "rgba(65,152,175,255)",
    "rgba(219,132,61,255)",
    "rgba(147,169,207,255)",
];

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: "#ffffff",
            text: "#191919",
            border: "rgba(197, 203, 206, 0.8)",
            grid: "rgba(197, 203, 206, 0.5)",
            ..Self::dark()
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: "#000000",
            text: "rgba(255, 255, 255, 0.9)",
            border: "rgba(197, 203, 206, 0.8)",
            grid: "rgba(197, 203, 206, 0.5)",
            candle_up: "rgb(38,166,154)",
            candle_down: "rgb(255,82,82)",
            wick_up: "rgb(38,166,154)",
            wick_down: "rgb(255,82,82)",
            line_palette: PALETTE,
            volume_up: "rgba(0, 150, 136, 0.8)",
            volume_down: "rgba(255,82,82, 0.8)",
        }
    }

    /// Palette colour for the `n`-th line overlay.
    pub fn line_colour(&self, n: usize) -> &'static str {
        self.line_palette[n % self.line_palette.len()]
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            background_color: Some(self.background.to_string()),
            text_color: Some(self.text.to_string()),
            grid_color: Some(self.grid.to_string()),
            border_color: Some(self.border.to_string()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::light)
}
