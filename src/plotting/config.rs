//! Layout and styling settings for component plots.

use super::figure::{Dash, LineStyle};

/// Settings used by [`ComponentRenderer`](super::ComponentRenderer).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Title used when none is given.
    pub default_title: String,
    /// Height of each panel in pixels; the figure grows with panel count.
    pub panel_height: u32,
    /// Total vertical gap, divided evenly among panels.
    pub spacing_budget: f64,
    /// Opacity of component traces.
    pub opacity: f64,
    /// Legend entry of the changepoint markers.
    pub changepoint_name: String,
    /// Stroke of the changepoint markers.
    pub changepoint_line: LineStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_title: "Component plots".to_string(),
            panel_height: 350,
            spacing_budget: 0.35,
            opacity: 0.8,
            changepoint_name: "trend change point".to_string(),
            changepoint_line: LineStyle {
                color: "#F44336".to_string(), // red 500
                width: 1.5,
                dash: Dash::Dash,
            },
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    pub fn with_panel_height(mut self, height: u32) -> Self {
        self.panel_height = height;
        self
    }

    pub fn with_spacing_budget(mut self, spacing: f64) -> Self {
        self.spacing_budget = spacing;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_changepoint_line(mut self, line: LineStyle) -> Self {
        self.changepoint_line = line;
        self
    }

    /// Figure height for `num_panels` panels.
    pub fn figure_height(&self, num_panels: usize) -> u32 {
        self.panel_height.saturating_mul(num_panels as u32)
    }

    /// Gap between panels for `num_panels` panels.
    pub fn vertical_spacing(&self, num_panels: usize) -> f64 {
        if num_panels == 0 {
            return 0.0;
        }
        self.spacing_budget / num_panels as f64
    }
}
