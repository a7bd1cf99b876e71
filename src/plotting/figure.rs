//! Renderer-agnostic figure description.
//!
//! A [`Figure`] is a stack of panels sharing one column. It carries all the
//! data needed to draw the chart and serializes to JSON for any front end.

use crate::error::{DiagnosticsError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// X coordinates of a trace: timestamps or a numeric cycle position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValues {
    Time(Vec<DateTime<Utc>>),
    Numeric(Vec<f64>),
}

impl AxisValues {
    pub fn len(&self) -> usize {
        match self {
            AxisValues::Time(v) => v.len(),
            AxisValues::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Line dash style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

/// Stroke settings for a line trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: Dash,
}

/// A single line series drawn in a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub mode: String,
    pub x: AxisValues,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

/// Axis title and frame settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(rename = "showline")]
    pub show_line: bool,
    /// Draw the frame line on the opposite side too.
    pub mirror: bool,
}

impl Axis {
    /// A framed axis with the given title.
    pub fn framed(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            show_line: true,
            mirror: true,
        }
    }
}

/// One row of the figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// 1-based row index.
    pub row: usize,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub traces: Vec<Trace>,
}

/// Vertically stacked multi-panel figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    /// Horizontal title position as a fraction of the width.
    pub title_x: f64,
    /// Total height in pixels.
    pub height: u32,
    /// Gap between panels as a fraction of the figure height.
    pub vertical_spacing: f64,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn num_panels(&self) -> usize {
        self.panels.len()
    }

    /// Panel whose y axis is titled `title`.
    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.y_axis.title == title)
    }

    /// Names of the first trace in each panel, top to bottom.
    pub fn panel_names(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter_map(|p| p.traces.first())
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Serialize the figure description to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DiagnosticsError::InvalidParameter(format!("figure serialization: {e}")))
    }
}
