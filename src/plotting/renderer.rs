//! Multi-panel component plots.

use super::config::RenderConfig;
use super::figure::{Axis, AxisValues, Figure, Panel, Trace};
use crate::core::{Component, ComponentsTable};
use crate::decomposition::regroup_seasonality;
use crate::error::{DiagnosticsError, Result};
use crate::utils::{nan_max, nan_min};
use chrono::{DateTime, Utc};

/// Which columns of a components table get a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSelection {
    /// Columns to plot, in table order, value column first.
    pub kept: Vec<String>,
    /// Requested names that are not in the table.
    pub missing: Vec<String>,
}

/// Resolve the requested component names against the table.
///
/// With no request every data column is kept. Otherwise the kept names follow
/// table order, not request order. Requested names missing from the table are
/// reported but do not fail the selection unless nothing matches. The value
/// column is always the first panel.
pub fn select_panels(table: &ComponentsTable, names: Option<&[&str]>) -> Result<PanelSelection> {
    let columns: Vec<&str> = table.columns().iter().map(|c| c.name()).collect();

    let Some(names) = names else {
        return Ok(PanelSelection {
            kept: columns.into_iter().map(str::to_string).collect(),
            missing: Vec::new(),
        });
    };

    let mut kept: Vec<String> = columns
        .iter()
        .filter(|c| names.contains(*c))
        .map(|c| c.to_string())
        .collect();

    let mut missing: Vec<String> = Vec::new();
    for name in names {
        let known = *name == table.time_col() || columns.contains(name);
        if !known && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }

    if kept.is_empty() {
        return Err(DiagnosticsError::NoMatchingComponents);
    }

    let value_col = table.value_col();
    if kept[0] != value_col {
        kept.insert(0, value_col.to_string());
    }

    Ok(PanelSelection { kept, missing })
}

/// Lays out one panel per component.
#[derive(Debug, Clone, Default)]
pub struct ComponentRenderer {
    config: RenderConfig,
}

impl ComponentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Plot the components of `table`.
    ///
    /// # Arguments
    /// * `table` - Components table, e.g. from `ComponentDecomposer::decompose`
    /// * `names` - Components to plot; `None` plots every column
    /// * `title` - Figure title; defaults to the configured title
    ///
    /// Seasonality columns are averaged over their cycle before plotting.
    /// Trend changepoints in the table are drawn as dashed vertical markers
    /// in the trend panel.
    pub fn render(
        &self,
        table: &ComponentsTable,
        names: Option<&[&str]>,
        title: Option<&str>,
    ) -> Result<Figure> {
        let changepoints = table.trend_changepoints().map(|_| table.changepoint_times());

        let selection = select_panels(table, names)?;
        if !selection.missing.is_empty() {
            tracing::warn!(
                missing = ?selection.missing,
                "the following components have not been specified in the model, plotting the rest"
            );
        }

        let num_panels = selection.kept.len();
        let mut panels = Vec::with_capacity(num_panels);
        for (ind, name) in selection.kept.iter().enumerate() {
            panels.push(self.component_panel(table, name, ind + 1)?);
        }

        let trend_name = Component::Trend.name();
        if let (Some(changepoints), Some(trend_row)) = (
            changepoints,
            selection.kept.iter().position(|n| n == trend_name),
        ) {
            let trend = table.column(trend_name).unwrap_or(&[]);
            if let (Some(low), Some(high)) = (nan_min(trend), nan_max(trend)) {
                let markers = self.changepoint_traces(&changepoints, low, high);
                panels[trend_row].traces.extend(markers);
            }
        }

        Ok(Figure {
            title: title.unwrap_or(&self.config.default_title).to_string(),
            title_x: 0.5,
            height: self.config.figure_height(num_panels),
            vertical_spacing: self.config.vertical_spacing(num_panels),
            show_legend: true,
            panels,
        })
    }

    fn component_panel(&self, table: &ComponentsTable, name: &str, row: usize) -> Result<Panel> {
        let column = table
            .get(name)
            .ok_or_else(|| DiagnosticsError::UnknownColumn(name.to_string()))?;

        let (x, y, xlabel, ylabel) = match column.seasonality() {
            Some(key) => {
                let profile = regroup_seasonality(table.timestamps(), column.values(), key)?;
                (
                    AxisValues::Numeric(profile.x),
                    profile.y,
                    profile.xlabel,
                    profile.ylabel,
                )
            }
            None => (
                AxisValues::Time(table.timestamps().to_vec()),
                column.values().to_vec(),
                table.time_col().to_string(),
                name.to_string(),
            ),
        };

        Ok(Panel {
            row,
            x_axis: Axis::framed(xlabel),
            y_axis: Axis::framed(ylabel),
            traces: vec![Trace {
                name: name.to_string(),
                mode: "lines".to_string(),
                x,
                y,
                opacity: Some(self.config.opacity),
                show_legend: false,
                line: None,
            }],
        })
    }

    /// One vertical marker per changepoint; only the first gets a legend entry.
    fn changepoint_traces(&self, changepoints: &[DateTime<Utc>], low: f64, high: f64) -> Vec<Trace> {
        changepoints
            .iter()
            .enumerate()
            .map(|(i, cp)| Trace {
                name: self.config.changepoint_name.clone(),
                mode: "lines".to_string(),
                x: AxisValues::Time(vec![*cp, *cp]),
                y: vec![low, high],
                opacity: None,
                show_legend: i == 0,
                line: Some(self.config.changepoint_line.clone()),
            })
            .collect()
    }
}
