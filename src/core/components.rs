//! Decomposed components table.

use crate::error::{DiagnosticsError, Result};
use crate::naming::SeasonalityKey;
use chrono::{DateTime, Utc};
use std::fmt;

/// Name of the 0/1 trend changepoint indicator column.
pub const TREND_CHANGEPOINTS_COL: &str = "trend_changepoints";
/// Name of the residual column.
pub const RESIDUAL_COL: &str = "residual";

/// An additive bucket of the model's prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Trend,
    Autoregression,
    LaggedRegressor,
    Seasonality(SeasonalityKey),
    Events,
}

impl Component {
    /// Column name used in the components table.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Trend => "trend",
            Component::Autoregression => "autoregression",
            Component::LaggedRegressor => "lagged_regressor",
            Component::Seasonality(key) => key.name(),
            Component::Events => "events",
        }
    }

    /// Inverse of [`Component::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trend" => Some(Component::Trend),
            "autoregression" => Some(Component::Autoregression),
            "lagged_regressor" => Some(Component::LaggedRegressor),
            "events" => Some(Component::Events),
            other => other.parse().ok().map(Component::Seasonality),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role of a data column in the components table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// The observed target values.
    Value,
    Component(Component),
    Residual,
    /// Any other caller-supplied column.
    Other,
}

/// A named column of the components table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentColumn {
    name: String,
    kind: ColumnKind,
    values: Vec<f64>,
}

impl ComponentColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Seasonality this column represents, by kind or by name.
    pub fn seasonality(&self) -> Option<SeasonalityKey> {
        match self.kind {
            ColumnKind::Component(Component::Seasonality(key)) => Some(key),
            ColumnKind::Other => self.name.parse().ok(),
            _ => None,
        }
    }
}

/// Time, target value, component and residual columns for each observation.
///
/// Column order is significant: the time column comes first, the value column
/// second, and the changepoint indicator (if any) last.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentsTable {
    time_col: String,
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<ComponentColumn>,
    trend_changepoints: Option<Vec<bool>>,
}

impl ComponentsTable {
    /// Create a table holding only the time and value columns.
    pub fn new(
        time_col: impl Into<String>,
        value_col: impl Into<String>,
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let time_col = time_col.into();
        let value_col = value_col.into();
        if values.len() != timestamps.len() {
            return Err(DiagnosticsError::RowMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        if time_col == value_col {
            return Err(DiagnosticsError::DuplicateColumn(value_col));
        }

        Ok(Self {
            time_col,
            timestamps,
            columns: vec![ComponentColumn {
                name: value_col,
                kind: ColumnKind::Value,
                values,
            }],
            trend_changepoints: None,
        })
    }

    /// Append a column after the existing data columns.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        kind: ColumnKind,
        values: Vec<f64>,
    ) -> Result<()> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(DiagnosticsError::RowMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        if name == self.time_col || name == TREND_CHANGEPOINTS_COL || self.get(&name).is_some() {
            return Err(DiagnosticsError::DuplicateColumn(name));
        }
        if kind == ColumnKind::Value {
            return Err(DiagnosticsError::InvalidParameter(
                "the table already has a value column".to_string(),
            ));
        }
        self.columns.push(ComponentColumn { name, kind, values });
        Ok(())
    }

    /// Append a component column named after the component.
    pub fn push_component(&mut self, component: Component, values: Vec<f64>) -> Result<()> {
        self.push_column(component.name(), ColumnKind::Component(component), values)
    }

    /// Attach the trend changepoint indicator, kept as the last column.
    pub fn set_trend_changepoints(&mut self, flags: Vec<bool>) -> Result<()> {
        if flags.len() != self.len() {
            return Err(DiagnosticsError::RowMismatch {
                expected: self.len(),
                got: flags.len(),
            });
        }
        self.trend_changepoints = Some(flags);
        Ok(())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn time_col(&self) -> &str {
        &self.time_col
    }

    pub fn value_col(&self) -> &str {
        &self.columns[0].name
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Data columns in table order, starting with the value column.
    pub fn columns(&self) -> &[ComponentColumn] {
        &self.columns
    }

    /// All column names in table order, including time and changepoint columns.
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.columns.len() + 2);
        names.push(self.time_col.as_str());
        names.extend(self.columns.iter().map(|c| c.name.as_str()));
        if self.trend_changepoints.is_some() {
            names.push(TREND_CHANGEPOINTS_COL);
        }
        names
    }

    pub fn get(&self, name: &str) -> Option<&ComponentColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of a data column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.get(name).map(|c| c.values.as_slice())
    }

    pub fn component(&self, component: Component) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.kind == ColumnKind::Component(component))
            .map(|c| c.values.as_slice())
    }

    pub fn values(&self) -> &[f64] {
        &self.columns[0].values
    }

    pub fn residual(&self) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.kind == ColumnKind::Residual)
            .map(|c| c.values.as_slice())
    }

    /// The 0/1 changepoint indicator, if present.
    pub fn trend_changepoints(&self) -> Option<&[bool]> {
        self.trend_changepoints.as_deref()
    }

    /// Timestamps flagged in the changepoint indicator.
    pub fn changepoint_times(&self) -> Vec<DateTime<Utc>> {
        match &self.trend_changepoints {
            Some(flags) => self
                .timestamps
                .iter()
                .zip(flags)
                .filter(|(_, flag)| **flag)
                .map(|(t, _)| *t)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Split off the changepoint indicator, returning the flagged timestamps.
    pub fn take_changepoints(&mut self) -> Option<Vec<DateTime<Utc>>> {
        let times = self.trend_changepoints.as_ref().map(|_| self.changepoint_times());
        self.trend_changepoints = None;
        times
    }

    /// Row-wise sum of component columns (everything except value and residual).
    pub fn component_total(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.len()];
        for column in &self.columns {
            if let ColumnKind::Component(_) = column.kind {
                for (acc, v) in total.iter_mut().zip(&column.values) {
                    *acc += v;
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_table() -> ComponentsTable {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ts = (0..3).map(|i| base + Duration::days(i)).collect();
        ComponentsTable::new("ts", "y", ts, vec![1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn component_names_round_trip() {
        let components = [
            Component::Trend,
            Component::Autoregression,
            Component::LaggedRegressor,
            Component::Seasonality(SeasonalityKey::Monthly),
            Component::Events,
        ];
        for c in components {
            assert_eq!(Component::from_name(c.name()), Some(c));
        }
        assert_eq!(Component::from_name("residual"), None);
        assert_eq!(
            Component::Seasonality(SeasonalityKey::Daily).to_string(),
            "DAILY_SEASONALITY"
        );
    }

    #[test]
    fn column_names_keep_changepoints_last() {
        let mut table = make_table();
        table.push_component(Component::Trend, vec![0.0; 3]).unwrap();
        table.set_trend_changepoints(vec![false, true, false]).unwrap();
        table
            .push_column(RESIDUAL_COL, ColumnKind::Residual, vec![0.0; 3])
            .unwrap();
        assert_eq!(
            table.column_names(),
            vec!["ts", "y", "trend", "residual", "trend_changepoints"]
        );
        assert_eq!(table.changepoint_times(), vec![table.timestamps()[1]]);
    }

    #[test]
    fn push_column_validates_length_and_names() {
        let mut table = make_table();
        assert!(matches!(
            table.push_column("x", ColumnKind::Other, vec![1.0]),
            Err(DiagnosticsError::RowMismatch { .. })
        ));
        assert!(matches!(
            table.push_column("y", ColumnKind::Other, vec![0.0; 3]),
            Err(DiagnosticsError::DuplicateColumn(_))
        ));
        assert!(matches!(
            table.push_column("ts", ColumnKind::Other, vec![0.0; 3]),
            Err(DiagnosticsError::DuplicateColumn(_))
        ));
        assert!(table.push_column("v", ColumnKind::Value, vec![0.0; 3]).is_err());
    }

    #[test]
    fn take_changepoints_removes_indicator() {
        let mut table = make_table();
        table.set_trend_changepoints(vec![true, false, true]).unwrap();
        let times = table.take_changepoints().unwrap();
        assert_eq!(times.len(), 2);
        assert!(table.trend_changepoints().is_none());
        assert!(table.take_changepoints().is_none());
    }

    #[test]
    fn seasonality_is_recognised_by_kind_or_name() {
        let mut table = make_table();
        table
            .push_component(Component::Seasonality(SeasonalityKey::Weekly), vec![0.0; 3])
            .unwrap();
        table
            .push_column("YEARLY_SEASONALITY", ColumnKind::Other, vec![0.0; 3])
            .unwrap();
        table.push_column("extra", ColumnKind::Other, vec![0.0; 3]).unwrap();

        let keys: Vec<_> = table.columns().iter().map(|c| c.seasonality()).collect();
        assert_eq!(
            keys,
            vec![
                None,
                Some(SeasonalityKey::Weekly),
                Some(SeasonalityKey::Yearly),
                None
            ]
        );
    }

    #[test]
    fn component_total_skips_value_and_residual() {
        let mut table = make_table();
        table.push_component(Component::Trend, vec![1.0, 1.0, 1.0]).unwrap();
        table.push_component(Component::Events, vec![0.0, 2.0, 0.0]).unwrap();
        table
            .push_column(RESIDUAL_COL, ColumnKind::Residual, vec![9.0; 3])
            .unwrap();
        assert_eq!(table.component_total(), vec![1.0, 3.0, 1.0]);
        assert_eq!(table.component(Component::Events), Some(&[0.0, 2.0, 0.0][..]));
        assert_eq!(table.residual(), Some(&[9.0, 9.0, 9.0][..]));
    }
}
