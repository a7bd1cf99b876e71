//! Target series: the observed values a model was fitted against.

use crate::error::{DiagnosticsError, Result};
use chrono::{DateTime, Utc};

/// Default name of the time column.
pub const DEFAULT_TIME_COL: &str = "ts";
/// Default name of the value column.
pub const DEFAULT_VALUE_COL: &str = "y";

/// A named univariate time series.
///
/// The column names matter: `value_col` is matched against lag feature names
/// to tell autoregression apart from lagged regressors, and both names become
/// the leading columns of the components table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    time_col: String,
    value_col: String,
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

/// Builder for constructing a [`TimeSeries`].
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder {
    time_col: String,
    value_col: String,
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl Default for TimeSeriesBuilder {
    fn default() -> Self {
        Self {
            time_col: DEFAULT_TIME_COL.to_string(),
            value_col: DEFAULT_VALUE_COL.to_string(),
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl TimeSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_col(mut self, name: impl Into<String>) -> Self {
        self.time_col = name.into();
        self
    }

    pub fn value_col(mut self, name: impl Into<String>) -> Self {
        self.value_col = name.into();
        self
    }

    pub fn timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    pub fn build(self) -> Result<TimeSeries> {
        TimeSeries::new(self.time_col, self.value_col, self.timestamps, self.values)
    }
}

impl TimeSeries {
    /// Create a new series with explicit column names.
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
        if time_col.is_empty() || value_col.is_empty() {
            return Err(DiagnosticsError::InvalidParameter(
                "column names must be non-empty".to_string(),
            ));
        }
        if time_col == value_col {
            return Err(DiagnosticsError::DuplicateColumn(time_col));
        }

        Ok(Self {
            time_col,
            value_col,
            timestamps,
            values,
        })
    }

    /// Create a series using the default column names (`ts`, `y`).
    pub fn univariate(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::new(DEFAULT_TIME_COL, DEFAULT_VALUE_COL, timestamps, values)
    }

    pub fn builder() -> TimeSeriesBuilder {
        TimeSeriesBuilder::new()
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn time_col(&self) -> &str {
        &self.time_col
    }

    pub fn value_col(&self) -> &str {
        &self.value_col
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return a copy with observations containing NaN values removed.
    pub fn drop_missing(&self) -> Self {
        let (timestamps, values) = self
            .timestamps
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| !v.is_nan())
            .map(|(t, v)| (*t, *v))
            .unzip();

        Self {
            time_col: self.time_col.clone(),
            value_col: self.value_col.clone(),
            timestamps,
            values,
        }
    }
}
