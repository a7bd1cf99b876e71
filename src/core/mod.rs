//! Core data structures for component decomposition.

mod components;
mod feature_matrix;
mod time_series;

pub use components::{
    ColumnKind, Component, ComponentColumn, ComponentsTable, RESIDUAL_COL, TREND_CHANGEPOINTS_COL,
};
pub use feature_matrix::{FeatureMatrix, INTERCEPT_COL};
pub use time_series::{TimeSeries, TimeSeriesBuilder, DEFAULT_TIME_COL, DEFAULT_VALUE_COL};
