//! Feature column naming convention.
//!
//! This module provides the boundary contract with the feature-generation step:
//! - Patterns that identify trend, seasonality, lag and event columns
//! - The fixed seasonality registry (grouping feature and axis labels)
//! - Extraction of trend changepoint dates from column names

mod changepoints;
mod patterns;
mod seasonality;

pub use changepoints::{changepoint_dates_from_cols, changepoint_indicator};
pub use patterns::{
    pattern_columns, ColumnClassification, NamingConvention, DEFAULT_CHANGEPOINT_DATE_PATTERN,
    DEFAULT_EVENT_PATTERN, DEFAULT_LAG_PATTERN, DEFAULT_SEASONALITY_PATTERN,
    DEFAULT_TREND_PATTERN, INTERACTION_SEPARATOR,
};
pub use seasonality::{SeasonalityKey, SeasonalityMetadata, TimeFeature};
