//! Component decomposition.
//!
//! This module provides:
//! - `ComponentDecomposer`: splits a weighted design matrix into trend,
//!   autoregression, lagged regressor, seasonality and event components
//! - `regroup_seasonality`: folds a seasonal component onto its cycle

mod decomposer;
mod regroup;

pub use decomposer::ComponentDecomposer;
pub use regroup::{regroup_seasonality, SeasonalProfile};
