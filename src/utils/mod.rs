//! Utility functions shared by decomposition and summaries.

pub mod metrics;
pub mod stats;

pub use metrics::{calculate_fit_accuracy, FitAccuracy};
pub use stats::{nan_max, nan_mean, nan_min};
