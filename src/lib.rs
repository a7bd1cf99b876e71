//! # forecast-components
//!
//! Component diagnostics for additive forecast models.
//!
//! Splits a fitted linear model's weighted design matrix into trend,
//! autoregression, lagged regressor, seasonality and event components
//! using feature-column naming conventions, folds seasonalities onto
//! their natural cycle, and lays the result out as a multi-panel figure
//! description. Also provides descriptive model summaries.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod core;
pub mod decomposition;
pub mod diagnostics;
pub mod error;
pub mod naming;
pub mod plotting;
pub mod utils;

pub use error::{DiagnosticsError, Result};

pub mod prelude {
    pub use crate::core::{Component, ComponentsTable, FeatureMatrix, TimeSeries};
    pub use crate::decomposition::{regroup_seasonality, ComponentDecomposer, SeasonalProfile};
    pub use crate::diagnostics::{
        ComponentDiagnostics, FitAlgorithm, FittedModel, ModelArtifact, ModelSummary,
    };
    pub use crate::error::{DiagnosticsError, Result};
    pub use crate::naming::{NamingConvention, SeasonalityKey};
    pub use crate::plotting::{ComponentRenderer, Figure, RenderConfig};
}
