//! Component diagnostics for fitted forecast models.
//!
//! [`ComponentDiagnostics`] ties decomposition, plotting and summaries to a
//! fitted [`ModelArtifact`]. It caches the last computed components table and
//! model summary; each call overwrites the cache wholesale.

mod model;
mod summary;

pub use model::{FitAlgorithm, FittedModel, ModelArtifact};
pub use summary::{ModelSummary, PredictorCategories, PredictorSummary, DEFAULT_MAX_COLWIDTH};

use crate::core::{ComponentsTable, FeatureMatrix, TimeSeries};
use crate::decomposition::{regroup_seasonality, ComponentDecomposer, SeasonalProfile};
use crate::error::{DiagnosticsError, Result};
use crate::naming::{NamingConvention, SeasonalityKey};
use crate::plotting::{ComponentRenderer, Figure, RenderConfig};

/// Plots and summaries for a fitted additive model.
#[derive(Debug, Clone, Default)]
pub struct ComponentDiagnostics {
    decomposer: ComponentDecomposer,
    renderer: ComponentRenderer,
    pred_category: Option<PredictorCategories>,
    time_col: Option<String>,
    value_col: Option<String>,
    components: Option<ComponentsTable>,
    model_summary: Option<ModelSummary>,
}

impl ComponentDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom naming convention for column classification.
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.decomposer = self.decomposer.with_naming(naming);
        self
    }

    /// Use custom plot settings.
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.renderer = self.renderer.with_config(config);
        self
    }

    /// Record column names and predictor categories after the model is fitted.
    pub fn set_params(
        &mut self,
        pred_category: Option<PredictorCategories>,
        time_col: impl Into<String>,
        value_col: impl Into<String>,
    ) {
        self.pred_category = pred_category;
        self.time_col = Some(time_col.into());
        self.value_col = Some(value_col.into());
    }

    pub fn pred_category(&self) -> Option<&PredictorCategories> {
        self.pred_category.as_ref()
    }

    /// Components computed by the last `plot_components` call.
    pub fn components(&self) -> Option<&ComponentsTable> {
        self.components.as_ref()
    }

    /// Summary computed by the last `summary` call.
    pub fn model_summary(&self) -> Option<&ModelSummary> {
        self.model_summary.as_ref()
    }

    /// Summarize the model, or clear the cached summary when `artifact` is `None`.
    pub fn summary(
        &mut self,
        artifact: Option<&ModelArtifact>,
        max_colwidth: usize,
    ) -> Result<Option<&ModelSummary>> {
        self.model_summary = match artifact {
            Some(artifact) => Some(ModelSummary::new(
                artifact,
                self.pred_category.as_ref(),
                self.decomposer.naming(),
                max_colwidth,
            )?),
            None => None,
        };
        Ok(self.model_summary.as_ref())
    }

    /// Decompose the training observations of `artifact` and plot them.
    ///
    /// Components are recomputed on every call in case the model was refit.
    ///
    /// # Errors
    /// * `ParamsNotSet` if there is no artifact or `set_params` was not called
    /// * `UnsupportedModel` if the model has no coefficients
    /// * `UnknownColumn` if the artifact's columns differ from the configured ones
    /// * `NoMatchingComponents` if none of `names` are in the model
    pub fn plot_components(
        &mut self,
        artifact: Option<&ModelArtifact>,
        names: Option<&[&str]>,
        title: Option<&str>,
    ) -> Result<Figure> {
        let artifact = artifact.ok_or(DiagnosticsError::ParamsNotSet)?;
        let (time_col, value_col) = match (&self.time_col, &self.value_col) {
            (Some(t), Some(v)) => (t.as_str(), v.as_str()),
            _ => return Err(DiagnosticsError::ParamsNotSet),
        };

        let weighted = artifact.weighted_features()?;

        let df = artifact.df();
        if df.time_col() != time_col {
            return Err(DiagnosticsError::UnknownColumn(time_col.to_string()));
        }
        if df.value_col() != value_col {
            return Err(DiagnosticsError::UnknownColumn(value_col.to_string()));
        }

        let components = self.decomposer.decompose(df, &weighted)?;
        let components = self.components.insert(components);
        self.renderer.render(components, names, title)
    }

    /// Decompose `target` into the components of a weighted feature matrix.
    pub fn decompose(
        &self,
        target: &TimeSeries,
        weighted: &FeatureMatrix,
    ) -> Result<ComponentsTable> {
        self.decomposer.decompose(target, weighted)
    }

    /// Average a seasonal component over its cycle.
    pub fn group_seasonality(
        &self,
        table: &ComponentsTable,
        key: SeasonalityKey,
    ) -> Result<SeasonalProfile> {
        let values = table
            .column(key.name())
            .ok_or_else(|| DiagnosticsError::UnknownColumn(key.name().to_string()))?;
        regroup_seasonality(table.timestamps(), values, key)
    }

    /// Plot an already computed components table.
    pub fn plot_table(
        &self,
        table: &ComponentsTable,
        names: Option<&[&str]>,
        title: Option<&str>,
    ) -> Result<Figure> {
        self.renderer.render(table, names, title)
    }
}
