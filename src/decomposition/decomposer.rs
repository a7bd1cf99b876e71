//! Additive component decomposition of a fitted linear model.
//!
//! The weighted feature matrix (each column multiplied by its coefficient,
//! intercept as its own column) sums row-wise to the model's fitted values.
//! Columns are bucketed by name into:
//! - Trend: changepoint basis columns (not seasonality or lag interactions)
//! - Autoregression / lagged regressors: lag columns, split on the target name
//! - One column per seasonality present in the model
//! - Events: holiday and event indicators
//!
//! The residual is always the target minus the sum of *all* weighted columns,
//! so unclassified columns never go missing from the reconciliation.

use crate::core::{
    ColumnKind, Component, ComponentsTable, FeatureMatrix, TimeSeries, RESIDUAL_COL,
};
use crate::error::{DiagnosticsError, Result};
use crate::naming::{changepoint_dates_from_cols, changepoint_indicator, NamingConvention};

/// Splits a weighted design matrix into named additive components.
#[derive(Debug, Clone, Default)]
pub struct ComponentDecomposer {
    naming: NamingConvention,
}

impl ComponentDecomposer {
    /// Create a decomposer with the default naming convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom naming convention.
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    /// Decompose `target` into the components of `weighted`.
    ///
    /// # Arguments
    /// * `target` - Observed series the model was fitted on
    /// * `weighted` - Feature matrix multiplied by the fitted coefficients
    ///
    /// # Returns
    /// A table with time and value columns, each component present in the
    /// model, the residual, and a trailing changepoint indicator when trend
    /// column names encode changepoint dates.
    pub fn decompose(&self, target: &TimeSeries, weighted: &FeatureMatrix) -> Result<ComponentsTable> {
        if weighted.is_empty() {
            return Err(DiagnosticsError::EmptyInput);
        }
        if target.len() != weighted.n_rows() {
            return Err(DiagnosticsError::RowMismatch {
                expected: target.len(),
                got: weighted.n_rows(),
            });
        }

        let mut table = ComponentsTable::new(
            target.time_col(),
            target.value_col(),
            target.timestamps().to_vec(),
            target.values().to_vec(),
        )?;

        let classification = self.naming.classify(weighted.names(), target.value_col());
        tracing::debug!(
            trend = classification.trend.len(),
            autoregression = classification.autoregression.len(),
            lagged_regressor = classification.lagged_regressor.len(),
            seasonalities = classification.seasonality.len(),
            events = classification.events.len(),
            "classified feature columns"
        );

        let overlapping = classification.overlapping();
        if !overlapping.is_empty() {
            tracing::warn!(
                columns = ?overlapping,
                "feature columns match more than one component pattern; components will double count"
            );
        }

        let mut buckets = vec![
            (Component::Trend, &classification.trend),
            (Component::Autoregression, &classification.autoregression),
            (Component::LaggedRegressor, &classification.lagged_regressor),
        ];
        buckets.extend(
            classification
                .seasonality
                .iter()
                .map(|(key, cols)| (Component::Seasonality(*key), cols)),
        );
        buckets.push((Component::Events, &classification.events));

        for (component, cols) in buckets {
            if cols.is_empty() {
                continue;
            }
            table.push_component(component, weighted.row_sum(cols)?)?;
        }

        let residual = target
            .values()
            .iter()
            .zip(weighted.total())
            .map(|(y, fitted)| y - fitted)
            .collect();
        table.push_column(RESIDUAL_COL, ColumnKind::Residual, residual)?;

        if !classification.trend.is_empty() {
            let dates = changepoint_dates_from_cols(
                &classification.trend,
                self.naming.changepoint_date_pattern(),
            );
            if !dates.is_empty() {
                tracing::debug!(count = dates.len(), "trend changepoints found in column names");
                table.set_trend_changepoints(changepoint_indicator(target.timestamps(), &dates))?;
            }
        }

        Ok(table)
    }
}
