//! Fitted-model artifacts consumed by diagnostics.

use crate::core::{FeatureMatrix, TimeSeries};
use crate::error::{DiagnosticsError, Result};
use std::fmt;

/// Algorithm used to fit the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitAlgorithm {
    Linear,
    Ridge,
    Lasso,
    ElasticNet,
    Lars,
    LassoLars,
    SgdRegressor,
    QuantileRegression,
    RandomForest,
    GradientBoosting,
}

impl FitAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            FitAlgorithm::Linear => "linear",
            FitAlgorithm::Ridge => "ridge",
            FitAlgorithm::Lasso => "lasso",
            FitAlgorithm::ElasticNet => "elastic_net",
            FitAlgorithm::Lars => "lars",
            FitAlgorithm::LassoLars => "lasso_lars",
            FitAlgorithm::SgdRegressor => "sgd",
            FitAlgorithm::QuantileRegression => "quantile_regression",
            FitAlgorithm::RandomForest => "rf",
            FitAlgorithm::GradientBoosting => "gradient_boosting",
        }
    }

    /// Whether the algorithm yields an additive linear model.
    pub fn is_linear(&self) -> bool {
        !matches!(
            self,
            FitAlgorithm::RandomForest | FitAlgorithm::GradientBoosting
        )
    }
}

impl fmt::Display for FitAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The estimator produced by fitting.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedModel {
    /// Additive linear model: `intercept + X @ coefficients`.
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Tree ensemble; only per-feature importances are available.
    TreeEnsemble { feature_importances: Vec<f64> },
}

impl FittedModel {
    /// Coefficients and intercept, if the model is linear.
    pub fn coefficients(&self) -> Option<(&[f64], f64)> {
        match self {
            FittedModel::Linear {
                coefficients,
                intercept,
            } => Some((coefficients.as_slice(), *intercept)),
            FittedModel::TreeEnsemble { .. } => None,
        }
    }

    fn n_features(&self) -> usize {
        match self {
            FittedModel::Linear { coefficients, .. } => coefficients.len(),
            FittedModel::TreeEnsemble {
                feature_importances,
            } => feature_importances.len(),
        }
    }
}

/// Everything diagnostics need from a model fit.
///
/// `df` holds the observations used for fitting (rows with missing values
/// already dropped) and is row-aligned with `x_mat`.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    df: TimeSeries,
    x_mat: FeatureMatrix,
    fit_algorithm: FitAlgorithm,
    model: FittedModel,
}

impl ModelArtifact {
    pub fn new(
        df: TimeSeries,
        x_mat: FeatureMatrix,
        fit_algorithm: FitAlgorithm,
        model: FittedModel,
    ) -> Result<Self> {
        if df.len() != x_mat.n_rows() {
            return Err(DiagnosticsError::RowMismatch {
                expected: df.len(),
                got: x_mat.n_rows(),
            });
        }
        if model.n_features() != x_mat.n_cols() {
            return Err(DiagnosticsError::InvalidParameter(format!(
                "model has {} features but the design matrix has {} columns",
                model.n_features(),
                x_mat.n_cols()
            )));
        }
        Ok(Self {
            df,
            x_mat,
            fit_algorithm,
            model,
        })
    }

    pub fn df(&self) -> &TimeSeries {
        &self.df
    }

    pub fn x_mat(&self) -> &FeatureMatrix {
        &self.x_mat
    }

    pub fn fit_algorithm(&self) -> FitAlgorithm {
        self.fit_algorithm
    }

    pub fn model(&self) -> &FittedModel {
        &self.model
    }

    /// Design matrix multiplied by the coefficients, intercept as a column.
    pub fn weighted_features(&self) -> Result<FeatureMatrix> {
        let (coefficients, intercept) = self.model.coefficients().ok_or_else(|| {
            DiagnosticsError::UnsupportedModel(format!(
                "component plot has only been implemented for additive linear models, got {}",
                self.fit_algorithm
            ))
        })?;
        self.x_mat.weighted(coefficients, intercept)
    }

    /// In-sample fitted values, for linear models.
    pub fn fitted_values(&self) -> Option<Vec<f64>> {
        let (coefficients, intercept) = self.model.coefficients()?;
        self.x_mat.dot(coefficients, intercept).ok()
    }
}
