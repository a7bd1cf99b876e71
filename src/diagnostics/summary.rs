//! Descriptive model summary keyed by predictor.

use super::model::{FitAlgorithm, FittedModel, ModelArtifact};
use crate::error::Result;
use crate::naming::NamingConvention;
use crate::utils::{calculate_fit_accuracy, FitAccuracy};
use std::collections::BTreeMap;
use std::fmt;

/// Predictor category name -> predictors in that category.
pub type PredictorCategories = BTreeMap<String, Vec<String>>;

/// Default longest predictor name shown before switching to indices.
pub const DEFAULT_MAX_COLWIDTH: usize = 20;

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorSummary {
    pub index: usize,
    /// Original design-matrix column name.
    pub name: String,
    /// Name shown in the table: the original name or `x{index}`.
    pub display_name: String,
    /// Fitted coefficient, for linear models.
    pub coefficient: Option<f64>,
    /// Feature importance, for tree ensembles.
    pub importance: Option<f64>,
    /// Categories this predictor belongs to, sorted.
    pub categories: Vec<String>,
}

/// Summary of a fitted model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub fit_algorithm: FitAlgorithm,
    pub n_obs: usize,
    pub n_features: usize,
    pub intercept: Option<f64>,
    pub predictors: Vec<PredictorSummary>,
    /// In-sample accuracy, for linear models.
    pub accuracy: Option<FitAccuracy>,
    /// True when predictor names were replaced by indices.
    pub names_suppressed: bool,
}

impl ModelSummary {
    /// Build the summary for `artifact`.
    ///
    /// # Arguments
    /// * `artifact` - The fitted model and its design matrix
    /// * `pred_category` - Predictor categories; derived from column names if `None`
    /// * `naming` - Naming convention used to derive categories
    /// * `max_colwidth` - If any predictor name is longer, names are shown as indices
    pub fn new(
        artifact: &ModelArtifact,
        pred_category: Option<&PredictorCategories>,
        naming: &NamingConvention,
        max_colwidth: usize,
    ) -> Result<Self> {
        let x_mat = artifact.x_mat();
        let names = x_mat.names();

        let derived;
        let categories = match pred_category {
            Some(categories) => categories,
            None => {
                derived = naming.predictor_categories(names, artifact.df().value_col());
                &derived
            }
        };

        let names_suppressed = names.iter().any(|n| n.chars().count() > max_colwidth);

        let (coefficients, importances, intercept) = match artifact.model() {
            FittedModel::Linear {
                coefficients,
                intercept,
            } => (Some(coefficients), None, Some(*intercept)),
            FittedModel::TreeEnsemble {
                feature_importances,
            } => (None, Some(feature_importances), None),
        };

        let predictors = names
            .iter()
            .enumerate()
            .map(|(index, name)| PredictorSummary {
                index,
                name: name.clone(),
                display_name: if names_suppressed {
                    format!("x{index}")
                } else {
                    name.clone()
                },
                coefficient: coefficients.map(|c| c[index]),
                importance: importances.map(|imp| imp[index]),
                categories: categories
                    .iter()
                    .filter(|(_, members)| members.contains(name))
                    .map(|(category, _)| category.clone())
                    .collect(),
            })
            .collect();

        let accuracy = match artifact.fitted_values() {
            Some(fitted) => Some(calculate_fit_accuracy(artifact.df().values(), &fitted)?),
            None => None,
        };

        Ok(Self {
            fit_algorithm: artifact.fit_algorithm(),
            n_obs: x_mat.n_rows(),
            n_features: x_mat.n_cols(),
            intercept,
            predictors,
            accuracy,
            names_suppressed,
        })
    }

    /// Number of predictors with a non-zero coefficient.
    pub fn nonzero_coefficients(&self) -> usize {
        self.predictors
            .iter()
            .filter(|p| p.coefficient.is_some_and(|c| c != 0.0))
            .count()
    }

    /// Predictors belonging to `category`.
    pub fn predictors_in(&self, category: &str) -> Vec<&PredictorSummary> {
        self.predictors
            .iter()
            .filter(|p| p.categories.iter().any(|c| c == category))
            .collect()
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit algorithm: {}", self.fit_algorithm)?;
        writeln!(
            f,
            "Observations: {}, features: {}, non-zero coefficients: {}",
            self.n_obs,
            self.n_features,
            self.nonzero_coefficients()
        )?;
        if let Some(intercept) = self.intercept {
            writeln!(f, "Intercept: {intercept:.4}")?;
        }
        if let Some(acc) = &self.accuracy {
            writeln!(
                f,
                "MAE: {:.4}, RMSE: {:.4}, R-squared: {:.4}",
                acc.mae, acc.rmse, acc.r_squared
            )?;
        }

        let width = self
            .predictors
            .iter()
            .map(|p| p.display_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Pred_col".len());
        let value_header = if self.intercept.is_some() {
            "Estimate"
        } else {
            "Importance"
        };
        writeln!(f)?;
        writeln!(f, "{:>5}  {:<width$}  {:>12}  Category", "Index", "Pred_col", value_header)?;
        for p in &self.predictors {
            let value = p.coefficient.or(p.importance).unwrap_or(f64::NAN);
            writeln!(
                f,
                "{:>5}  {:<width$}  {:>12.4}  {}",
                p.index,
                p.display_name,
                value,
                p.categories.join(", ")
            )?;
        }
        Ok(())
    }
}
