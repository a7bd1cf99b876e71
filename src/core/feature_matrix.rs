//! Named design matrix produced by the feature-generation step.

use crate::error::{DiagnosticsError, Result};
use std::collections::HashSet;

/// Name of the pseudo-column carrying the model intercept.
pub const INTERCEPT_COL: &str = "Intercept";

/// A design matrix with named columns.
///
/// Values are stored column-major: `columns[feature][observation]`.
/// Column names follow the feature-generation naming convention and are
/// what the decomposer classifies on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl FeatureMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matrix from `(name, values)` pairs, preserving their order.
    pub fn from_columns<S, I>(columns: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let mut matrix = Self::new();
        for (name, values) in columns {
            matrix.push_column(name, values)?;
        }
        Ok(matrix)
    }

    /// Append a column. All columns must share the row count of the first.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(DiagnosticsError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.n_rows = values.len();
        } else if values.len() != self.n_rows {
            return Err(DiagnosticsError::RowMismatch {
                expected: self.n_rows,
                got: values.len(),
            });
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of features.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.n_rows == 0
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.columns[i].as_slice())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Row-wise sum of the named columns.
    ///
    /// Unknown names are an error so that a classification bug surfaces
    /// instead of silently dropping a contribution.
    pub fn row_sum<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<f64>> {
        let mut total = vec![0.0; self.n_rows];
        let mut seen = HashSet::new();
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                continue;
            }
            let values = self
                .column(name)
                .ok_or_else(|| DiagnosticsError::UnknownColumn(name.to_string()))?;
            for (acc, v) in total.iter_mut().zip(values) {
                *acc += v;
            }
        }
        Ok(total)
    }

    /// Row-wise sum of every column.
    pub fn total(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.n_rows];
        for column in &self.columns {
            for (acc, v) in total.iter_mut().zip(column) {
                *acc += v;
            }
        }
        total
    }

    /// Multiply each column by its coefficient and fold in the intercept.
    ///
    /// A non-zero intercept is added to an existing `Intercept` column, or
    /// appended as a new constant `Intercept` column.
    pub fn weighted(&self, coefficients: &[f64], intercept: f64) -> Result<Self> {
        if coefficients.len() != self.n_cols() {
            return Err(DiagnosticsError::InvalidParameter(format!(
                "expected {} coefficients, got {}",
                self.n_cols(),
                coefficients.len()
            )));
        }

        let mut weighted = Self {
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .zip(coefficients)
                .map(|(column, coef)| column.iter().map(|x| coef * x).collect())
                .collect(),
            n_rows: self.n_rows,
        };

        if intercept != 0.0 {
            match weighted.position(INTERCEPT_COL) {
                Some(i) => weighted.columns[i].iter_mut().for_each(|v| *v += intercept),
                None => weighted.push_column(INTERCEPT_COL, vec![intercept; self.n_rows])?,
            }
        }

        Ok(weighted)
    }

    /// Multiply the matrix by a coefficient vector: `X @ beta + intercept`.
    pub fn dot(&self, coefficients: &[f64], intercept: f64) -> Result<Vec<f64>> {
        let weighted = self.weighted(coefficients, intercept)?;
        Ok(weighted.total())
    }
}
