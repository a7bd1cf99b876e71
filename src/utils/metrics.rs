//! In-sample fit accuracy for model summaries.

use crate::error::{DiagnosticsError, Result};

/// Accuracy of the fitted values against the observed target.
#[derive(Debug, Clone, PartialEq)]
pub struct FitAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (None if zeros in actual)
    pub mape: Option<f64>,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
}

/// Calculate fit accuracy between observed and fitted values.
///
/// # Arguments
/// * `actual` - Observed target values
/// * `fitted` - In-sample fitted values
pub fn calculate_fit_accuracy(actual: &[f64], fitted: &[f64]) -> Result<FitAccuracy> {
    if actual.is_empty() || fitted.is_empty() {
        return Err(DiagnosticsError::EmptyInput);
    }

    if actual.len() != fitted.len() {
        return Err(DiagnosticsError::RowMismatch {
            expected: actual.len(),
            got: fitted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let ss_res: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let rmse = (ss_res / n).sqrt();

    // MAPE (only if no zeros in actual)
    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(fitted.iter())
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Some(100.0 * sum / n)
    };

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(FitAccuracy {
        mae,
        rmse,
        mape,
        r_squared,
    })
}
