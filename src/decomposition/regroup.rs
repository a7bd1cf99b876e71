//! Fold a seasonal component onto its natural cycle.

use crate::error::{DiagnosticsError, Result};
use crate::naming::SeasonalityKey;
use crate::utils::nan_mean;
use chrono::{DateTime, Utc};

/// A seasonal component averaged per value of its grouping time feature.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalProfile {
    /// Label of the grouping column, e.g. "Hour of day".
    pub xlabel: String,
    /// Label of the averaged values, e.g. "daily".
    pub ylabel: String,
    /// Distinct grouping-feature values, ascending.
    pub x: Vec<f64>,
    /// Mean component value for each entry of `x`.
    pub y: Vec<f64>,
}

impl SeasonalProfile {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Group a seasonal component by its time feature and average each group.
///
/// Missing values are ignored in the mean. Only feature values observed in
/// the input produce a row, so the output is as long as the number of
/// distinct feature values, not the feature's full domain.
pub fn regroup_seasonality(
    timestamps: &[DateTime<Utc>],
    values: &[f64],
    key: SeasonalityKey,
) -> Result<SeasonalProfile> {
    if timestamps.len() != values.len() {
        return Err(DiagnosticsError::RowMismatch {
            expected: timestamps.len(),
            got: values.len(),
        });
    }

    let meta = key.metadata();
    let mut keyed: Vec<(f64, f64)> = timestamps
        .iter()
        .map(|t| meta.groupby_time_feature.extract(t))
        .zip(values.iter().copied())
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut x = Vec::new();
    let mut y = Vec::new();
    for group in keyed.chunk_by(|a, b| a.0 == b.0) {
        let group_values: Vec<f64> = group.iter().map(|(_, v)| *v).collect();
        x.push(group[0].0);
        y.push(nan_mean(&group_values));
    }

    Ok(SeasonalProfile {
        xlabel: meta.xlabel.to_string(),
        ylabel: meta.ylabel.to_string(),
        x,
        y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn hourly(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::hours(i as i64)).collect()
    }

    #[test]
    fn daily_seasonality_is_averaged_by_hour() {
        let timestamps = hourly(48);
        let values: Vec<f64> = (0..48).map(|i| (i % 24) as f64 + (i / 24) as f64).collect();

        let profile = regroup_seasonality(&timestamps, &values, SeasonalityKey::Daily).unwrap();

        assert_eq!(profile.xlabel, "Hour of day");
        assert_eq!(profile.ylabel, "daily");
        assert_eq!(profile.len(), 24);
        assert_relative_eq!(profile.x[5], 5.0);
        // hour 5: values 5 and 6
        assert_relative_eq!(profile.y[5], 5.5);
    }

    #[test]
    fn only_observed_feature_values_produce_rows() {
        let timestamps = hourly(3);
        let profile =
            regroup_seasonality(&timestamps, &[1.0, 2.0, 3.0], SeasonalityKey::Daily).unwrap();
        assert_eq!(profile.x, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn missing_values_are_ignored() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        // Three Mondays and one Tuesday.
        let timestamps = vec![
            base,
            base + Duration::days(7),
            base + Duration::days(14),
            base + Duration::days(1),
        ];
        let values = [1.0, f64::NAN, 3.0, f64::NAN];

        let profile = regroup_seasonality(&timestamps, &values, SeasonalityKey::Weekly).unwrap();

        assert_eq!(profile.xlabel, "Day of week");
        assert_eq!(profile.x, vec![0.0, 1.0]);
        assert_relative_eq!(profile.y[0], 2.0);
        assert!(profile.y[1].is_nan());
    }

    #[test]
    fn input_order_does_not_matter() {
        let timestamps = hourly(30);
        let values: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin()).collect();

        let forward = regroup_seasonality(&timestamps, &values, SeasonalityKey::Daily).unwrap();

        let mut rev_ts = timestamps.clone();
        let mut rev_values = values.clone();
        rev_ts.reverse();
        rev_values.reverse();
        let backward = regroup_seasonality(&rev_ts, &rev_values, SeasonalityKey::Daily).unwrap();

        assert_eq!(forward.x, backward.x);
        for (a, b) in forward.y.iter().zip(&backward.y) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let result = regroup_seasonality(&hourly(2), &[1.0], SeasonalityKey::Daily);
        assert!(matches!(result, Err(DiagnosticsError::RowMismatch { .. })));
    }

    #[test]
    fn monthly_groups_by_calendar_day() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..60).map(|i| base + Duration::days(i)).collect();
        let values = vec![1.0; 60];

        let profile = regroup_seasonality(&timestamps, &values, SeasonalityKey::Monthly).unwrap();

        assert_eq!(profile.xlabel, "Time of month");
        assert_eq!(profile.len(), 31);
        assert_relative_eq!(profile.x[0], 1.0);
        assert_relative_eq!(profile.x[30], 31.0);
    }
}
