//! Trend changepoint dates encoded in feature column names.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use super::patterns::INTERACTION_SEPARATOR;

/// Parse changepoint activation times out of trend column names.
///
/// `pattern` must capture year, month, day and hour. Interaction columns and
/// names that do not match are skipped. The result is sorted and deduplicated.
pub fn changepoint_dates_from_cols<S: AsRef<str>>(
    trend_cols: &[S],
    pattern: &Regex,
) -> Vec<DateTime<Utc>> {
    let mut dates: Vec<DateTime<Utc>> = trend_cols
        .iter()
        .map(|col| col.as_ref())
        .filter(|col| !col.contains(INTERACTION_SEPARATOR))
        .filter_map(|col| parse_changepoint_date(col, pattern))
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

fn parse_changepoint_date(col: &str, pattern: &Regex) -> Option<DateTime<Utc>> {
    let caps = pattern.captures(col)?;
    let field = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let datetime = date.and_hms_opt(field(4)?, 0, 0)?;
    Some(datetime.and_utc())
}

/// 0/1 indicator aligned with `timestamps`, set where a changepoint starts.
///
/// `changepoints` must be sorted.
pub fn changepoint_indicator(
    timestamps: &[DateTime<Utc>],
    changepoints: &[DateTime<Utc>],
) -> Vec<bool> {
    timestamps
        .iter()
        .map(|t| changepoints.binary_search(t).is_ok())
        .collect()
}
