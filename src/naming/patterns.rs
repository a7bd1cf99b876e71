//! Column-name patterns that identify feature categories.
//!
//! Feature columns arrive with names produced by the feature-generation step.
//! Those names are the only place category information lives, so the
//! patterns here are the boundary contract between the two steps.

use super::seasonality::SeasonalityKey;
use crate::core::INTERCEPT_COL;
use crate::error::Result;
use regex::Regex;
use std::collections::BTreeMap;

/// Changepoint basis columns, including the short `ct`/`cp` forms.
pub const DEFAULT_TREND_PATTERN: &str = r"changepoint\d|ct\d|ct_|cp\d";
/// Fourier basis columns.
pub const DEFAULT_SEASONALITY_PATTERN: &str = r"sin\d|cos\d";
/// Lagged target and lagged regressor columns.
pub const DEFAULT_LAG_PATTERN: &str = r"_lag\d|_avglag_\d";
/// Event / holiday indicator columns.
pub const DEFAULT_EVENT_PATTERN: &str = r"C\(Q\('events_";
/// Changepoint columns that encode their activation date.
pub const DEFAULT_CHANGEPOINT_DATE_PATTERN: &str =
    r"^(?:changepoint|cp)\d+_(\d{4})_(\d{2})_(\d{2})_(\d{2})$";

/// Separator used by the design-matrix formula for interaction terms.
pub const INTERACTION_SEPARATOR: char = ':';

/// Return the names matching `include` and not matching `exclude`.
pub fn pattern_columns<'a, S: AsRef<str>>(
    names: &'a [S],
    include: &Regex,
    exclude: Option<&Regex>,
) -> Vec<&'a str> {
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| include.is_match(name))
        .filter(|name| exclude.map_or(true, |re| !re.is_match(name)))
        .collect()
}

/// Compiled naming convention for feature columns.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    trend: Regex,
    seasonality: Regex,
    lag: Regex,
    event: Regex,
    /// `seasonality|lag`, evaluated against trend candidates.
    trend_exclusion: Regex,
    changepoint_date: Regex,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::build(
            DEFAULT_TREND_PATTERN,
            DEFAULT_SEASONALITY_PATTERN,
            DEFAULT_LAG_PATTERN,
            DEFAULT_EVENT_PATTERN,
            DEFAULT_CHANGEPOINT_DATE_PATTERN,
        )
        .expect("default naming patterns are valid regexes")
    }
}

impl NamingConvention {
    /// Create the default naming convention.
    pub fn new() -> Self {
        Self::default()
    }

    fn build(
        trend: &str,
        seasonality: &str,
        lag: &str,
        event: &str,
        changepoint_date: &str,
    ) -> Result<Self> {
        Ok(Self {
            trend: Regex::new(trend)?,
            seasonality: Regex::new(seasonality)?,
            lag: Regex::new(lag)?,
            event: Regex::new(event)?,
            trend_exclusion: Regex::new(&format!("{seasonality}|{lag}"))?,
            changepoint_date: Regex::new(changepoint_date)?,
        })
    }

    fn rebuild(
        &self,
        trend: Option<&str>,
        seasonality: Option<&str>,
        lag: Option<&str>,
        event: Option<&str>,
        changepoint_date: Option<&str>,
    ) -> Result<Self> {
        Self::build(
            trend.unwrap_or(self.trend.as_str()),
            seasonality.unwrap_or(self.seasonality.as_str()),
            lag.unwrap_or(self.lag.as_str()),
            event.unwrap_or(self.event.as_str()),
            changepoint_date.unwrap_or(self.changepoint_date.as_str()),
        )
    }

    /// Replace the trend pattern.
    pub fn with_trend_pattern(self, pattern: &str) -> Result<Self> {
        self.rebuild(Some(pattern), None, None, None, None)
    }

    /// Replace the seasonality pattern.
    pub fn with_seasonality_pattern(self, pattern: &str) -> Result<Self> {
        self.rebuild(None, Some(pattern), None, None, None)
    }

    /// Replace the lag pattern.
    pub fn with_lag_pattern(self, pattern: &str) -> Result<Self> {
        self.rebuild(None, None, Some(pattern), None, None)
    }

    /// Replace the event pattern.
    pub fn with_event_pattern(self, pattern: &str) -> Result<Self> {
        self.rebuild(None, None, None, Some(pattern), None)
    }

    /// Replace the changepoint date pattern.
    ///
    /// The pattern must capture year, month, day and hour in that order.
    pub fn with_changepoint_date_pattern(self, pattern: &str) -> Result<Self> {
        self.rebuild(None, None, None, None, Some(pattern))
    }

    pub fn trend_pattern(&self) -> &Regex {
        &self.trend
    }

    pub fn seasonality_pattern(&self) -> &Regex {
        &self.seasonality
    }

    pub fn lag_pattern(&self) -> &Regex {
        &self.lag
    }

    pub fn event_pattern(&self) -> &Regex {
        &self.event
    }

    pub fn changepoint_date_pattern(&self) -> &Regex {
        &self.changepoint_date
    }

    /// Trend columns. Names that also look like seasonality or lag features
    /// (e.g. trend-seasonality interactions) are not trend.
    pub fn trend_columns<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        pattern_columns(names, &self.trend, Some(&self.trend_exclusion))
    }

    pub fn lag_columns<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        pattern_columns(names, &self.lag, None)
    }

    pub fn seasonality_columns<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        pattern_columns(names, &self.seasonality, None)
    }

    pub fn event_columns<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        pattern_columns(names, &self.event, None)
    }

    /// Split feature columns into component buckets.
    ///
    /// Lag columns containing `value_col` are autoregression, the rest are
    /// lagged regressors. Seasonality columns are assigned to every key whose
    /// label they contain.
    pub fn classify<'a, S: AsRef<str>>(
        &self,
        names: &'a [S],
        value_col: &str,
    ) -> ColumnClassification<'a> {
        let trend = self.trend_columns(names);

        let (autoregression, lagged_regressor): (Vec<&str>, Vec<&str>) = self
            .lag_columns(names)
            .into_iter()
            .partition(|name| name.contains(value_col));

        let seasonal = self.seasonality_columns(names);
        let seasonality = SeasonalityKey::ALL
            .iter()
            .map(|key| {
                let cols: Vec<&str> = seasonal
                    .iter()
                    .copied()
                    .filter(|name| name.contains(key.pattern()))
                    .collect();
                (*key, cols)
            })
            .filter(|(_, cols)| !cols.is_empty())
            .collect();

        let events = self.event_columns(names);

        ColumnClassification {
            trend,
            autoregression,
            lagged_regressor,
            seasonality,
            events,
            all: names.iter().map(|name| name.as_ref()).collect(),
        }
    }

    /// Group predictors into descriptive categories for model summaries.
    ///
    /// A predictor can belong to several categories, e.g. an interaction
    /// between a changepoint and a Fourier term.
    pub fn predictor_categories<S: AsRef<str>>(
        &self,
        names: &[S],
        value_col: &str,
    ) -> BTreeMap<String, Vec<String>> {
        let classification = self.classify(names, value_col);
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut insert = |category: &str, cols: Vec<&str>| {
            categories.insert(
                category.to_string(),
                cols.into_iter().map(str::to_string).collect(),
            );
        };

        let all: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        insert(
            "intercept",
            all.iter()
                .copied()
                .filter(|name| *name == INTERCEPT_COL)
                .collect(),
        );
        insert("trend_features", classification.trend.clone());
        insert("seasonality_features", self.seasonality_columns(names));
        insert("event_features", classification.events.clone());
        insert("lag_features", self.lag_columns(names));
        insert(
            "interaction_features",
            all.iter()
                .copied()
                .filter(|name| name.contains(INTERACTION_SEPARATOR))
                .collect(),
        );
        insert("regressor_features", classification.unclassified());

        categories
    }
}

/// Result of bucketing feature columns by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnClassification<'a> {
    pub trend: Vec<&'a str>,
    pub autoregression: Vec<&'a str>,
    pub lagged_regressor: Vec<&'a str>,
    /// Only keys with at least one matching column.
    pub seasonality: Vec<(SeasonalityKey, Vec<&'a str>)>,
    pub events: Vec<&'a str>,
    all: Vec<&'a str>,
}

impl<'a> ColumnClassification<'a> {
    fn buckets(&self) -> impl Iterator<Item = &Vec<&'a str>> {
        [
            &self.trend,
            &self.autoregression,
            &self.lagged_regressor,
            &self.events,
        ]
        .into_iter()
        .chain(self.seasonality.iter().map(|(_, cols)| cols))
    }

    /// Columns that fall into no bucket, such as the intercept or plain
    /// regressors. Their contribution only shows up in the residual.
    pub fn unclassified(&self) -> Vec<&'a str> {
        self.all
            .iter()
            .copied()
            .filter(|name| !self.buckets().any(|cols| cols.contains(name)))
            .collect()
    }

    /// Columns assigned to more than one bucket.
    ///
    /// The naming convention is expected to keep categories disjoint; a
    /// non-empty result means components would double count.
    pub fn overlapping(&self) -> Vec<&'a str> {
        self.all
            .iter()
            .copied()
            .filter(|name| self.buckets().filter(|cols| cols.contains(name)).count() > 1)
            .collect()
    }
}
