//! Seasonality keys and their plotting metadata.
//!
//! The set of seasonalities is closed: each key maps to a fixed grouping
//! time feature and pair of axis labels. The y label doubles as the
//! substring that identifies the seasonality's feature columns.

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

/// Time feature used to fold a seasonal component onto its natural cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFeature {
    /// Continuous hour of day in `[0, 24)`.
    TimeOfDay,
    /// Continuous day of week in `[0, 7)`, Monday = 0.
    TimeOfWeek,
    /// Day of month, `1..=31`.
    DayOfMonth,
    /// Fraction of the calendar quarter elapsed, `[0, 1)`.
    TimeOfQuarter,
    /// Fraction of the calendar year elapsed, `[0, 1)`.
    TimeOfYear,
}

impl TimeFeature {
    /// Short code used by the feature-generation step.
    pub fn code(&self) -> &'static str {
        match self {
            TimeFeature::TimeOfDay => "tod",
            TimeFeature::TimeOfWeek => "tow",
            TimeFeature::DayOfMonth => "dom",
            TimeFeature::TimeOfQuarter => "toq",
            TimeFeature::TimeOfYear => "toy",
        }
    }

    /// Derive the feature value for a timestamp.
    pub fn extract(&self, t: &DateTime<Utc>) -> f64 {
        let tod = time_of_day(t);
        match self {
            TimeFeature::TimeOfDay => tod,
            TimeFeature::TimeOfWeek => t.weekday().num_days_from_monday() as f64 + tod / 24.0,
            TimeFeature::DayOfMonth => t.day() as f64,
            TimeFeature::TimeOfQuarter => {
                let year = t.year();
                let first_month = (t.month0() / 3) * 3 + 1;
                let quarter_start: u32 = (1..first_month).map(|m| days_in_month(year, m)).sum();
                let quarter_len: u32 = (first_month..first_month + 3)
                    .map(|m| days_in_month(year, m))
                    .sum();
                let day_of_quarter = t.ordinal0() - quarter_start;
                (day_of_quarter as f64 + tod / 24.0) / quarter_len as f64
            }
            TimeFeature::TimeOfYear => {
                let year_len = if is_leap_year(t.year()) { 366.0 } else { 365.0 };
                (t.ordinal0() as f64 + tod / 24.0) / year_len
            }
        }
    }
}

fn time_of_day(t: &DateTime<Utc>) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// A seasonality the decomposer knows how to extract and plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeasonalityKey {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// Display metadata for one seasonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalityMetadata {
    pub key: SeasonalityKey,
    /// Time feature used to regroup the component before plotting.
    pub groupby_time_feature: TimeFeature,
    /// X-axis label of the regrouped panel.
    pub xlabel: &'static str,
    /// Y-axis label of the regrouped panel; also the column-name substring.
    pub ylabel: &'static str,
}

const SEASONALITY_REGISTRY: [SeasonalityMetadata; 5] = [
    SeasonalityMetadata {
        key: SeasonalityKey::Daily,
        groupby_time_feature: TimeFeature::TimeOfDay,
        xlabel: "Hour of day",
        ylabel: "daily",
    },
    SeasonalityMetadata {
        key: SeasonalityKey::Weekly,
        groupby_time_feature: TimeFeature::TimeOfWeek,
        xlabel: "Day of week",
        ylabel: "weekly",
    },
    SeasonalityMetadata {
        key: SeasonalityKey::Monthly,
        groupby_time_feature: TimeFeature::DayOfMonth,
        xlabel: "Time of month",
        ylabel: "monthly",
    },
    SeasonalityMetadata {
        key: SeasonalityKey::Quarterly,
        groupby_time_feature: TimeFeature::TimeOfQuarter,
        xlabel: "Time of quarter",
        ylabel: "quarterly",
    },
    SeasonalityMetadata {
        key: SeasonalityKey::Yearly,
        groupby_time_feature: TimeFeature::TimeOfYear,
        xlabel: "Time of year",
        ylabel: "yearly",
    },
];

impl SeasonalityKey {
    /// All keys, in the order components are emitted.
    pub const ALL: [SeasonalityKey; 5] = [
        SeasonalityKey::Daily,
        SeasonalityKey::Weekly,
        SeasonalityKey::Monthly,
        SeasonalityKey::Quarterly,
        SeasonalityKey::Yearly,
    ];

    /// Component column name, e.g. `DAILY_SEASONALITY`.
    pub fn name(&self) -> &'static str {
        match self {
            SeasonalityKey::Daily => "DAILY_SEASONALITY",
            SeasonalityKey::Weekly => "WEEKLY_SEASONALITY",
            SeasonalityKey::Monthly => "MONTHLY_SEASONALITY",
            SeasonalityKey::Quarterly => "QUARTERLY_SEASONALITY",
            SeasonalityKey::Yearly => "YEARLY_SEASONALITY",
        }
    }

    pub fn metadata(&self) -> &'static SeasonalityMetadata {
        &SEASONALITY_REGISTRY[*self as usize]
    }

    /// Substring identifying this seasonality's feature columns.
    pub fn pattern(&self) -> &'static str {
        self.metadata().ylabel
    }
}

impl fmt::Display for SeasonalityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeasonalityKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeasonalityKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or(())
    }
}
