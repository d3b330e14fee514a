//! 40-day daily series for one selectable metric.

use serde::Serialize;
use strum::{Display, EnumString};
use time::Date;

use super::{days_before, iso_date};
use crate::rng::RandomSource;

/// Number of days in the series, ending today.
pub const SERIES_DAYS: usize = 40;

/// Metric selectable through `?metric=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Default)]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Daily cases.
    #[default]
    Cases,
    /// Test positivity (%).
    Positivity,
    /// Tests performed.
    Tests,
}

impl Metric {
    /// Parse a query value, falling back to [`Metric::Cases`].
    ///
    /// Matching is exact (`Cases` is not `cases`). Returns the metric and
    /// whether the fallback was taken for a non-empty input.
    pub fn resolve(input: Option<&str>) -> (Self, bool) {
        match input.filter(|s| !s.is_empty()) {
            None => (Self::default(), false),
            Some(raw) => match raw.parse() {
                Ok(metric) => (metric, false),
                Err(_) => (Self::default(), true),
            },
        }
    }

    /// Value for day index `i` (0 = oldest) given the metric's noise draw.
    fn value(self, i: usize, rng: &mut impl RandomSource) -> f64 {
        let i = i as f64;
        match self {
            Self::Cases => 500.0 + 15.0 * i + f64::from(rng.next_below(100)),
            Self::Positivity => 3.0 + 0.1 * i + f64::from(rng.next_below(20)) / 10.0,
            Self::Tests => 10_000.0 + 50.0 * i + f64::from(rng.next_below(400)),
        }
    }
}

/// One day of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Calendar day.
    #[serde(serialize_with = "iso_date::serialize")]
    pub date: Date,
    /// Metric value.
    pub value: f64,
}

/// `/api/timeseries` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Daily points, oldest first.
    pub series: Vec<SeriesPoint>,
}

/// Build the `SERIES_DAYS`-day series of `metric` ending on `today`.
pub fn timeseries(rng: &mut impl RandomSource, metric: Metric, today: Date) -> TimeSeries {
    let series = (0..SERIES_DAYS)
        .map(|i| SeriesPoint {
            date: days_before(today, SERIES_DAYS - 1 - i),
            value: metric.value(i, rng),
        })
        .collect();

    TimeSeries { series }
}
