//! Mock payload generators, one per dashboard endpoint.
//!
//! Every generator is a pure function of a [`RandomSource`](crate::rng::RandomSource)
//! (when it randomizes at all) and, for date-relative series, the reference
//! day. Nothing here touches the clock or shared state directly.

pub mod genome;
pub mod geography;
pub mod lineages;
pub mod overview;
pub mod timeseries;

pub use genome::{genes, mutations, GenomeGenes, GenomeMutations, Mutation};
pub use geography::{points, FeatureCollection};
pub use lineages::{frequencies, LineageFrequencies, LineageRow};
pub use overview::{overview, Kpi, Overview, TrendPoint};
pub use timeseries::{timeseries, Metric, SeriesPoint, TimeSeries};

use time::{Date, Duration};

/// Date `days` before `today`, clamped at the calendar minimum.
pub(crate) fn days_before(today: Date, days: usize) -> Date {
    today.saturating_sub(Duration::days(days as i64))
}

/// Serializes a [`Date`] as `YYYY-MM-DD`.
pub(crate) mod iso_date {
    use serde::{ser::Error, Serializer};
    use time::macros::format_description;
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }
}
