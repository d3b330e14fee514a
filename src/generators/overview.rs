//! Overview page: headline KPIs, a 20-day trend and the top-5 breakdowns.

use serde::Serialize;
use time::Date;

use super::{days_before, iso_date};
use crate::reference::{KpiFigure, KPIS, TOP_LINEAGES, TOP_REGIONS};
use crate::rng::RandomSource;

/// Number of days in the trend, ending today.
pub const TREND_DAYS: usize = 20;

/// Positivity of the day before the trend starts.
pub const POSITIVITY_START: f64 = 5.0;

/// Lowest positivity the walk may reach. There is no ceiling.
pub const POSITIVITY_FLOOR: f64 = 1.0;

/// Largest absolute day-to-day positivity step.
pub const POSITIVITY_STEP: f64 = 0.3;

/// Labeled dashboard figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    /// Display label.
    pub label: &'static str,
    /// Figure shown under the label.
    pub value: KpiFigure,
}

/// One day of the overview trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Calendar day.
    #[serde(serialize_with = "iso_date::serialize")]
    pub date: Date,
    /// Reported cases.
    pub cases: u32,
    /// Test positivity (%), never below [`POSITIVITY_FLOOR`].
    pub positivity: f64,
}

/// Lineage share in the top-5 table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageShare {
    /// Lineage name.
    pub name: &'static str,
    /// Share of sequenced samples (%).
    pub pct: u32,
}

/// Region total in the top-5 table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    /// Region name.
    pub region: &'static str,
    /// Case count.
    pub value: u32,
}

/// `/api/overview` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Headline figures.
    pub kpis: Vec<Kpi>,
    /// Daily trend, oldest first.
    pub trend: Vec<TrendPoint>,
    /// Top lineages by share.
    pub top_lineages: Vec<LineageShare>,
    /// Top regions by cases.
    pub top_regions: Vec<RegionTotal>,
}

/// Build the overview payload for the `TREND_DAYS` days ending on `today`.
///
/// Positivity is a random walk from [`POSITIVITY_START`] with steps in
/// `[-0.3, 0.3)`, floored at [`POSITIVITY_FLOOR`]. Cases ramp by 80 a day
/// from 2000 plus noise in `[0, 200)`.
pub fn overview(rng: &mut impl RandomSource, today: Date) -> Overview {
    let kpis = KPIS
        .iter()
        .map(|&(label, value)| Kpi { label, value })
        .collect();

    let mut positivity = POSITIVITY_START;
    let trend = (0..TREND_DAYS)
        .map(|i| {
            positivity = step_positivity(positivity, rng.next_f64());
            TrendPoint {
                date: days_before(today, TREND_DAYS - 1 - i),
                cases: 2000 + 80 * i as u32 + rng.next_below(200),
                positivity,
            }
        })
        .collect();

    let top_lineages = TOP_LINEAGES
        .iter()
        .map(|&(name, pct)| LineageShare { name, pct })
        .collect();

    let top_regions = TOP_REGIONS
        .iter()
        .map(|&(region, value)| RegionTotal { region, value })
        .collect();

    Overview {
        kpis,
        trend,
        top_lineages,
        top_regions,
    }
}

/// Advance the walk by one step; `unit` is a uniform draw in `[0, 1)`.
fn step_positivity(current: f64, unit: f64) -> f64 {
    let delta = unit * 2.0 * POSITIVITY_STEP - POSITIVITY_STEP;
    (current + delta).max(POSITIVITY_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::FixedSource;
    use crate::rng::SeededRng;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 07 - 15);

    #[test]
    fn trend_spans_twenty_days_ending_today() {
        let payload = overview(&mut SeededRng::default(), TODAY);

        assert_eq!(payload.trend.len(), TREND_DAYS);
        assert_eq!(payload.trend[0].date, date!(2025 - 06 - 26));
        assert_eq!(payload.trend[TREND_DAYS - 1].date, TODAY);
    }

    #[test]
    fn cases_follow_ramp_with_bounded_noise() {
        let payload = overview(&mut SeededRng::new(9), TODAY);

        for (i, point) in payload.trend.iter().enumerate() {
            let base = 2000 + 80 * i as u32;
            assert!((base..base + 200).contains(&point.cases), "day {i}: {}", point.cases);
        }
    }

    #[test]
    fn positivity_never_drops_below_floor() {
        // Always the most negative step: 5.0 falls to the floor after ~14 days.
        let payload = overview(&mut FixedSource(0.0), TODAY);

        assert!(payload.trend.iter().all(|p| p.positivity >= POSITIVITY_FLOOR));
        assert_eq!(payload.trend[TREND_DAYS - 1].positivity, POSITIVITY_FLOOR);
    }

    #[test]
    fn positivity_has_no_ceiling() {
        let payload = overview(&mut FixedSource(0.999_999), TODAY);

        let last = payload.trend[TREND_DAYS - 1].positivity;
        assert!(last > POSITIVITY_START + 5.0, "walk capped at {last}");
    }

    #[test]
    fn walk_steps_stay_within_bounds() {
        let payload = overview(&mut SeededRng::new(1234), TODAY);

        let mut previous = POSITIVITY_START;
        for point in &payload.trend {
            let step = point.positivity - previous;
            assert!(step < POSITIVITY_STEP + 1e-12);
            assert!(step >= -POSITIVITY_STEP - 1e-12);
            previous = point.positivity;
        }
    }

    #[test]
    fn static_sections_match_reference_tables() {
        let payload = overview(&mut SeededRng::default(), TODAY);

        assert_eq!(payload.kpis.len(), 3);
        assert_eq!(payload.kpis[0].label, "Total cases");
        assert_eq!(payload.kpis[2].value, KpiFigure::Ratio(6.7));
        assert_eq!(payload.top_lineages[0], LineageShare { name: "XBB", pct: 38 });
        assert_eq!(
            payload.top_regions[4],
            RegionTotal {
                region: "Euskadi",
                value: 6200
            }
        );
    }

    #[test]
    fn same_seed_same_payload() {
        let a = overview(&mut SeededRng::new(42), TODAY);
        let b = overview(&mut SeededRng::new(42), TODAY);
        assert_eq!(a, b);
    }

    #[test]
    fn kpi_counts_serialize_as_integers() {
        let payload = overview(&mut SeededRng::default(), TODAY);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["kpis"][0]["value"], serde_json::json!(1_234_567));
        assert_eq!(json["kpis"][2]["value"], serde_json::json!(6.7));
        assert_eq!(json["trend"][19]["date"], "2025-07-15");
        assert_eq!(json["top_regions"][1]["region"], "Cataluña");
    }
}
