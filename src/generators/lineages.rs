//! Weekly lineage share table.
//!
//! Shares drift by a uniform step in `[-1, 1)` per week, are floored at zero
//! and then renormalized to sum to 100. The normalized row is what the next
//! week drifts from.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use super::iso_date;
use crate::reference::{LINEAGE_SEED_SHARES, LINEAGE_WEEKS, TRACKED_LINEAGES};
use crate::rng::RandomSource;

/// One week of lineage shares, serialized flat as `{date, <lineage>: pct, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageRow {
    /// Week start.
    #[serde(serialize_with = "iso_date::serialize")]
    pub date: Date,
    /// Share (%) per lineage; sums to 100.
    #[serde(flatten)]
    pub shares: BTreeMap<&'static str, f64>,
}

/// `/api/lineages/frequencies` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageFrequencies {
    /// Weekly rows, oldest first.
    pub data: Vec<LineageRow>,
    /// Lineage names, in display order.
    pub lineages: Vec<&'static str>,
}

/// Build the weekly share table for [`LINEAGE_WEEKS`].
pub fn frequencies(rng: &mut impl RandomSource) -> LineageFrequencies {
    let mut shares = LINEAGE_SEED_SHARES;

    let data = LINEAGE_WEEKS
        .iter()
        .map(|&date| {
            for share in shares.iter_mut() {
                *share = (*share + rng.next_f64() * 2.0 - 1.0).max(0.0);
            }
            normalize(&mut shares);

            LineageRow {
                date,
                shares: TRACKED_LINEAGES.iter().copied().zip(shares).collect(),
            }
        })
        .collect();

    LineageFrequencies {
        data,
        lineages: TRACKED_LINEAGES.to_vec(),
    }
}

/// Scale `shares` in place so they sum to 100.
///
/// All-zero rows become a uniform split.
fn normalize(shares: &mut [f64]) {
    let total: f64 = shares.iter().sum();
    if total > 0.0 {
        for share in shares.iter_mut() {
            *share = *share / total * 100.0;
        }
    } else if !shares.is_empty() {
        let even = 100.0 / shares.len() as f64;
        shares.fill(even);
    }
}
