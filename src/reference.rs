//! Fixed reference tables behind the mock payloads.
//!
//! Coordinates in [`GENES`] are SARS-CoV-2 (Wuhan-Hu-1) annotation windows,
//! inclusive on both ends.

use serde::Serialize;
use time::macros::date;
use time::Date;

/// Named genomic region with inclusive start/end coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneWindow {
    /// Gene name.
    pub name: &'static str,
    /// First nucleotide position.
    pub start: u32,
    /// Last nucleotide position.
    pub end: u32,
}

impl GeneWindow {
    const fn new(name: &'static str, start: u32, end: u32) -> Self {
        Self { name, start, end }
    }

    /// Whether `pos` lies inside the window.
    pub fn contains(&self, pos: u32) -> bool {
        (self.start..=self.end).contains(&pos)
    }

    /// Number of positions covered.
    pub fn span(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Genome annotation, in genome order.
pub const GENES: [GeneWindow; 11] = [
    GeneWindow::new("ORF1a", 266, 13468),
    GeneWindow::new("ORF1b", 13468, 21555),
    GeneWindow::new("Spike", 21563, 25384),
    GeneWindow::new("ORF3a", 25393, 26220),
    GeneWindow::new("M", 26523, 27191),
    GeneWindow::new("ORF6", 27202, 27387),
    GeneWindow::new("ORF7a", 27394, 27759),
    GeneWindow::new("ORF7b", 27756, 27887),
    GeneWindow::new("ORF8", 27894, 28259),
    GeneWindow::new("N", 28274, 29533),
    GeneWindow::new("ORF10", 29558, 29674),
];

/// Gene used when a request names no gene or an unknown one.
pub const DEFAULT_GENE: &str = "Spike";

/// One-letter amino-acid alphabet.
pub const AMINO_ACIDS: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'Y',
];

/// Lineages tracked in the weekly frequency table.
pub const TRACKED_LINEAGES: [&str; 5] = ["BA.2", "BA.5", "XBB", "EG.5", "JN.1"];

/// Starting share (%) of each tracked lineage, aligned with [`TRACKED_LINEAGES`].
pub const LINEAGE_SEED_SHARES: [f64; 5] = [20.0, 30.0, 35.0, 10.0, 5.0];

/// Week-start dates of the lineage frequency table.
pub const LINEAGE_WEEKS: [Date; 8] = [
    date!(2025 - 05 - 25),
    date!(2025 - 06 - 01),
    date!(2025 - 06 - 08),
    date!(2025 - 06 - 15),
    date!(2025 - 06 - 22),
    date!(2025 - 06 - 29),
    date!(2025 - 07 - 06),
    date!(2025 - 07 - 13),
];

/// Headline figures on the overview page.
pub const KPIS: [(&str, KpiFigure); 3] = [
    ("Total cases", KpiFigure::Count(1_234_567)),
    ("Weekly cases", KpiFigure::Count(3456)),
    ("Positivity %", KpiFigure::Ratio(6.7)),
];

/// KPI value, keeping counts integral on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KpiFigure {
    /// Whole count.
    Count(u64),
    /// Fractional figure such as a percentage.
    Ratio(f64),
}

/// Top lineages by share (%).
pub const TOP_LINEAGES: [(&str, u32); 5] = [
    ("XBB", 38),
    ("BA.5", 27),
    ("EG.5", 18),
    ("BA.2", 12),
    ("Others", 5),
];

/// Top regions by case count.
pub const TOP_REGIONS: [(&str, u32); 5] = [
    ("Madrid", 18230),
    ("Cataluña", 15900),
    ("Andalucía", 14820),
    ("C. Valenciana", 9900),
    ("Euskadi", 6200),
];

/// Named map point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoSite {
    /// Place name.
    pub name: &'static str,
    /// Case count shown on the map.
    pub value: u32,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

/// Cities plotted on the geography page.
pub const GEO_SITES: [GeoSite; 5] = [
    GeoSite {
        name: "Madrid",
        value: 18000,
        longitude: -3.7038,
        latitude: 40.4168,
    },
    GeoSite {
        name: "Barcelona",
        value: 15000,
        longitude: 2.1734,
        latitude: 41.3851,
    },
    GeoSite {
        name: "Valencia",
        value: 9500,
        longitude: -0.3763,
        latitude: 39.4699,
    },
    GeoSite {
        name: "Sevilla",
        value: 8200,
        longitude: -5.9845,
        latitude: 37.3891,
    },
    GeoSite {
        name: "Bilbao",
        value: 6100,
        longitude: -2.9350,
        latitude: 43.2630,
    },
];

/// Look `input` up in `table` by key, falling back to the `default_key` entry.
///
/// Absent and empty inputs fall back too. Returns the entry and whether the
/// fallback was taken. `None` only if `default_key` itself is missing.
pub fn resolve_or_default<'t, T>(
    input: Option<&str>,
    table: &'t [T],
    key: impl Fn(&T) -> &str,
    default_key: &str,
) -> Option<(&'t T, bool)> {
    let requested = input
        .filter(|s| !s.is_empty())
        .and_then(|s| table.iter().find(|&entry| key(entry) == s));

    match requested {
        Some(entry) => Some((entry, false)),
        None => table
            .iter()
            .find(|&entry| key(entry) == default_key)
            .map(|entry| (entry, true)),
    }
}

/// Name echoed on mutation records: the requested gene, or [`DEFAULT_GENE`]
/// when the parameter is absent or empty. Unknown names are kept.
pub fn gene_label(input: Option<&str>) -> &str {
    input.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_GENE)
}

/// Resolve a gene name against [`GENES`], defaulting to [`DEFAULT_GENE`].
pub fn resolve_gene(input: Option<&str>) -> (GeneWindow, bool) {
    resolve_or_default(input, &GENES, |g| g.name, DEFAULT_GENE)
        .map(|(g, fell_back)| (*g, fell_back))
        .unwrap_or((GENES[2], true))
}
