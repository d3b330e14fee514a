//! HTTP API handlers.
//!
//! Every handler answers 200. Unknown or malformed filters fall back to
//! their defaults instead of producing a client error.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use time::{Date, OffsetDateTime};
use tracing::debug;

use crate::api::cors::CorsPolicy;
use crate::generators::{
    self, FeatureCollection, GenomeGenes, GenomeMutations, LineageFrequencies, Metric, Overview,
    TimeSeries,
};
use crate::metrics::{self, GenerationTimer};
use crate::reference::{gene_label, resolve_gene};
use crate::rng::{SharedRng, DEFAULT_SEED};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single random source behind every randomized payload.
    pub rng: SharedRng,
    /// Cross-origin allow-list.
    pub cors: Arc<CorsPolicy>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// Reference day for date-relative series; `None` means today (UTC).
    pub pinned_date: Option<Date>,
}

impl AppState {
    /// Create new app state with a source seeded by `seed`.
    pub fn new(seed: u64, cors: CorsPolicy) -> Self {
        Self {
            rng: SharedRng::new(seed),
            cors: Arc::new(cors),
            metrics: None,
            pinned_date: None,
        }
    }

    /// Expose `handle` on `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Generate date-relative series as if today were `date`.
    pub fn with_pinned_date(mut self, date: Date) -> Self {
        self.pinned_date = Some(date);
        self
    }

    /// Reference day for this request.
    pub fn today(&self) -> Date {
        self.pinned_date
            .unwrap_or_else(|| OffsetDateTime::now_utc().date())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("rng", &self.rng)
            .field("cors", &self.cors)
            .field("metrics", &self.metrics.is_some())
            .field("pinned_date", &self.pinned_date)
            .finish()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            DEFAULT_SEED,
            CorsPolicy::new(&["http://localhost:5173", "http://localhost:5174"]),
        )
    }
}

/// Raw query pairs in request order. Repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `key`; `?k=a&k=b` reads as `a`.
fn first_param<'q>(pairs: &'q [(String, String)], key: &str) -> Option<&'q str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Health check handler - always returns 200 with `ok`.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Overview KPIs, trend and top-5 tables.
pub async fn get_overview(State(state): State<AppState>) -> Json<Overview> {
    const ENDPOINT: &str = "/api/overview";
    metrics::inc_requests(ENDPOINT);
    let _timer = GenerationTimer::start(ENDPOINT);

    let today = state.today();
    Json(state.rng.with(|rng| generators::overview(rng, today)))
}

/// 40-day series of the requested metric.
pub async fn get_timeseries(
    State(state): State<AppState>,
    query: Option<Query<QueryPairs>>,
) -> Json<TimeSeries> {
    const ENDPOINT: &str = "/api/timeseries";
    metrics::inc_requests(ENDPOINT);
    let _timer = GenerationTimer::start(ENDPOINT);

    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let requested = first_param(&pairs, "metric");
    let (metric, fell_back) = Metric::resolve(requested);
    if fell_back {
        metrics::inc_filter_fallbacks("metric");
    }
    debug!(?requested, %metric, fell_back, "Generating time series");

    let today = state.today();
    Json(state.rng.with(|rng| generators::timeseries(rng, metric, today)))
}

/// Weekly lineage share table.
pub async fn get_lineage_frequencies(State(state): State<AppState>) -> Json<LineageFrequencies> {
    const ENDPOINT: &str = "/api/lineages/frequencies";
    metrics::inc_requests(ENDPOINT);
    let _timer = GenerationTimer::start(ENDPOINT);

    Json(state.rng.with(|rng| generators::frequencies(rng)))
}

/// Fixed genome annotation.
pub async fn get_genome_genes() -> Json<GenomeGenes> {
    metrics::inc_requests("/api/genome/genes");
    Json(generators::genes())
}

/// Sampled mutations inside the requested gene.
pub async fn get_genome_mutations(
    State(state): State<AppState>,
    query: Option<Query<QueryPairs>>,
) -> Json<GenomeMutations> {
    const ENDPOINT: &str = "/api/genome/mutations";
    metrics::inc_requests(ENDPOINT);
    let _timer = GenerationTimer::start(ENDPOINT);

    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let requested = first_param(&pairs, "gene");
    let (window, fell_back) = resolve_gene(requested);
    if fell_back && requested.is_some_and(|g| !g.is_empty()) {
        metrics::inc_filter_fallbacks("gene");
    }
    let label = gene_label(requested);
    debug!(?requested, window = window.name, fell_back, "Generating mutations");

    Json(state.rng.with(|rng| generators::mutations(rng, window, label)))
}

/// Fixed map points.
pub async fn get_geo_points() -> Json<FeatureCollection> {
    metrics::inc_requests("/api/geography/points");
    Json(generators::points())
}

/// Prometheus text exposition; empty when no recorder is installed.
pub async fn get_metrics(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}
