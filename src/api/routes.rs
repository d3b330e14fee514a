//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::cors::cors;
use super::handlers::{
    get_genome_genes, get_genome_mutations, get_geo_points, get_lineage_frequencies,
    get_metrics, get_overview, get_timeseries, healthz, AppState,
};

/// Create the API router.
///
/// Layers, outermost first: request ID, request tracing, panic recovery,
/// CORS.
pub fn create_router(state: AppState) -> Router {
    let cors_policy = state.cors.clone();

    Router::new()
        // Health endpoint
        .route("/healthz", get(healthz))
        // Dashboard endpoints
        .route("/api/overview", get(get_overview))
        .route("/api/timeseries", get(get_timeseries))
        .route("/api/lineages/frequencies", get(get_lineage_frequencies))
        .route("/api/genome/genes", get(get_genome_genes))
        .route("/api/genome/mutations", get(get_genome_mutations))
        .route("/api/geography/points", get(get_geo_points))
        // Prometheus scrape endpoint
        .route("/metrics", get(get_metrics))
        .layer(middleware::from_fn_with_state(cors_policy, cors))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
