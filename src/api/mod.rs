//! HTTP API: dashboard endpoints, health, metrics and CORS.

pub mod cors;
pub mod handlers;
pub mod routes;

pub use cors::CorsPolicy;
pub use handlers::AppState;
pub use routes::create_router;
