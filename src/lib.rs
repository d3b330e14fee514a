//! Epidemiological dashboard API.
//!
//! A small read-only HTTP service answering the dashboard's JSON endpoints
//! with synthetic data. Randomized payloads draw from one seeded source, so
//! a fresh process always produces the same sequence of payloads.
//!
//! # Endpoints
//!
//! ```text
//! GET /healthz                    plain "ok"
//! GET /api/overview               KPIs, 20-day trend, top lineages/regions
//! GET /api/timeseries?metric=     40-day series (cases | positivity | tests)
//! GET /api/lineages/frequencies   weekly lineage shares, rows sum to 100
//! GET /api/genome/genes           gene annotation windows
//! GET /api/genome/mutations?gene= 30 sampled mutations inside one gene
//! GET /api/geography/points       GeoJSON FeatureCollection
//! GET /metrics                    Prometheus exposition
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`rng`]: Seeded, shareable random source
//! - [`reference`]: Fixed reference tables and fallback lookup
//! - [`generators`]: Payload synthesis, one generator per endpoint
//! - [`api`]: HTTP handlers, routes and CORS
//! - [`metrics`]: Prometheus metrics
//! - [`server`]: Server lifecycle

pub mod api;
pub mod config;
pub mod error;
pub mod generators;
pub mod metrics;
pub mod reference;
pub mod rng;
pub mod server;

pub use config::Config;
pub use error::{ApiError, Result};
