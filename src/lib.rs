//! Serve a fixed set of git repositories over a read-mostly JSON API.
//!
//! Configuration is resolved once into a [`registry::RepositoryRegistry`];
//! [`query::QueryFacade`] answers log, commit and reference queries against
//! it, and [`routes`] exposes the façade over HTTP.

pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod query;
pub mod registry;
pub mod routes;
pub mod source;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{AppError, Result};
pub use query::{LogQuery, QueryFacade, SharedFacade};
pub use registry::{RepositoryEntry, RepositoryRegistry};
pub use source::RepositorySource;

/// Full application router: API routes plus CORS and request tracing.
pub fn app(facade: SharedFacade) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::create_router(facade))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
