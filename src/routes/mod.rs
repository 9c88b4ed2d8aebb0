//! API route handlers - maps HTTP endpoints to façade operations.
//!
//! Each submodule defines routes for a feature area:
//! - `repositories`: Repository list and per-repository summary
//! - `log`: Commit log of a repository or one of its references
//! - `commits`: Single commit and its diff
//! - `references`: Reference listing, lookup and deletion
//!
//! Handlers only translate between HTTP and `QueryFacade`; the façade is
//! injected as router state.

pub mod commits;
pub mod log;
pub mod references;
pub mod repositories;

use axum::Router;

use crate::query::SharedFacade;

pub fn create_router(facade: SharedFacade) -> Router {
    Router::new()
        .merge(repositories::routes(facade.clone()))
        .merge(log::routes(facade.clone()))
        .merge(commits::routes(facade.clone()))
        .merge(references::routes(facade))
}
