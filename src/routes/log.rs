//! Commit log endpoint.
//!
//! GET /api/v1/repositories/{name}/log?reference=&offset=&limit=
//!
//! Returns commits newest first. `reference` is a full ref name such as
//! `refs/heads/main`; without it the log starts at HEAD. `offset` and `limit`
//! cut a window out of the log and must not be negative.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::models::CommitInfo;
use crate::query::{LogQuery, SharedFacade};

pub fn routes(facade: SharedFacade) -> Router {
    Router::new()
        .route("/api/v1/repositories/{name}/log", get(get_log))
        .with_state(facade)
}

async fn get_log(
    State(facade): State<SharedFacade>,
    Path(name): Path<String>,
    query: std::result::Result<Query<LogQuery>, QueryRejection>,
) -> Result<Json<Vec<CommitInfo>>> {
    let Query(mut query) = query?;
    // An empty `reference=` means the default log.
    query.reference = query.reference.filter(|r| !r.is_empty());
    let commits = facade.get_log(&name, &query)?;
    Ok(Json(commits))
}
