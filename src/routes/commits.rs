use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::models::{CommitDetail, CommitDiff};
use crate::query::SharedFacade;

pub fn routes(facade: SharedFacade) -> Router {
    Router::new()
        .route("/api/v1/repositories/{name}/commit/{hash}", get(get_commit))
        .route("/api/v1/repositories/{name}/commit/{hash}/diff", get(get_commit_diff))
        .with_state(facade)
}

async fn get_commit(
    State(facade): State<SharedFacade>,
    Path((name, hash)): Path<(String, String)>,
) -> Result<Json<CommitDetail>> {
    let commit = facade.get_commit(&name, &hash)?;
    Ok(Json(commit))
}

async fn get_commit_diff(
    State(facade): State<SharedFacade>,
    Path((name, hash)): Path<(String, String)>,
) -> Result<Json<CommitDiff>> {
    let diff = facade.get_commit_diff(&name, &hash)?;
    Ok(Json(diff))
}
