use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::models::RepositoryInfo;
use crate::query::SharedFacade;

pub fn routes(facade: SharedFacade) -> Router {
    Router::new()
        .route("/api/v1/repositories", get(list_repositories))
        .route("/api/v1/repositories/{name}", get(get_repository))
        .with_state(facade)
}

async fn list_repositories(State(facade): State<SharedFacade>) -> Result<Json<Vec<RepositoryInfo>>> {
    let repositories = facade.list_repositories()?;
    Ok(Json(repositories))
}

async fn get_repository(
    State(facade): State<SharedFacade>,
    Path(name): Path<String>,
) -> Result<Json<RepositoryInfo>> {
    let info = facade.get_repository(&name)?;
    Ok(Json(info))
}
