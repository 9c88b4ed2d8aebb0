//! Reference endpoints.
//!
//! - GET /api/v1/repositories/{name}/refs
//!   Lists every reference with the commit it points at.
//!
//! - GET /api/v1/repositories/{name}/ref/{*fullname}
//!   One reference by full name, e.g. `.../ref/refs/heads/main`.
//!
//! - POST /api/v1/repositories/{name}/admin/delete-ref/{*fullname}
//!   Deletes the reference. Responds 204; deleting it again is a 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::models::ReferenceInfo;
use crate::query::SharedFacade;

pub fn routes(facade: SharedFacade) -> Router {
    Router::new()
        .route("/api/v1/repositories/{name}/refs", get(list_references))
        .route("/api/v1/repositories/{name}/ref/{*fullname}", get(get_reference))
        .route(
            "/api/v1/repositories/{name}/admin/delete-ref/{*fullname}",
            post(delete_reference),
        )
        .with_state(facade)
}

async fn list_references(
    State(facade): State<SharedFacade>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ReferenceInfo>>> {
    let references = facade.list_references(&name)?;
    Ok(Json(references))
}

async fn get_reference(
    State(facade): State<SharedFacade>,
    Path((name, fullname)): Path<(String, String)>,
) -> Result<Json<ReferenceInfo>> {
    let reference = facade.get_reference(&name, &fullname)?;
    Ok(Json(reference))
}

async fn delete_reference(
    State(facade): State<SharedFacade>,
    Path((name, fullname)): Path<(String, String)>,
) -> Result<StatusCode> {
    facade.delete_reference(&name, &fullname)?;
    Ok(StatusCode::NO_CONTENT)
}
