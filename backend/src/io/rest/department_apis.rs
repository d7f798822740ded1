//! Department endpoints: generic CRUD plus `GET /:id/roles`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use log::info;

use super::envelope::respond;
use super::resource_apis;
use crate::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    resource_apis::router(state.departments.clone())
        .merge(Router::new().route("/:id/roles", get(list_department_roles)))
}

pub async fn list_department_roles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!("GET /api/departments/{}/roles", id);
    respond(
        state.departments.roles_for_department(&id, &state.roles).await,
        StatusCode::OK,
    )
}
