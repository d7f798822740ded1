//! # Generic Resource Endpoints
//!
//! The same six CRUD endpoints serve every resource:
//!
//! | method | path | operation |
//! |---|---|---|
//! | GET | `/` | list (query string: `page`, `limit`, `search`, `sortBy`, `sortOrder`, filters) |
//! | POST | `/` | create, 201 |
//! | GET | `/:id` | get |
//! | PUT | `/:id` | update |
//! | PATCH | `/:id` | update |
//! | DELETE | `/:id` | delete |

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::info;
use shared::{ApiResponse, SearchParams};

use super::envelope::{error_response, respond, respond_with_message};
use crate::domain::{Record, ResourceService, ServiceError};
use crate::AppState;

/// CRUD routes for one resource, to be nested under `/api/<T::PATH>`
pub fn router<T: Record>(service: ResourceService<T>) -> Router<AppState> {
    routes::<T>().with_state(service)
}

/// The CRUD routes before their service is attached, for resources that
/// add endpoints of their own
pub fn routes<T: Record>() -> Router<ResourceService<T>> {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route(
            "/:id",
            get(fetch::<T>)
                .put(update::<T>)
                .patch(update::<T>)
                .delete(remove::<T>),
        )
}

/// Turn a body that failed to parse into a validation envelope
pub(crate) fn parse_body<B>(body: Result<Json<B>, JsonRejection>) -> Result<B, Response> {
    body.map(|Json(value)| value)
        .map_err(|rejection| error_response(ServiceError::validation(rejection.body_text())))
}

pub async fn list<T: Record>(
    State(service): State<ResourceService<T>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    info!("GET /api/{} - query: {:?}", T::PATH, pairs);
    let params = SearchParams::from_pairs(pairs);
    respond(service.list(&params).await, StatusCode::OK)
}

pub async fn fetch<T: Record>(
    State(service): State<ResourceService<T>>,
    Path(id): Path<String>,
) -> Response {
    info!("GET /api/{}/{}", T::PATH, id);
    respond(service.get(&id).await, StatusCode::OK)
}

pub async fn create<T: Record>(
    State(service): State<ResourceService<T>>,
    body: Result<Json<T::Create>, JsonRejection>,
) -> Response {
    info!("POST /api/{}", T::PATH);
    let draft = match parse_body(body) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    respond_with_message(
        service.create(draft).await,
        StatusCode::CREATED,
        format!("{} created successfully", T::LABEL),
    )
}

pub async fn update<T: Record>(
    State(service): State<ResourceService<T>>,
    Path(id): Path<String>,
    body: Result<Json<T::Update>, JsonRejection>,
) -> Response {
    info!("Update /api/{}/{}", T::PATH, id);
    let patch = match parse_body(body) {
        Ok(patch) => patch,
        Err(response) => return response,
    };
    respond_with_message(
        service.update(&id, patch).await,
        StatusCode::OK,
        format!("{} updated successfully", T::LABEL),
    )
}

pub async fn remove<T: Record>(
    State(service): State<ResourceService<T>>,
    Path(id): Path<String>,
) -> Response {
    info!("DELETE /api/{}/{}", T::PATH, id);
    match service.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::acknowledged(format!(
                "{} deleted successfully",
                T::LABEL
            ))),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
