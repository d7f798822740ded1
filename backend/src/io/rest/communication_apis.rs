//! Announcement endpoints: the generic CRUD routes plus the publishing
//! workflow (`POST /:id/publish`, `POST /:id/archive`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::post,
    Router,
};
use chrono::Utc;
use log::info;
use shared::Announcement;

use super::envelope::respond_with_message;
use super::resource_apis;
use crate::domain::CommunicationService;
use crate::AppState;

pub fn router(service: CommunicationService) -> Router<AppState> {
    resource_apis::routes::<Announcement>()
        .route("/:id/publish", post(publish_announcement))
        .route("/:id/archive", post(archive_announcement))
        .with_state(service)
}

pub async fn publish_announcement(
    State(service): State<CommunicationService>,
    Path(id): Path<String>,
) -> Response {
    info!("POST /api/communications/announcements/{}/publish", id);
    respond_with_message(
        service.publish(&id, Utc::now()).await,
        StatusCode::OK,
        "Announcement published successfully",
    )
}

pub async fn archive_announcement(
    State(service): State<CommunicationService>,
    Path(id): Path<String>,
) -> Response {
    info!("POST /api/communications/announcements/{}/archive", id);
    respond_with_message(
        service.archive(&id).await,
        StatusCode::OK,
        "Announcement archived successfully",
    )
}
