//! # Document Endpoints
//!
//! Metadata is served by the generic read and update handlers; content has
//! its own routes:
//!
//! - `POST /api/uploads`: multipart form with `file`, `title`, `category`,
//!   `description` and `uploadedBy` parts. This is the only way to create a
//!   document, so every document has content.
//! - `GET /api/documents/:id/content`: the stored bytes as an attachment
//! - `DELETE /api/documents/:id`: removes metadata and content together

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use log::{info, warn};
use shared::{ApiResponse, Document};

use super::envelope::{error_response, respond_with_message};
use super::resource_apis;
use crate::domain::{DocumentService, DocumentUpload, ServiceError};
use crate::AppState;

/// Room for multipart boundaries and the text parts on top of the file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(service: DocumentService) -> Router<AppState> {
    let metadata = Router::new()
        .route(
            "/",
            get(resource_apis::list::<Document>).post(create_without_content),
        )
        .route(
            "/:id",
            get(resource_apis::fetch::<Document>)
                .put(resource_apis::update::<Document>)
                .patch(resource_apis::update::<Document>),
        )
        .with_state(service.documents().clone());

    let content = Router::new()
        .route("/:id", delete(delete_document))
        .route("/:id/content", get(download_document))
        .with_state(service);

    metadata.merge(content)
}

pub async fn create_without_content() -> Response {
    warn!("POST /api/documents rejected: documents are created by upload");
    error_response(ServiceError::Http {
        status: StatusCode::METHOD_NOT_ALLOWED.as_u16(),
        message: "Documents are created by uploading a file to /api/uploads".to_string(),
    })
}

pub fn upload_router(service: DocumentService) -> Router<AppState> {
    let body_limit = service.max_upload_bytes() + MULTIPART_OVERHEAD;
    Router::new()
        .route("/", post(upload_document))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}

fn multipart_error(error: MultipartError, limit: usize) -> ServiceError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::PayloadTooLarge { limit }
    } else {
        ServiceError::validation(error.body_text())
    }
}

/// Collect the parts of an upload form
async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<DocumentUpload, ServiceError> {
    let mut upload = DocumentUpload {
        file_name: String::new(),
        content_type: None,
        bytes: Vec::new(),
        title: None,
        category: String::new(),
        description: None,
        uploaded_by: None,
    };
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.file_name = field.file_name().unwrap_or("upload").to_string();
            upload.content_type = field.content_type().map(str::to_string);
            upload.bytes = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, limit))?
                .to_vec();
            has_file = true;
            continue;
        }

        let value = field.text().await.map_err(|e| multipart_error(e, limit))?;
        match name.as_str() {
            "title" => upload.title = Some(value),
            "category" => upload.category = value,
            "description" => upload.description = Some(value),
            "uploadedBy" => upload.uploaded_by = Some(value),
            other => warn!("Ignoring unexpected upload field '{}'", other),
        }
    }

    if !has_file {
        return Err(ServiceError::validation("A file part is required"));
    }
    Ok(upload)
}

pub async fn upload_document(
    State(service): State<DocumentService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    info!("POST /api/uploads");
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return error_response(ServiceError::validation(rejection.body_text())),
    };

    let result = match read_upload(multipart, service.max_upload_bytes()).await {
        Ok(upload) => service.upload(upload).await,
        Err(e) => Err(e),
    };
    respond_with_message(result, StatusCode::CREATED, "Document uploaded successfully")
}

pub async fn download_document(
    State(service): State<DocumentService>,
    Path(id): Path<String>,
) -> Response {
    info!("GET /api/documents/{}/content", id);
    match service.download(&id).await {
        Ok((document, bytes)) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                document.file_name.replace('"', "_")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, document.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn delete_document(
    State(service): State<DocumentService>,
    Path(id): Path<String>,
) -> Response {
    info!("DELETE /api/documents/{}", id);
    match service.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::acknowledged("Document deleted successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
