//! Document uploads and content downloads.

use church_admin_core::domain::{DocumentUpload, ServiceError};
use log::info;
use reqwest::multipart::{Form, Part};
use shared::Document;

use super::api::ApiClient;

#[derive(Clone)]
pub struct DocumentClient {
    api: ApiClient,
}

fn upload_form(upload: DocumentUpload) -> Result<Form, ServiceError> {
    let mut file = Part::bytes(upload.bytes).file_name(upload.file_name);
    if let Some(content_type) = &upload.content_type {
        file = file
            .mime_str(content_type)
            .map_err(|e| ServiceError::validation(format!("Invalid content type: {}", e)))?;
    }

    let mut form = Form::new()
        .part("file", file)
        .text("category", upload.category);
    for (name, value) in [
        ("title", upload.title),
        ("description", upload.description),
        ("uploadedBy", upload.uploaded_by),
    ] {
        if let Some(value) = value {
            form = form.text(name, value);
        }
    }
    Ok(form)
}

impl DocumentClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload(&self, upload: DocumentUpload) -> Result<Document, ServiceError> {
        let file_name = upload.file_name.clone();
        let document: Document = self.api.upload("uploads", upload_form(upload)?).await?;
        info!("📄 Uploaded {} as {}", file_name, document.id);
        Ok(document)
    }

    pub async fn download(&self, id: &str) -> Result<Vec<u8>, ServiceError> {
        self.api
            .download(&format!("documents/{}/content", id), &[])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    ServiceError::not_found("Document", id)
                } else {
                    e
                }
            })
    }
}
