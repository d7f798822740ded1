//! # Document Service
//!
//! Documents are metadata records plus a blob of file content. Metadata
//! goes through the generic [`ResourceService`] like every other record;
//! content bytes are kept alongside, keyed by document id, and are removed
//! together with the record.

use log::{info, warn};
use shared::{CreateDocumentRequest, Document};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::ServiceError;
use super::models::document::DEFAULT_CONTENT_TYPE;
use super::resource_service::ResourceService;

/// A file received for upload
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    /// Defaults to the file name
    pub title: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub uploaded_by: Option<String>,
}

#[derive(Clone)]
pub struct DocumentService {
    documents: ResourceService<Document>,
    contents: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    max_upload_bytes: usize,
}

impl DocumentService {
    pub fn new(documents: ResourceService<Document>, max_upload_bytes: usize) -> Self {
        Self {
            documents,
            contents: Arc::new(RwLock::new(HashMap::new())),
            max_upload_bytes,
        }
    }

    /// Metadata CRUD
    pub fn documents(&self) -> &ResourceService<Document> {
        &self.documents
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn upload(&self, upload: DocumentUpload) -> Result<Document, ServiceError> {
        if upload.bytes.len() > self.max_upload_bytes {
            warn!(
                "Rejected upload of {} ({} bytes, limit {})",
                upload.file_name,
                upload.bytes.len(),
                self.max_upload_bytes
            );
            return Err(ServiceError::PayloadTooLarge {
                limit: self.max_upload_bytes,
            });
        }
        if upload.bytes.is_empty() {
            return Err(ServiceError::validation("File is empty"));
        }

        let title = upload
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| upload.file_name.clone());

        let document = self
            .documents
            .create(CreateDocumentRequest {
                title,
                file_name: upload.file_name,
                category: upload.category,
                content_type: Some(
                    upload
                        .content_type
                        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
                ),
                size_bytes: Some(upload.bytes.len() as u64),
                uploaded_by: upload.uploaded_by,
                description: upload.description,
            })
            .await?;

        self.contents
            .write()
            .await
            .insert(document.id.clone(), upload.bytes);
        info!("📄 Uploaded {} ({} bytes)", document.file_name, document.size_bytes);
        Ok(document)
    }

    /// Metadata and content of a stored document
    pub async fn download(&self, id: &str) -> Result<(Document, Vec<u8>), ServiceError> {
        let document = self.documents.get(id).await?;
        let bytes = self
            .contents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Document content", id))?;
        Ok((document, bytes))
    }

    /// Remove the record and its content
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.documents.delete(id).await?;
        self.contents.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use std::time::Duration;

    fn service(limit: usize) -> DocumentService {
        let documents = ResourceService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        DocumentService::new(documents, limit)
    }

    fn upload(bytes: &[u8]) -> DocumentUpload {
        DocumentUpload {
            file_name: "bulletin.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: bytes.to_vec(),
            title: None,
            category: "Bulletins".to_string(),
            description: None,
            uploaded_by: Some("Office".to_string()),
        }
    }

    #[tokio::test]
    async fn test_upload_then_download() {
        let service = service(1024);
        let document = service.upload(upload(b"Sunday bulletin")).await.unwrap();

        assert_eq!(document.title, "bulletin.txt");
        assert_eq!(document.size_bytes, 15);
        assert!(document.id.starts_with("doc_"));

        let (metadata, bytes) = service.download(&document.id).await.unwrap();
        assert_eq!(metadata, document);
        assert_eq!(bytes, b"Sunday bulletin");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let service = service(4);
        let error = service.upload(upload(b"too large")).await.unwrap_err();
        assert_eq!(error, ServiceError::PayloadTooLarge { limit: 4 });
        assert!(service.documents().all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_content() {
        let service = service(1024);
        let document = service.upload(upload(b"x")).await.unwrap();
        service.delete(&document.id).await.unwrap();
        assert!(service.download(&document.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_empty_file_is_invalid() {
        let service = service(1024);
        let error = service.upload(upload(b"")).await.unwrap_err();
        assert_eq!(error, ServiceError::validation("File is empty"));
    }
}
