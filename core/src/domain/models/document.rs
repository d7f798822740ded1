use shared::{CreateDocumentRequest, Document, UpdateDocumentRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

impl Record for Document {
    type Create = CreateDocumentRequest;
    type Update = UpdateDocumentRequest;

    const LABEL: &'static str = "Document";
    const PATH: &'static str = "documents";
    const ID_PREFIX: &'static str = "doc";
    const FILTERS: &'static [&'static str] = &["category", "contentType"];
    const SORT_KEYS: &'static [&'static str] = &["title", "sizeBytes", "createdAt"];

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.file_name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::text(&self.category)),
            "contentType" => Some(FieldValue::text(&self.content_type)),
            "title" => Some(FieldValue::text(&self.title)),
            "sizeBytes" => Some(FieldValue::Number(self.size_bytes as f64)),
            "uploadedBy" => optional_text(&self.uploaded_by),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateDocumentRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.title, "Title");
        validation::max_length(&mut errors, &request.title, MAX_NAME_LENGTH * 2, "Title");
        validation::require(&mut errors, &request.file_name, "File name");
        validation::require(&mut errors, &request.category, "Category");
        if let Some(description) = &request.description {
            validation::max_length(&mut errors, description, MAX_TEXT_LENGTH, "Description");
        }
        errors
    }

    fn validate_update(request: &UpdateDocumentRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.title, "Title");
        validation::require_if_present(&mut errors, &request.category, "Category");
        errors
    }

    fn from_create(request: CreateDocumentRequest, id: String, timestamp: &str) -> Self {
        Document {
            id,
            title: request.title.trim().to_string(),
            file_name: request.file_name,
            category: request.category.trim().to_string(),
            content_type: request
                .content_type
                .filter(|content_type| !content_type.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            size_bytes: request.size_bytes.unwrap_or(0),
            uploaded_by: request.uploaded_by,
            description: request.description,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateDocumentRequest) {
        if let Some(title) = request.title {
            self.title = title.trim().to_string();
        }
        if let Some(category) = request.category {
            self.category = category.trim().to_string();
        }
        if request.description.is_some() {
            self.description = request.description;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
