use shared::{Announcement, AnnouncementStatus, CreateAnnouncementRequest, UpdateAnnouncementRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH};

pub const DEFAULT_AUDIENCE: &str = "all";

impl Record for Announcement {
    type Create = CreateAnnouncementRequest;
    type Update = UpdateAnnouncementRequest;

    const LABEL: &'static str = "Announcement";
    const PATH: &'static str = "communications/announcements";
    const ID_PREFIX: &'static str = "announcement";
    const FILTERS: &'static [&'static str] = &["status", "priority", "audience"];
    const SORT_KEYS: &'static [&'static str] = &["publishDate", "priority", "title", "createdAt"];

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
        vec![self.title.as_str(), self.content.as_str(), self.author.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "status" => Some(FieldValue::text(self.status.as_str())),
            "audience" => Some(FieldValue::text(&self.audience)),
            "publishDate" => optional_text(&self.publish_date),
            "title" => Some(FieldValue::text(&self.title)),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            "priority" => Some(FieldValue::text(self.priority.as_str())),
            _ => None,
        }
    }

    fn sort_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            // Low < Normal < High < Urgent rather than alphabetical
            "priority" => Some(FieldValue::Number(self.priority.rank() as f64)),
            other => self.field(other),
        }
    }

    fn validate_create(request: &CreateAnnouncementRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.title, "Title");
        validation::max_length(&mut errors, &request.title, MAX_NAME_LENGTH * 2, "Title");
        validation::require(&mut errors, &request.content, "Content");
        validation::require(&mut errors, &request.author, "Author");
        validation::optional_date_time(&mut errors, &request.publish_date, "Publish date");
        errors
    }

    fn validate_update(request: &UpdateAnnouncementRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.title, "Title");
        validation::require_if_present(&mut errors, &request.content, "Content");
        validation::require_if_present(&mut errors, &request.author, "Author");
        validation::optional_date_time(&mut errors, &request.publish_date, "Publish date");
        errors
    }

    fn from_create(request: CreateAnnouncementRequest, id: String, timestamp: &str) -> Self {
        Announcement {
            id,
            title: request.title.trim().to_string(),
            content: request.content,
            audience: request
                .audience
                .filter(|audience| !audience.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
            priority: request.priority.unwrap_or_default(),
            status: request.status.unwrap_or_default(),
            publish_date: validation::normalized_optional_date(request.publish_date),
            author: request.author.trim().to_string(),
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateAnnouncementRequest) {
        // Publishing again never moves the original publish date
        let republishing = self.status == AnnouncementStatus::Published
            && self.publish_date.is_some()
            && request.status == Some(AnnouncementStatus::Published);
        if let Some(title) = request.title {
            self.title = title.trim().to_string();
        }
        if let Some(content) = request.content {
            self.content = content;
        }
        if let Some(audience) = request.audience {
            self.audience = audience;
        }
        if let Some(priority) = request.priority {
            self.priority = priority;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
        if request.publish_date.is_some() && !republishing {
            self.publish_date = validation::normalized_optional_date(request.publish_date);
        }
        if let Some(author) = request.author {
            self.author = author.trim().to_string();
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
