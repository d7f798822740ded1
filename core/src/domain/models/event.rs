use shared::{CreateEventRequest, Event, UpdateEventRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, parse_date_time, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

/// The end of an event may not come before its start
fn ordered_dates(errors: &mut Vec<String>, start: &str, end: Option<&str>) {
    let (Some(start), Some(end)) = (parse_date_time(start), end.and_then(parse_date_time)) else {
        return;
    };
    if end < start {
        errors.push("End date cannot be before start date".to_string());
    }
}

impl Record for Event {
    type Create = CreateEventRequest;
    type Update = UpdateEventRequest;

    const LABEL: &'static str = "Event";
    const PATH: &'static str = "events";
    const ID_PREFIX: &'static str = "event";
    const FILTERS: &'static [&'static str] = &["category", "status"];
    const SORT_KEYS: &'static [&'static str] = &["startDate", "title", "createdAt"];

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
        vec![self.title.as_str(), self.description.as_str(), self.location.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::text(&self.category)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "startDate" => Some(FieldValue::text(&self.start_date)),
            "endDate" => optional_text(&self.end_date),
            "title" => Some(FieldValue::text(&self.title)),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateEventRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.title, "Title");
        validation::max_length(&mut errors, &request.title, MAX_NAME_LENGTH, "Title");
        validation::require(&mut errors, &request.category, "Category");
        validation::max_length(&mut errors, &request.description, MAX_TEXT_LENGTH, "Description");
        validation::date_time(&mut errors, &request.start_date, "Start date");
        validation::optional_date_time(&mut errors, &request.end_date, "End date");
        ordered_dates(&mut errors, &request.start_date, request.end_date.as_deref());
        errors
    }

    fn validate_update(request: &UpdateEventRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.title, "Title");
        validation::require_if_present(&mut errors, &request.category, "Category");
        validation::optional_date_time(&mut errors, &request.start_date, "Start date");
        validation::optional_date_time(&mut errors, &request.end_date, "End date");
        if let Some(start) = &request.start_date {
            ordered_dates(&mut errors, start, request.end_date.as_deref());
        }
        errors
    }

    fn from_create(request: CreateEventRequest, id: String, timestamp: &str) -> Self {
        Event {
            id,
            title: request.title.trim().to_string(),
            description: request.description,
            location: request.location,
            category: request.category.trim().to_string(),
            start_date: validation::normalized_date(request.start_date),
            end_date: validation::normalized_optional_date(request.end_date),
            status: request.status.unwrap_or_default(),
            organizer: request.organizer,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateEventRequest) {
        if let Some(title) = request.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if let Some(location) = request.location {
            self.location = location;
        }
        if let Some(category) = request.category {
            self.category = category.trim().to_string();
        }
        if let Some(start_date) = request.start_date {
            self.start_date = validation::normalized_date(start_date);
        }
        if request.end_date.is_some() {
            self.end_date = validation::normalized_optional_date(request.end_date);
        }
        if let Some(status) = request.status {
            self.status = status;
        }
        if request.organizer.is_some() {
            self.organizer = request.organizer;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
