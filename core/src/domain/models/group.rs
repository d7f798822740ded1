use shared::{CreateGroupRequest, Group, UpdateGroupRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

impl Record for Group {
    type Create = CreateGroupRequest;
    type Update = UpdateGroupRequest;

    const LABEL: &'static str = "Group";
    const PATH: &'static str = "groups";
    const ID_PREFIX: &'static str = "group";
    const FILTERS: &'static [&'static str] = &["category", "status"];
    const SORT_KEYS: &'static [&'static str] = &["name", "category", "memberCount", "createdAt"];

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
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        if let Some(leader) = &self.leader {
            fields.push(leader);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::text(&self.category)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "name" => Some(FieldValue::text(&self.name)),
            "memberCount" => Some(FieldValue::Number(self.member_count as f64)),
            "leader" => optional_text(&self.leader),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateGroupRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.name, "Name");
        validation::max_length(&mut errors, &request.name, MAX_NAME_LENGTH, "Name");
        validation::require(&mut errors, &request.category, "Category");
        validation::max_length(&mut errors, &request.description, MAX_TEXT_LENGTH, "Description");
        errors
    }

    fn validate_update(request: &UpdateGroupRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.name, "Name");
        validation::require_if_present(&mut errors, &request.category, "Category");
        if let Some(description) = &request.description {
            validation::max_length(&mut errors, description, MAX_TEXT_LENGTH, "Description");
        }
        errors
    }

    fn from_create(request: CreateGroupRequest, id: String, timestamp: &str) -> Self {
        Group {
            id,
            name: request.name.trim().to_string(),
            description: request.description,
            category: request.category.trim().to_string(),
            leader: request.leader,
            meeting_schedule: request.meeting_schedule,
            member_count: request.member_count.unwrap_or(0),
            status: request.status.unwrap_or_default(),
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateGroupRequest) {
        if let Some(name) = request.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if let Some(category) = request.category {
            self.category = category.trim().to_string();
        }
        if request.leader.is_some() {
            self.leader = request.leader;
        }
        if request.meeting_schedule.is_some() {
            self.meeting_schedule = request.meeting_schedule;
        }
        if let Some(member_count) = request.member_count {
            self.member_count = member_count;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
