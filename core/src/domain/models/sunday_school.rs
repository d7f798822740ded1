use shared::{CreateClassRequest, SundaySchoolClass, UpdateClassRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH};

fn within_capacity(errors: &mut Vec<String>, enrolled: u32, capacity: u32) {
    if enrolled > capacity {
        errors.push(format!(
            "Enrolled ({}) cannot exceed capacity ({})",
            enrolled, capacity
        ));
    }
}

impl Record for SundaySchoolClass {
    type Create = CreateClassRequest;
    type Update = UpdateClassRequest;

    const LABEL: &'static str = "Class";
    const PATH: &'static str = "sunday-school/classes";
    const ID_PREFIX: &'static str = "class";
    const FILTERS: &'static [&'static str] = &["ageGroup", "status"];
    const SORT_KEYS: &'static [&'static str] = &["name", "enrolled", "createdAt"];

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
        vec![self.name.as_str(), self.teacher.as_str(), self.age_group.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "ageGroup" => Some(FieldValue::text(&self.age_group)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "name" => Some(FieldValue::text(&self.name)),
            "enrolled" => Some(FieldValue::Number(self.enrolled as f64)),
            "capacity" => Some(FieldValue::Number(self.capacity as f64)),
            "room" => optional_text(&self.room),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateClassRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.name, "Name");
        validation::max_length(&mut errors, &request.name, MAX_NAME_LENGTH, "Name");
        validation::require(&mut errors, &request.teacher, "Teacher");
        validation::require(&mut errors, &request.age_group, "Age group");
        if request.capacity == 0 {
            errors.push("Capacity must be at least 1".to_string());
        }
        within_capacity(&mut errors, request.enrolled.unwrap_or(0), request.capacity);
        errors
    }

    fn validate_update(request: &UpdateClassRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.name, "Name");
        validation::require_if_present(&mut errors, &request.teacher, "Teacher");
        validation::require_if_present(&mut errors, &request.age_group, "Age group");
        if request.capacity == Some(0) {
            errors.push("Capacity must be at least 1".to_string());
        }
        if let (Some(enrolled), Some(capacity)) = (request.enrolled, request.capacity) {
            within_capacity(&mut errors, enrolled, capacity);
        }
        errors
    }

    fn from_create(request: CreateClassRequest, id: String, timestamp: &str) -> Self {
        SundaySchoolClass {
            id,
            name: request.name.trim().to_string(),
            teacher: request.teacher.trim().to_string(),
            age_group: request.age_group.trim().to_string(),
            room: request.room,
            schedule: request.schedule,
            capacity: request.capacity,
            enrolled: request.enrolled.unwrap_or(0),
            status: request.status.unwrap_or_default(),
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateClassRequest) {
        if let Some(name) = request.name {
            self.name = name.trim().to_string();
        }
        if let Some(teacher) = request.teacher {
            self.teacher = teacher.trim().to_string();
        }
        if let Some(age_group) = request.age_group {
            self.age_group = age_group.trim().to_string();
        }
        if request.room.is_some() {
            self.room = request.room;
        }
        if request.schedule.is_some() {
            self.schedule = request.schedule;
        }
        if let Some(capacity) = request.capacity {
            self.capacity = capacity;
        }
        if let Some(enrolled) = request.enrolled {
            self.enrolled = enrolled;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_cannot_exceed_capacity() {
        let request = CreateClassRequest {
            name: "Juniors A".to_string(),
            teacher: "Mrs. Okafor".to_string(),
            age_group: "Juniors".to_string(),
            capacity: 10,
            enrolled: Some(12),
            ..Default::default()
        };
        assert_eq!(
            SundaySchoolClass::validate_create(&request),
            vec!["Enrolled (12) cannot exceed capacity (10)".to_string()]
        );
    }
}
