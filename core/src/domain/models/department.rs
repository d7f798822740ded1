//! Departments and the roles defined inside them.

use shared::{
    CreateDepartmentRequest, CreateRoleRequest, Department, DepartmentRole, UpdateDepartmentRequest,
    UpdateRoleRequest,
};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

impl Record for Department {
    type Create = CreateDepartmentRequest;
    type Update = UpdateDepartmentRequest;

    const LABEL: &'static str = "Department";
    const PATH: &'static str = "departments";
    const ID_PREFIX: &'static str = "dept";
    const FILTERS: &'static [&'static str] = &["status"];
    const SORT_KEYS: &'static [&'static str] = &["name", "createdAt"];

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
        if let Some(head) = &self.head {
            fields.push(head);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "status" => Some(FieldValue::text(self.status.as_str())),
            "name" => Some(FieldValue::text(&self.name)),
            "head" => optional_text(&self.head),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateDepartmentRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.name, "Name");
        validation::max_length(&mut errors, &request.name, MAX_NAME_LENGTH, "Name");
        validation::max_length(&mut errors, &request.description, MAX_TEXT_LENGTH, "Description");
        errors
    }

    fn validate_update(request: &UpdateDepartmentRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.name, "Name");
        if let Some(description) = &request.description {
            validation::max_length(&mut errors, description, MAX_TEXT_LENGTH, "Description");
        }
        errors
    }

    fn from_create(request: CreateDepartmentRequest, id: String, timestamp: &str) -> Self {
        Department {
            id,
            name: request.name.trim().to_string(),
            description: request.description,
            head: request.head,
            status: request.status.unwrap_or_default(),
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateDepartmentRequest) {
        if let Some(name) = request.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if request.head.is_some() {
            self.head = request.head;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}

impl Record for DepartmentRole {
    type Create = CreateRoleRequest;
    type Update = UpdateRoleRequest;

    const LABEL: &'static str = "Role";
    const PATH: &'static str = "roles";
    const ID_PREFIX: &'static str = "role";
    const FILTERS: &'static [&'static str] = &["departmentId"];
    const SORT_KEYS: &'static [&'static str] = &["title", "createdAt"];

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
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "departmentId" => Some(FieldValue::text(&self.department_id)),
            "title" => Some(FieldValue::text(&self.title)),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateRoleRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.department_id, "Department");
        validation::require(&mut errors, &request.title, "Title");
        validation::max_length(&mut errors, &request.title, MAX_NAME_LENGTH, "Title");
        errors
    }

    fn validate_update(request: &UpdateRoleRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.department_id, "Department");
        validation::require_if_present(&mut errors, &request.title, "Title");
        errors
    }

    fn from_create(request: CreateRoleRequest, id: String, timestamp: &str) -> Self {
        DepartmentRole {
            id,
            department_id: request.department_id,
            title: request.title.trim().to_string(),
            description: request.description,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateRoleRequest) {
        if let Some(department_id) = request.department_id {
            self.department_id = department_id;
        }
        if let Some(title) = request.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            self.description = description;
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
    fn test_role_requires_department_and_title() {
        let errors = DepartmentRole::validate_create(&CreateRoleRequest::default());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_role_filters_by_department() {
        let role = DepartmentRole::from_create(
            CreateRoleRequest {
                department_id: "dept_1".to_string(),
                title: "Usher".to_string(),
                description: String::new(),
            },
            "role_1".to_string(),
            "2024-01-01T00:00:00.000Z",
        );
        assert!(role.field("departmentId").map_or(false, |value| value.matches("DEPT_1")));
    }
}
