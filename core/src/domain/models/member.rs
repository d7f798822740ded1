//! Member records.

use shared::{CreateMemberRequest, Member, UpdateMemberRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH};

impl Record for Member {
    type Create = CreateMemberRequest;
    type Update = UpdateMemberRequest;

    const LABEL: &'static str = "Member";
    const PATH: &'static str = "members";
    const ID_PREFIX: &'static str = "member";
    const FILTERS: &'static [&'static str] = &["status", "gender", "departmentId"];
    const SORT_KEYS: &'static [&'static str] = &["firstName", "lastName", "joinDate", "createdAt"];

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
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "status" => Some(FieldValue::text(self.status.as_str())),
            "gender" => self.gender.map(|gender| FieldValue::text(gender.as_str())),
            "departmentId" => optional_text(&self.department_id),
            "firstName" => Some(FieldValue::text(&self.first_name)),
            "lastName" => Some(FieldValue::text(&self.last_name)),
            "joinDate" => Some(FieldValue::text(&self.join_date)),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateMemberRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.first_name, "First name");
        validation::max_length(&mut errors, &request.first_name, MAX_NAME_LENGTH, "First name");
        validation::require(&mut errors, &request.last_name, "Last name");
        validation::max_length(&mut errors, &request.last_name, MAX_NAME_LENGTH, "Last name");
        validation::email(&mut errors, &request.email, "Email");
        validation::optional_date(&mut errors, &request.date_of_birth, "Date of birth");
        validation::optional_date(&mut errors, &request.join_date, "Join date");
        errors
    }

    fn validate_update(request: &UpdateMemberRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.first_name, "First name");
        validation::require_if_present(&mut errors, &request.last_name, "Last name");
        if let Some(email) = &request.email {
            validation::email(&mut errors, email, "Email");
        }
        validation::optional_date(&mut errors, &request.date_of_birth, "Date of birth");
        validation::optional_date(&mut errors, &request.join_date, "Join date");
        errors
    }

    fn from_create(request: CreateMemberRequest, id: String, timestamp: &str) -> Self {
        // Members who do not give a join date joined on the day they were entered
        let join_date = request
            .join_date
            .map(validation::normalized_date)
            .unwrap_or_else(|| timestamp.get(..10).unwrap_or(timestamp).to_string());

        Member {
            id,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone,
            gender: request.gender,
            date_of_birth: validation::normalized_optional_date(request.date_of_birth),
            address: request.address,
            status: request.status.unwrap_or_default(),
            department_id: request.department_id,
            join_date,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateMemberRequest) {
        if let Some(first_name) = request.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = request.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = request.email {
            self.email = email.trim().to_lowercase();
        }
        if request.phone.is_some() {
            self.phone = request.phone;
        }
        if request.gender.is_some() {
            self.gender = request.gender;
        }
        if request.date_of_birth.is_some() {
            self.date_of_birth = validation::normalized_optional_date(request.date_of_birth);
        }
        if request.address.is_some() {
            self.address = request.address;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
        if request.department_id.is_some() {
            self.department_id = request.department_id;
        }
        if let Some(join_date) = request.join_date {
            self.join_date = validation::normalized_date(join_date);
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
