use shared::{AttendanceRecord, CreateAttendanceRequest, UpdateAttendanceRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH};

impl Record for AttendanceRecord {
    type Create = CreateAttendanceRequest;
    type Update = UpdateAttendanceRequest;

    const LABEL: &'static str = "Attendance record";
    const PATH: &'static str = "attendance";
    const ID_PREFIX: &'static str = "attendance";
    const FILTERS: &'static [&'static str] = &["status", "serviceType", "memberId", "date"];
    const SORT_KEYS: &'static [&'static str] = &["date", "memberName", "createdAt"];

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
        let mut fields = vec![self.member_name.as_str(), self.service_type.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "status" => Some(FieldValue::text(self.status.as_str())),
            "serviceType" => Some(FieldValue::text(&self.service_type)),
            "memberId" => optional_text(&self.member_id),
            "date" => Some(FieldValue::text(&self.date)),
            "memberName" => Some(FieldValue::text(&self.member_name)),
            "checkInTime" => optional_text(&self.check_in_time),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateAttendanceRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.member_name, "Member name");
        validation::max_length(&mut errors, &request.member_name, MAX_NAME_LENGTH, "Member name");
        validation::date(&mut errors, &request.date, "Date");
        validation::require(&mut errors, &request.service_type, "Service type");
        validation::time_of_day(&mut errors, &request.check_in_time, "Check-in time");
        errors
    }

    fn validate_update(request: &UpdateAttendanceRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.member_name, "Member name");
        validation::optional_date(&mut errors, &request.date, "Date");
        validation::require_if_present(&mut errors, &request.service_type, "Service type");
        validation::time_of_day(&mut errors, &request.check_in_time, "Check-in time");
        errors
    }

    fn from_create(request: CreateAttendanceRequest, id: String, timestamp: &str) -> Self {
        AttendanceRecord {
            id,
            member_id: request.member_id,
            member_name: request.member_name.trim().to_string(),
            date: validation::normalized_date(request.date),
            service_type: request.service_type.trim().to_string(),
            status: request.status.unwrap_or_default(),
            check_in_time: request.check_in_time,
            notes: request.notes,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateAttendanceRequest) {
        if request.member_id.is_some() {
            self.member_id = request.member_id;
        }
        if let Some(member_name) = request.member_name {
            self.member_name = member_name.trim().to_string();
        }
        if let Some(date) = request.date {
            self.date = validation::normalized_date(date);
        }
        if let Some(service_type) = request.service_type {
            self.service_type = service_type.trim().to_string();
        }
        if let Some(status) = request.status {
            self.status = status;
        }
        if request.check_in_time.is_some() {
            self.check_in_time = request.check_in_time;
        }
        if request.notes.is_some() {
            self.notes = request.notes;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
