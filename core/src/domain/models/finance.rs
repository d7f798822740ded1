use shared::{CreateFinanceRecordRequest, FinanceRecord, UpdateFinanceRecordRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_TEXT_LENGTH};

impl Record for FinanceRecord {
    type Create = CreateFinanceRecordRequest;
    type Update = UpdateFinanceRecordRequest;

    const LABEL: &'static str = "Finance record";
    const PATH: &'static str = "finance/records";
    const ID_PREFIX: &'static str = "txn";
    const FILTERS: &'static [&'static str] = &["kind", "category"];
    const SORT_KEYS: &'static [&'static str] = &["date", "amount", "category", "createdAt"];

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
        let mut fields = vec![self.description.as_str(), self.category.as_str()];
        if let Some(reference) = &self.reference {
            fields.push(reference);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "kind" => Some(FieldValue::text(self.kind.as_str())),
            "category" => Some(FieldValue::text(&self.category)),
            "date" => Some(FieldValue::text(&self.date)),
            "amount" => Some(FieldValue::Number(self.amount)),
            "reference" => optional_text(&self.reference),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateFinanceRecordRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.category, "Category");
        validation::positive_amount(&mut errors, request.amount, "Amount");
        validation::date(&mut errors, &request.date, "Date");
        validation::max_length(&mut errors, &request.description, MAX_TEXT_LENGTH, "Description");
        errors
    }

    fn validate_update(request: &UpdateFinanceRecordRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.category, "Category");
        validation::optional_positive_amount(&mut errors, request.amount, "Amount");
        validation::optional_date(&mut errors, &request.date, "Date");
        errors
    }

    fn from_create(request: CreateFinanceRecordRequest, id: String, timestamp: &str) -> Self {
        FinanceRecord {
            id,
            kind: request.kind,
            category: request.category.trim().to_string(),
            amount: request.amount,
            description: request.description,
            date: validation::normalized_date(request.date),
            reference: request.reference,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateFinanceRecordRequest) {
        if let Some(kind) = request.kind {
            self.kind = kind;
        }
        if let Some(category) = request.category {
            self.category = category.trim().to_string();
        }
        if let Some(amount) = request.amount {
            self.amount = amount;
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if let Some(date) = request.date {
            self.date = validation::normalized_date(date);
        }
        if request.reference.is_some() {
            self.reference = request.reference;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}
