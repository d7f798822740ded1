use shared::{CreateDonationRequest, Donation, UpdateDonationRequest};

use super::{optional_text, FieldValue, Record};
use crate::domain::validation::{self, MAX_NAME_LENGTH};

pub const DEFAULT_CURRENCY: &str = "USD";

fn currency_code(errors: &mut Vec<String>, code: &str) {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        errors.push("Currency must be a three-letter code".to_string());
    }
}

impl Record for Donation {
    type Create = CreateDonationRequest;
    type Update = UpdateDonationRequest;

    const LABEL: &'static str = "Donation";
    const PATH: &'static str = "giving/donations";
    const ID_PREFIX: &'static str = "donation";
    const FILTERS: &'static [&'static str] = &["category", "paymentMethod", "currency", "memberId"];
    const SORT_KEYS: &'static [&'static str] = &["date", "amount", "donorName", "createdAt"];

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
        let mut fields = vec![self.donor_name.as_str(), self.category.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes);
        }
        fields
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::text(&self.category)),
            "paymentMethod" => Some(FieldValue::text(self.payment_method.as_str())),
            "currency" => Some(FieldValue::text(&self.currency)),
            "memberId" => optional_text(&self.member_id),
            "date" => Some(FieldValue::text(&self.date)),
            "amount" => Some(FieldValue::Number(self.amount)),
            "donorName" => Some(FieldValue::text(&self.donor_name)),
            "createdAt" => Some(FieldValue::text(&self.created_at)),
            _ => None,
        }
    }

    fn validate_create(request: &CreateDonationRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require(&mut errors, &request.donor_name, "Donor name");
        validation::max_length(&mut errors, &request.donor_name, MAX_NAME_LENGTH, "Donor name");
        validation::positive_amount(&mut errors, request.amount, "Amount");
        validation::require(&mut errors, &request.category, "Category");
        validation::date(&mut errors, &request.date, "Date");
        if let Some(currency) = &request.currency {
            currency_code(&mut errors, currency);
        }
        errors
    }

    fn validate_update(request: &UpdateDonationRequest) -> Vec<String> {
        let mut errors = Vec::new();
        validation::require_if_present(&mut errors, &request.donor_name, "Donor name");
        validation::optional_positive_amount(&mut errors, request.amount, "Amount");
        validation::require_if_present(&mut errors, &request.category, "Category");
        validation::optional_date(&mut errors, &request.date, "Date");
        if let Some(currency) = &request.currency {
            currency_code(&mut errors, currency);
        }
        errors
    }

    fn from_create(request: CreateDonationRequest, id: String, timestamp: &str) -> Self {
        Donation {
            id,
            donor_name: request.donor_name.trim().to_string(),
            member_id: request.member_id,
            amount: request.amount,
            currency: request
                .currency
                .map(|code| code.trim().to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            category: request.category.trim().to_string(),
            payment_method: request.payment_method.unwrap_or_default(),
            date: validation::normalized_date(request.date),
            notes: request.notes,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    fn apply_update(&mut self, request: UpdateDonationRequest) {
        if let Some(donor_name) = request.donor_name {
            self.donor_name = donor_name.trim().to_string();
        }
        if request.member_id.is_some() {
            self.member_id = request.member_id;
        }
        if let Some(amount) = request.amount {
            self.amount = amount;
        }
        if let Some(currency) = request.currency {
            self.currency = currency.trim().to_uppercase();
        }
        if let Some(category) = request.category {
            self.category = category.trim().to_string();
        }
        if let Some(payment_method) = request.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(date) = request.date {
            self.date = validation::normalized_date(date);
        }
        if request.notes.is_some() {
            self.notes = request.notes;
        }
    }

    fn touch(&mut self, timestamp: String) {
        self.updated_at = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PaymentMethod;

    fn request() -> CreateDonationRequest {
        CreateDonationRequest {
            donor_name: "Lydia".to_string(),
            amount: 120.0,
            category: "Tithe".to_string(),
            date: "2024-04-07".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_currency_and_payment_method() {
        let donation = Donation::from_create(request(), "donation_1".to_string(), "2024-04-07T10:00:00.000Z");
        assert_eq!(donation.currency, "USD");
        assert_eq!(donation.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_rejects_malformed_currency() {
        let mut invalid = request();
        invalid.currency = Some("dollars".to_string());
        assert_eq!(
            Donation::validate_create(&invalid),
            vec!["Currency must be a three-letter code".to_string()]
        );
    }
}
