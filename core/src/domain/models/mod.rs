//! # Domain Records
//!
//! Every resource the dashboard manages (members, groups, donations, ...) is a
//! plain record from the `shared` crate. The [`Record`] trait describes how the
//! generic machinery treats one of them:
//!
//! - how it is identified and timestamped
//! - which fields free-text search looks at
//! - which fields may be filtered or sorted on, and their values
//! - how a create request becomes a record and how an update request is
//!   shallow-merged into one
//!
//! One module per resource implements the trait.

use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::Debug;

pub mod announcement;
pub mod attendance;
pub mod department;
pub mod document;
pub mod event;
pub mod finance;
pub mod giving;
pub mod group;
pub mod member;
pub mod sunday_school;

/// Value of a filterable or sortable field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    /// Case-insensitive equality against a filter value
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().to_lowercase() == expected.trim().to_lowercase(),
            FieldValue::Number(number) => expected
                .trim()
                .parse::<f64>()
                .map(|parsed| (parsed - number).abs() < f64::EPSILON)
                .unwrap_or(false),
        }
    }

    /// Ordering used by `sortBy`; text compares case-insensitively
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Optional text field helper: absent values yield no field value
pub(crate) fn optional_text(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(FieldValue::text)
}

/// A resource managed through the generic repository and service.
pub trait Record: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Payload accepted by `create`
    type Create: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static;
    /// Partial payload accepted by `update`; absent fields are left untouched
    type Update: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Human-readable name used in messages ("Member not found")
    const LABEL: &'static str;
    /// Path of the resource below `/api`
    const PATH: &'static str;
    /// Prefix of synthesized ids (`<prefix>_<epoch millis>`)
    const ID_PREFIX: &'static str;
    /// Fields accepted as equality filters
    const FILTERS: &'static [&'static str];
    /// Fields accepted by `sortBy`
    const SORT_KEYS: &'static [&'static str];

    fn id(&self) -> &str;
    fn created_at(&self) -> &str;
    fn updated_at(&self) -> &str;

    /// Fields searched by free-text `search`
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a filter or sort field; `None` when the record has no value
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Value used when sorting by `name`; same as [`Record::field`] unless a
    /// record orders a field differently from how it filters on it
    fn sort_value(&self, name: &str) -> Option<FieldValue<'_>> {
        self.field(name)
    }

    fn validate_create(request: &Self::Create) -> Vec<String>;
    fn validate_update(request: &Self::Update) -> Vec<String>;

    /// Build a record from a validated create request
    fn from_create(request: Self::Create, id: String, timestamp: &str) -> Self;

    /// Shallow-merge the fields present in `request`
    fn apply_update(&mut self, request: Self::Update);

    /// Set `updated_at`
    fn touch(&mut self, timestamp: String);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_matching_ignores_case_and_padding() {
        assert!(FieldValue::text("Prayer").matches("prayer"));
        assert!(FieldValue::text("Prayer").matches(" PRAYER "));
        assert!(!FieldValue::text("Prayer Warriors").matches("prayer"));
    }

    #[test]
    fn test_number_matching() {
        assert!(FieldValue::Number(12.0).matches("12"));
        assert!(!FieldValue::Number(12.0).matches("twelve"));
    }

    #[test]
    fn test_compare_text_case_insensitively() {
        assert_eq!(
            FieldValue::text("choir").compare(&FieldValue::text("Youth")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Number(3.0).compare(&FieldValue::Number(1.5)),
            Ordering::Greater
        );
    }
}
