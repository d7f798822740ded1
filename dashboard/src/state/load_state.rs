//! Tagged request state for pages and forms.
//!
//! A page is in exactly one of these states at a time, so "loading with an
//! error" or "loaded but still spinning" cannot be represented.

use church_admin_core::domain::ServiceError;
use shared::ListResponse;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(ServiceError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            LoadState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ServiceError>> for LoadState<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(data) => LoadState::Loaded(data),
            Err(error) => LoadState::Failed(error),
        }
    }
}

impl<T> LoadState<ListResponse<T>> {
    /// Loaded, and nothing matched
    pub fn is_empty_result(&self) -> bool {
        self.data().map_or(false, |list| list.total == 0)
    }

    /// Loaded with at least one row on the current page
    pub fn has_rows(&self) -> bool {
        self.data().map_or(false, |list| !list.data.is_empty())
    }
}

/// Progress of a create or edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormState<T> {
    #[default]
    Idle,
    Submitting,
    Succeeded(T),
    Failed(ServiceError),
}

impl<T> FormState<T> {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    /// Field messages to show next to the form
    pub fn field_errors(&self) -> Vec<String> {
        match self {
            FormState::Failed(error) => error.field_errors(),
            _ => Vec::new(),
        }
    }
}

impl<T> From<Result<T, ServiceError>> for FormState<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => FormState::Succeeded(value),
            Err(error) => FormState::Failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_populated_lists_are_distinguished() {
        let empty: LoadState<ListResponse<u32>> = LoadState::Loaded(ListResponse::new(vec![], 0, 1, 10));
        assert!(empty.is_empty_result());
        assert!(!empty.has_rows());

        let rows = LoadState::Loaded(ListResponse::new(vec![1, 2], 2, 1, 10));
        assert!(!rows.is_empty_result());
        assert!(rows.has_rows());

        let loading: LoadState<ListResponse<u32>> = LoadState::Loading;
        assert!(!loading.is_empty_result());
        assert!(loading.is_loading());
    }

    #[test]
    fn test_form_state_exposes_validation_messages() {
        let state: FormState<()> =
            Err(ServiceError::Validation(vec!["Name is required".to_string()])).into();
        assert_eq!(state.field_errors(), vec!["Name is required".to_string()]);

        let state: FormState<u8> = Ok(7).into();
        assert_eq!(state, FormState::Succeeded(7));
        assert!(state.field_errors().is_empty());
    }
}
