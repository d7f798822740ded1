//! List query engine for in-memory data.
//!
//! Applies [`SearchParams`] to a snapshot of records:
//!
//! 1. free-text `search`: case-insensitive substring over the record's
//!    search fields
//! 2. equality filters: case-insensitive; an empty value or `all` means
//!    "no filter", and keys the record does not declare are ignored
//! 3. stable sort when `sortBy` names a declared sort key; records without
//!    a value for the key go last in either direction
//! 4. page slicing with `page` defaulting to 1 and `limit` to 10 (max 100)

use log::debug;
use shared::{ListResponse, SearchParams, SortOrder};
use std::cmp::Ordering;

use crate::domain::models::Record;

/// Filter value meaning "any"
pub const ANY_VALUE: &str = "all";

/// Search, filter and sort, without paging
pub fn matching<T: Record>(records: Vec<T>, params: &SearchParams) -> Vec<T> {
    let term = params.search_term().map(str::to_lowercase);
    let filters = active_filters::<T>(params);

    let mut matched: Vec<T> = records
        .into_iter()
        .filter(|record| match &term {
            Some(term) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(term.as_str())),
            None => true,
        })
        .filter(|record| {
            filters.iter().all(|(key, expected)| {
                record
                    .field(key)
                    .map_or(false, |value| value.matches(expected))
            })
        })
        .collect();

    if let Some(sort_by) = params.sort_by.as_deref() {
        if T::SORT_KEYS.contains(&sort_by) {
            let order = params.sort_order.unwrap_or_default();
            matched.sort_by(|a, b| compare_by(a, b, sort_by, order));
        } else {
            debug!("Ignoring unknown sort key '{}' for {}", sort_by, T::LABEL);
        }
    }

    matched
}

/// Slice one page out of an already matched list
pub fn paginate<T>(records: Vec<T>, params: &SearchParams) -> ListResponse<T> {
    let page = params.page_or_default();
    let limit = params.limit_or_default();
    let total = records.len();
    let start = (page as usize - 1).saturating_mul(limit as usize);

    let data = records
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    ListResponse::new(data, total, page, limit)
}

pub fn run<T: Record>(records: Vec<T>, params: &SearchParams) -> ListResponse<T> {
    paginate(matching(records, params), params)
}

fn active_filters<'p, T: Record>(params: &'p SearchParams) -> Vec<(&'p str, &'p str)> {
    params
        .filters
        .iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            if value.is_empty() || value.eq_ignore_ascii_case(ANY_VALUE) {
                return None;
            }
            if !T::FILTERS.contains(&key.as_str()) {
                debug!("Ignoring unknown filter '{}' for {}", key, T::LABEL);
                return None;
            }
            Some((key.as_str(), value))
        })
        .collect()
}

fn compare_by<T: Record>(a: &T, b: &T, key: &str, order: SortOrder) -> Ordering {
    match (a.sort_value(key), b.sort_value(key)) {
        (Some(left), Some(right)) => {
            let ordering = left.compare(&right);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
