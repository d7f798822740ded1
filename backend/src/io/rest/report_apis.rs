//! # Report Endpoints
//!
//! Statistics for each area of the dashboard plus CSV exports. Date
//! windows come from the `from`/`to` query parameters and giving figures
//! may be narrowed with `currency`. Exports accept the usual list
//! parameters (search, filters, sort) as well.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use log::info;
use shared::{ReportKind, ReportQuery, SearchParams};

use super::envelope::{error_response, respond};
use crate::domain::ServiceError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(get_overview))
        .route("/members", get(get_member_stats))
        .route("/groups", get(get_group_stats))
        .route("/departments", get(get_department_stats))
        .route("/finance", get(get_finance_summary))
        .route("/giving", get(get_giving_report))
        .route("/attendance", get(get_attendance_stats))
        .route("/events", get(get_event_stats))
        .route("/announcements", get(get_announcement_stats))
        .route("/sunday-school", get(get_sunday_school_stats))
        .route("/export/:kind", get(export_report))
}

/// Split query pairs into the report window and the remaining list params
fn split_query(pairs: Vec<(String, String)>) -> (ReportQuery, SearchParams) {
    let mut window = ReportQuery::default();
    let mut rest = Vec::new();
    for (key, value) in pairs {
        let value = Some(value).filter(|value| !value.trim().is_empty());
        match key.as_str() {
            "from" => window.from = value,
            "to" => window.to = value,
            "currency" => window.currency = value,
            _ => {
                if let Some(value) = value {
                    rest.push((key, value));
                }
            }
        }
    }
    (window, SearchParams::from_pairs(rest))
}

pub async fn get_overview(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    info!("GET /api/reports/overview");
    let (window, _) = split_query(pairs);
    respond(
        state.reports.dashboard_overview(Utc::now(), window.currency).await,
        StatusCode::OK,
    )
}

pub async fn get_member_stats(State(state): State<AppState>) -> Response {
    info!("GET /api/reports/members");
    respond(
        state.members.member_stats(Utc::now().date_naive()).await,
        StatusCode::OK,
    )
}

pub async fn get_group_stats(State(state): State<AppState>) -> Response {
    info!("GET /api/reports/groups");
    respond(state.groups.group_stats().await, StatusCode::OK)
}

pub async fn get_department_stats(State(state): State<AppState>) -> Response {
    info!("GET /api/reports/departments");
    respond(
        state.departments.department_stats(&state.roles).await,
        StatusCode::OK,
    )
}

pub async fn get_finance_summary(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let (window, _) = split_query(pairs);
    info!("GET /api/reports/finance - window: {:?}", window);
    respond(state.finance.finance_summary(&window).await, StatusCode::OK)
}

pub async fn get_giving_report(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let (window, _) = split_query(pairs);
    info!("GET /api/reports/giving - window: {:?}", window);
    respond(state.giving.giving_report(&window).await, StatusCode::OK)
}

pub async fn get_attendance_stats(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let (window, _) = split_query(pairs);
    info!("GET /api/reports/attendance - window: {:?}", window);
    respond(
        state.attendance.attendance_stats(&window).await,
        StatusCode::OK,
    )
}

pub async fn get_event_stats(State(state): State<AppState>) -> Response {
    info!("GET /api/reports/events");
    respond(state.events.event_stats(Utc::now()).await, StatusCode::OK)
}

pub async fn get_announcement_stats(State(state): State<AppState>) -> Response {
    info!("GET /api/reports/announcements");
    respond(
        state.announcements.announcement_stats().await,
        StatusCode::OK,
    )
}

pub async fn get_sunday_school_stats(State(state): State<AppState>) -> Response {
    info!("GET /api/reports/sunday-school");
    respond(
        state.sunday_school.sunday_school_stats().await,
        StatusCode::OK,
    )
}

pub async fn export_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    info!("GET /api/reports/export/{}", kind);
    let Some(kind) = ReportKind::parse(&kind) else {
        return error_response(ServiceError::validation(format!(
            "Unknown report type: {}",
            kind
        )));
    };

    let (window, params) = split_query(pairs);
    match state.reports.export_report(kind, &window, &params).await {
        Ok(export) => {
            info!("📤 Exported {} rows to {}", export.row_count, export.file_name);
            let disposition = format!("attachment; filename=\"{}\"", export.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.content,
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query_separates_window_from_list_params() {
        let (window, params) = split_query(vec![
            ("from".to_string(), "2024-01-01".to_string()),
            ("to".to_string(), String::new()),
            ("currency".to_string(), "GHS".to_string()),
            ("search".to_string(), "lydia".to_string()),
            ("category".to_string(), "Tithe".to_string()),
        ]);

        assert_eq!(window.from.as_deref(), Some("2024-01-01"));
        assert_eq!(window.to, None);
        assert_eq!(window.currency.as_deref(), Some("GHS"));
        assert_eq!(params.search_term(), Some("lydia"));
        assert_eq!(params.filters.get("category").map(String::as_str), Some("Tithe"));
    }
}
