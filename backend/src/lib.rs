//! # Church Admin Backend
//!
//! REST server for the church administration dashboard.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, this crate)
//!     ↓
//! Domain Layer (church_admin_core::domain)
//!     ↓
//! Storage Layer (church_admin_core::storage)
//! ```
//!
//! [`AppState`] wires one service per resource; [`create_router`] exposes
//! them under `/api` with CORS, request tracing and optional bearer-token
//! authentication.

pub mod config;
pub mod io;

pub use church_admin_core::{domain, storage};

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use log::info;
use shared::{
    AttendanceRecord, DepartmentRole, Donation, Event, FinanceRecord, Group, Member,
    SundaySchoolClass,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use domain::{
    AttendanceService, CommunicationService, DepartmentService, DocumentService, EventService,
    FinanceService, GivingService, GroupService, MemberService, Record, ReportService,
    ResourceService, RoleService, SundaySchoolService,
};
use io::rest::{
    auth, communication_apis, department_apis, document_apis, health_apis, report_apis,
    resource_apis,
};
use storage::RecordClock;

/// One service per resource, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub members: MemberService,
    pub groups: GroupService,
    pub departments: DepartmentService,
    pub roles: RoleService,
    pub finance: FinanceService,
    pub giving: GivingService,
    pub events: EventService,
    pub announcements: CommunicationService,
    pub sunday_school: SundaySchoolService,
    pub attendance: AttendanceService,
    pub documents: DocumentService,
    pub reports: ReportService,
}

impl AppState {
    /// Services over fresh in-memory repositories sharing one id clock
    pub fn in_memory(config: &ServerConfig) -> Self {
        let clock = Arc::new(RecordClock::new());
        let latency = config.simulated_latency();
        info!(
            "Setting up in-memory repositories (simulated latency {:?})",
            latency
        );

        let members = ResourceService::in_memory(clock.clone(), latency);
        let giving = ResourceService::in_memory(clock.clone(), latency);
        let attendance = ResourceService::in_memory(clock.clone(), latency);
        let events = ResourceService::in_memory(clock.clone(), latency);
        let announcements = ResourceService::in_memory(clock.clone(), latency);
        let reports = ReportService::new(
            members.clone(),
            giving.clone(),
            attendance.clone(),
            events.clone(),
            announcements.clone(),
        );

        Self {
            members,
            groups: ResourceService::in_memory(clock.clone(), latency),
            departments: ResourceService::in_memory(clock.clone(), latency),
            roles: ResourceService::in_memory(clock.clone(), latency),
            finance: ResourceService::in_memory(clock.clone(), latency),
            giving,
            events,
            announcements,
            sunday_school: ResourceService::in_memory(clock.clone(), latency),
            attendance,
            documents: DocumentService::new(
                ResourceService::in_memory(clock, latency),
                config.max_upload_bytes,
            ),
            reports,
        }
    }
}

fn resource_path<T: Record>() -> String {
    format!("/{}", T::PATH)
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let mut api_routes = Router::new()
        .nest(
            &resource_path::<Member>(),
            resource_apis::router(app_state.members.clone()),
        )
        .nest(
            &resource_path::<Group>(),
            resource_apis::router(app_state.groups.clone()),
        )
        .nest("/departments", department_apis::router(&app_state))
        .nest(
            &resource_path::<DepartmentRole>(),
            resource_apis::router(app_state.roles.clone()),
        )
        .nest(
            &resource_path::<FinanceRecord>(),
            resource_apis::router(app_state.finance.clone()),
        )
        .nest(
            &resource_path::<Donation>(),
            resource_apis::router(app_state.giving.clone()),
        )
        .nest(
            &resource_path::<Event>(),
            resource_apis::router(app_state.events.clone()),
        )
        .nest(
            "/communications/announcements",
            communication_apis::router(app_state.announcements.clone()),
        )
        .nest(
            &resource_path::<SundaySchoolClass>(),
            resource_apis::router(app_state.sunday_school.clone()),
        )
        .nest(
            &resource_path::<AttendanceRecord>(),
            resource_apis::router(app_state.attendance.clone()),
        )
        .nest(
            "/documents",
            document_apis::router(app_state.documents.clone()),
        )
        .nest(
            "/uploads",
            document_apis::upload_router(app_state.documents.clone()),
        )
        .nest("/reports", report_apis::router());

    match &config.api_token {
        Some(token) => {
            info!("🔒 Bearer-token authentication enabled");
            api_routes = api_routes.route_layer(from_fn_with_state(
                auth::ApiToken::new(token),
                auth::require_bearer_token,
            ));
        }
        None => info!("Bearer-token authentication disabled"),
    }

    // Added after the auth layer so it stays public
    let api_routes = api_routes.route("/health", get(health_apis::health));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = &config.cors_origin {
        router = router.layer(cors_layer(origin)?);
    }

    Ok(router.with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            cors_origin: None,
            ..ServerConfig::default()
        }
    }

    fn app(config: &ServerConfig) -> Router {
        create_router(AppState::in_memory(config), config).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn create(app: &Router, uri: &str, body: Value) -> Value {
        let response = send(app, json_request("POST", uri, body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }

    #[tokio::test]
    async fn test_member_crud_over_http() {
        let app = app(&test_config());

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/members",
                json!({"firstName": "Ada", "lastName": "Lovelace", "email": "ADA@church.org"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Member created successfully");
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("member_"));
        assert_eq!(body["data"]["email"], "ada@church.org");

        let response = send(
            &app,
            json_request("PATCH", &format!("/api/members/{}", id), json!({"phone": "555-0100"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["phone"], "555-0100");
        assert_eq!(body["data"]["firstName"], "Ada");

        let response = send(&app, get(&format!("/api/members/{}", id))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/members/{}", id))
            .body(Body::empty())
            .unwrap();
        let response = send(&app, delete).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Member deleted successfully");
        assert!(body.get("data").is_none());

        let response = send(&app, get(&format!("/api/members/{}", id))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Member not found");
    }

    #[tokio::test]
    async fn test_validation_failures_are_bad_requests() {
        let app = app(&test_config());

        let response = send(
            &app,
            json_request("POST", "/api/members", json!({"firstName": "", "lastName": "Doe", "email": "nope"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.iter().any(|e| e == "First name is required"));
        assert!(errors.len() >= 2);

        let response = send(&app, json_request("POST", "/api/groups", json!({"name": 7}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);

        let list = send(&app, get("/api/members")).await;
        assert_eq!(body_json(list).await["data"]["total"], 0);
    }

    #[tokio::test]
    async fn test_group_search_filter_and_delete() {
        let app = app(&test_config());
        let mut choir_id = String::new();
        for (name, category) in [
            ("Youth Ministry", "Youth"),
            ("Choir", "Music"),
            ("Prayer Warriors", "Prayer"),
        ] {
            let group = create(&app, "/api/groups", json!({"name": name, "category": category})).await;
            if name == "Choir" {
                choir_id = group["id"].as_str().unwrap().to_string();
            }
        }

        let body = body_json(send(&app, get("/api/groups?search=choir")).await).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["data"][0]["name"], "Choir");

        let body = body_json(send(&app, get("/api/groups?category=Prayer")).await).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["data"][0]["name"], "Prayer Warriors");

        let body = body_json(send(&app, get("/api/groups?sortBy=name&sortOrder=desc&limit=2")).await).await;
        assert_eq!(body["data"]["data"][0]["name"], "Youth Ministry");
        assert_eq!(body["data"]["totalPages"], 2);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/groups/{}", choir_id))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, delete).await.status(), StatusCode::OK);

        let body = body_json(send(&app, get("/api/groups")).await).await;
        assert_eq!(body["data"]["total"], 2);
    }

    #[tokio::test]
    async fn test_announcement_publish_and_department_roles() {
        let app = app(&test_config());

        let announcement = create(
            &app,
            "/api/communications/announcements",
            json!({"title": "Picnic", "content": "Bring a dish", "author": "Office"}),
        )
        .await;
        let id = announcement["id"].as_str().unwrap();
        let response = send(
            &app,
            json_request("POST", &format!("/api/communications/announcements/{}/publish", id), json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["status"], "published");
        assert!(body["data"]["publishDate"].is_string());

        let department = create(&app, "/api/departments", json!({"name": "Ushering"})).await;
        let department_id = department["id"].as_str().unwrap();
        create(
            &app,
            "/api/roles",
            json!({"departmentId": department_id, "title": "Head Usher"}),
        )
        .await;

        let body = body_json(send(&app, get(&format!("/api/departments/{}/roles", department_id))).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["title"], "Head Usher");

        let response = send(&app, get("/api/departments/dept_0/roles")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reports_and_csv_export() {
        let app = app(&test_config());
        create(
            &app,
            "/api/members",
            json!({"firstName": "Ada", "lastName": "Lovelace", "email": "ada@church.org"}),
        )
        .await;

        let body = body_json(send(&app, get("/api/reports/overview")).await).await;
        assert_eq!(body["data"]["totalMembers"], 1);

        for report in [
            "members",
            "groups",
            "departments",
            "finance",
            "giving",
            "attendance",
            "events",
            "announcements",
            "sunday-school",
        ] {
            let response = send(&app, get(&format!("/api/reports/{}", report))).await;
            assert_eq!(response.status(), StatusCode::OK, "report {}", report);
        }

        let response = send(&app, get("/api/reports/export/members")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv"));
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("members-report.csv"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Lovelace"));

        let response = send(&app, get("/api/reports/export/sermons")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn multipart_request(file: &str) -> Request<Body> {
        let body = format!(
            "--XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"minutes.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {}\r\n\
             --XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"category\"\r\n\r\n\
             Minutes\r\n\
             --XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"uploadedBy\"\r\n\r\n\
             Secretary\r\n\
             --XBOUNDARY--\r\n",
            file
        );
        Request::builder()
            .method("POST")
            .uri("/api/uploads")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_and_download_document() {
        let config = ServerConfig {
            max_upload_bytes: 32,
            ..test_config()
        };
        let app = app(&config);

        let response = send(&app, multipart_request("Council met on Tuesday")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["title"], "minutes.txt");
        assert_eq!(body["data"]["category"], "Minutes");
        assert_eq!(body["data"]["uploadedBy"], "Secretary");
        assert_eq!(body["data"]["sizeBytes"], 22);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let response = send(&app, get(&format!("/api/documents/{}/content", id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Council met on Tuesday");

        let response = send(&app, multipart_request(&"x".repeat(33))).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/documents/{}", id))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, delete).await.status(), StatusCode::OK);
        let response = send(&app, get(&format!("/api/documents/{}/content", id))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_documents_are_only_created_by_upload() {
        let app = app(&test_config());

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/documents",
                json!({"title": "Minutes", "fileName": "minutes.txt", "category": "Minutes"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("/api/uploads"));

        let response = send(&app, get("/api/documents")).await;
        assert_eq!(body_json(response).await["data"]["total"], 0);
    }

    #[tokio::test]
    async fn test_bearer_token_guards_everything_but_health() {
        let config = ServerConfig {
            api_token: Some("s3cret".to_string()),
            ..test_config()
        };
        let app = app(&config);

        let response = send(&app, get("/api/members")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["success"], false);

        let authorized = Request::builder()
            .uri("/api/members")
            .header(header::AUTHORIZATION, "Bearer s3cret")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, authorized).await.status(), StatusCode::OK);

        let response = send(&app, get("/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["status"], "ok");
    }

    #[test]
    fn test_invalid_cors_origin_is_reported() {
        let config = ServerConfig {
            cors_origin: Some("bad\norigin".to_string()),
            ..ServerConfig::default()
        };
        let Err(error) = create_router(AppState::in_memory(&config), &config) else {
            panic!("expected the origin to be rejected");
        };
        assert!(error.to_string().contains("Invalid CORS origin"));
    }
}
