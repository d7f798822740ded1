//! # Dashboard Services
//!
//! Everything a page needs to talk to the server:
//!
//! - [`api::ApiClient`]: authenticated JSON/multipart requests
//! - [`session::SessionStore`]: persisted sign-in state
//! - [`http_repository::HttpRepository`]: the REST-backed repository
//!   behind each [`ResourceService`]
//! - [`reports::ReportClient`] and [`documents::DocumentClient`]: the
//!   endpoints that are not plain CRUD
//!
//! Statistics such as `group_stats` run on the dashboard side through the
//! services' `all()`, exactly as they do on the server.

pub mod api;
pub mod documents;
pub mod http_repository;
pub mod reports;
pub mod session;

use church_admin_core::domain::{
    AttendanceService, CommunicationService, DepartmentService, EventService, FinanceService,
    GivingService, GroupService, MemberService, ResourceService, RoleService, ServiceError,
    SundaySchoolService,
};
use shared::Document;

use crate::config::DashboardConfig;
use api::ApiClient;
use documents::DocumentClient;
use http_repository::HttpRepository;
use reports::ReportClient;
use session::SessionStore;

/// One network-backed service per resource
#[derive(Clone)]
pub struct DashboardServices {
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
    pub documents: ResourceService<Document>,
    pub files: DocumentClient,
    pub reports: ReportClient,
    pub session: SessionStore,
}

impl DashboardServices {
    pub fn connect(config: &DashboardConfig, session: SessionStore) -> Result<Self, ServiceError> {
        let api = ApiClient::new(config, session.clone())?;
        log::info!("Dashboard services pointed at {}", config.base_url);
        Ok(Self {
            members: HttpRepository::service(api.clone()),
            groups: HttpRepository::service(api.clone()),
            departments: HttpRepository::service(api.clone()),
            roles: HttpRepository::service(api.clone()),
            finance: HttpRepository::service(api.clone()),
            giving: HttpRepository::service(api.clone()),
            events: HttpRepository::service(api.clone()),
            announcements: HttpRepository::service(api.clone()),
            sunday_school: HttpRepository::service(api.clone()),
            attendance: HttpRepository::service(api.clone()),
            documents: HttpRepository::service(api.clone()),
            files: DocumentClient::new(api.clone()),
            reports: ReportClient::new(api),
            session,
        })
    }
}
