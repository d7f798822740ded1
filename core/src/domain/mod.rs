//! # Domain Layer
//!
//! Business logic for the church administration back office.
//!
//! ## Layout
//!
//! - [`models`]: the [`Record`](models::Record) trait and its implementation
//!   for every resource
//! - [`resource_service`]: the generic CRUD service shared by all resources
//! - `*_service` modules: statistics, exports and workflow operations for a
//!   single resource, added as inherent methods on its `ResourceService`
//! - [`report_service`]: cross-resource overview and CSV reports
//! - [`error`]: the [`ServiceError`](error::ServiceError) taxonomy every
//!   operation returns
//!
//! Services depend on storage only through the
//! [`Repository`](crate::storage::Repository) trait.

pub mod aggregates;
pub mod attendance_service;
pub mod communication_service;
pub mod department_service;
pub mod document_service;
pub mod error;
pub mod event_service;
pub mod export;
pub mod finance_service;
pub mod giving_service;
pub mod group_service;
pub mod member_service;
pub mod models;
pub mod report_service;
pub mod resource_service;
pub mod sunday_school_service;
pub mod validation;

pub use attendance_service::AttendanceService;
pub use communication_service::CommunicationService;
pub use department_service::{DepartmentService, RoleService};
pub use document_service::{DocumentService, DocumentUpload};
pub use error::ServiceError;
pub use event_service::EventService;
pub use export::CsvExport;
pub use finance_service::FinanceService;
pub use giving_service::GivingService;
pub use group_service::GroupService;
pub use member_service::MemberService;
pub use models::{FieldValue, Record};
pub use report_service::ReportService;
pub use resource_service::ResourceService;
pub use sunday_school_service::SundaySchoolService;
