//! # REST API Interface Layer
//!
//! HTTP endpoints for the church administration dashboard. This layer
//! translates between HTTP and the domain services:
//!
//! - request parsing (query strings into `SearchParams`, JSON bodies,
//!   multipart uploads)
//! - response envelopes and error translation to status codes
//! - optional bearer-token authentication
//!
//! ## Status codes
//!
//! | result | status |
//! |---|---|
//! | success | 200, or 201 for creates and uploads |
//! | validation failure | 400 |
//! | missing or wrong token | 401 |
//! | unknown id | 404 |
//! | upload over the size limit | 413 |
//! | storage failure | 500 |
//!
//! No business logic lives here.

pub mod auth;
pub mod communication_apis;
pub mod department_apis;
pub mod document_apis;
pub mod envelope;
pub mod health_apis;
pub mod report_apis;
pub mod resource_apis;
