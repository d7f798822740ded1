//! # I/O Layer
//!
//! External interfaces of the backend. Currently only the REST API in
//! [`rest`].

pub mod rest;
