//! Allocation service implementation.
//!
//! ## Structure
//!
//! - [`handler`] - HTTP entry point (`BarcodeService`) and router.
//! - [`auth`] - client credential and content-type checks.
//! - [`pipeline`] - body parsing and ordered field validation.
//! - [`responder`] - response encoding and exchange logging.

pub mod auth;
pub mod handler;
pub mod pipeline;
pub mod responder;
