//! HTTP handlers.
//!
//! Each module owns the handlers for one group of routes; the router in
//! `lib.rs` wires them together.

pub mod auth_service;
pub mod health_service;
pub mod receipt_service;
