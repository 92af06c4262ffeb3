//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a single entry point for validation and alias assignment.
//!
//! - [`services::link_service::LinkService`] - Short link assignment, lookup and deletion

pub mod services;
