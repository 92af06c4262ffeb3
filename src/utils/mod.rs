//! Utility functions for alias generation, URL validation and error handling.
//!
//! - [`alias_generator`] - Random alias generation and custom alias validation
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Database error classification

pub mod alias_generator;
pub mod db_error;
pub mod url_validator;
