//! Utility functions for identifier generation, URL validation and request handling.
//!
//! - [`code_generator`] - Short identifier generation
//! - [`url_validator`] - URL shape validation
//! - [`short_url`] - Short URL construction from the `Host` header

pub mod code_generator;
pub mod short_url;
pub mod url_validator;
