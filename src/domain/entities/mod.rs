//! Core domain entities.
//!
//! - [`Mapping`] - A stored `short_id -> original_url` pair
//! - [`ShortenedLink`] - What a successful create request returns

pub mod mapping;

pub use mapping::{MAX_SHORT_ID_LENGTH, Mapping, ShortenedLink, is_lookup_candidate};
