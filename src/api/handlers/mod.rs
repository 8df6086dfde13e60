//! HTTP request handlers.

pub mod health;
pub mod preflight;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use preflight::preflight_handler;
pub use redirect::{missing_short_id_handler, redirect_handler};
pub use shorten::shorten_handler;
