//! Short identifier generation.
//!
//! Identifiers are drawn from 128 bits of OS entropy, encoded as URL-safe
//! base64 without padding and truncated to a fixed length. They are not derived
//! from the URL, so shortening the same URL twice yields two identifiers.

use crate::error::AppError;
use base64::Engine as _;

/// Number of random bytes drawn per identifier (128 bits).
const RANDOM_BYTES: usize = 16;

/// Default identifier length.
pub const DEFAULT_SHORT_ID_LENGTH: usize = 8;

/// Shortest identifier the generator may be configured to produce.
pub const MIN_SHORT_ID_LENGTH: usize = 6;

/// Longest identifier the generator may be configured to produce.
pub const MAX_SHORT_ID_LENGTH: usize = 12;

/// Identifiers that would shadow fixed routes.
pub const RESERVED_IDS: &[&str] = &["shorten", "health"];

/// Source of candidate short identifiers.
///
/// Implementations only produce candidates; uniqueness is enforced by the
/// mapping store's create-if-absent write.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Produces a new candidate identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no entropy is available.
    fn generate(&self) -> Result<String, AppError>;
}

/// Random identifier generator backed by the OS entropy source.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    /// Creates a generator for identifiers of `length` characters.
    ///
    /// The length is clamped to
    /// [`MIN_SHORT_ID_LENGTH`]..=[`MAX_SHORT_ID_LENGTH`].
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_SHORT_ID_LENGTH, MAX_SHORT_ID_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SHORT_ID_LENGTH)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Result<String, AppError> {
        loop {
            let mut buffer = [0u8; RANDOM_BYTES];
            getrandom::fill(&mut buffer)
                .map_err(|e| AppError::internal(format!("entropy source failed: {}", e)))?;

            let mut id = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
            id.truncate(self.length);

            if !RESERVED_IDS.contains(&id.as_str()) {
                return Ok(id);
            }
        }
    }
}
