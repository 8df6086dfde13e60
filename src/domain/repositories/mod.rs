//! Contracts for the external collaborators of the service.
//!
//! - [`MappingStore`] - persistence of `short_id -> original_url` mappings
//! - [`EventSink`] - best-effort delivery of analytics records
//!
//! Concrete implementations live in `crate::infrastructure`. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod event_sink;
pub mod mapping_store;

pub use event_sink::{EventSink, SinkError};
pub use mapping_store::{MappingStore, PutOutcome, StoreError};

#[cfg(test)]
pub use event_sink::MockEventSink;
#[cfg(test)]
pub use mapping_store::MockMappingStore;
