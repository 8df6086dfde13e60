//! Domain layer containing entities, collaborator contracts and event flow.
//!
//! # Architecture
//!
//! - [`entities`] - Mapping data structures
//! - [`repositories`] - Mapping store and event sink trait definitions
//! - [`analytics_event`] - Analytics record model
//! - [`event_queue`] - Non-blocking event hand-off
//! - [`event_worker`] - Background event delivery
//!
//! # Event Flow
//!
//! 1. The shortener or resolver finishes its store operation
//! 2. An [`analytics_event::AnalyticsEvent`] is queued via [`event_queue::EventDispatcher`]
//! 3. [`event_worker::run_event_worker`] delivers it with timeout and retry
//! 4. Delivery failures are logged and dropped

pub mod analytics_event;
pub mod entities;
pub mod event_queue;
pub mod event_worker;
pub mod repositories;
