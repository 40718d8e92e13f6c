//! Event system for user and team actions.
//!
//! Every mutating action dispatches a [`TeamEvent`]. If no listeners are
//! registered, dispatch is a no-op.
//!
//! ```rust,ignore
//! use teamgate::events::{register_event_listeners, listeners::LoggingListener};
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```
//!
//! Implement [`Listener`] for custom handling:
//!
//! ```rust,ignore
//! use teamgate::events::{Listener, TeamEvent};
//! use async_trait::async_trait;
//!
//! struct AuditListener;
//!
//! #[async_trait]
//! impl Listener for AuditListener {
//!     async fn handle(&self, event: &TeamEvent) {
//!         if let TeamEvent::MemberRemoved { team_id, user_id, .. } = event {
//!             // record removal
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::TeamEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
