use async_trait::async_trait;

use super::TeamEvent;

/// Handles dispatched events.
///
/// Called for every event; match on the variant to filter.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &TeamEvent);
}
