use async_trait::async_trait;

use crate::events::{Listener, TeamEvent};

/// Logs every event through the `log` facade.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Logs at INFO.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &TeamEvent) {
        match event.team_id() {
            Some(team_id) => log::log!(
                target: "teamgate::events",
                self.level,
                "msg=\"event\", event={}, team_id={team_id}, at={}, detail={event:?}",
                event.name(),
                event.timestamp()
            ),
            None => log::log!(
                target: "teamgate::events",
                self.level,
                "msg=\"event\", event={}, at={}, detail={event:?}",
                event.name(),
                event.timestamp()
            ),
        }
    }
}
