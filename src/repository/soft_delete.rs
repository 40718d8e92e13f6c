use chrono::{DateTime, Utc};

/// A record that is retired by stamping `deleted_at` rather than being removed.
///
/// Default queries only ever return active rows.
pub trait SoftDelete {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_active(&self) -> bool {
        self.deleted_at().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Option<DateTime<Utc>>);

    impl SoftDelete for Row {
        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.0
        }
    }

    #[test]
    fn test_is_active() {
        assert!(Row(None).is_active());
        assert!(!Row(Some(Utc::now())).is_active());
    }
}
