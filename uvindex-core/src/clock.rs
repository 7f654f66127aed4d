use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Source of "now", injected so selection can be tested against a pinned instant.
pub trait DateProvider: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDateProvider(pub DateTime<Utc>);

impl DateProvider for FixedDateProvider {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
