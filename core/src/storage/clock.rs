//! Id and timestamp source for stored records.
//!
//! Ids are `<prefix>_<epoch millis>`. Two records created within the same
//! millisecond would collide, so the clock never hands out the same
//! millisecond twice: each tick is at least one past the previous one.
//! Timestamps are derived from the same tick, which also makes every
//! `updatedAt` strictly later than the stamp it replaces.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Mutex;

/// One tick of the clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub millis: i64,
    /// RFC 3339, UTC, millisecond precision
    pub timestamp: String,
}

impl Stamp {
    pub fn id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.millis)
    }
}

#[derive(Debug, Default)]
pub struct RecordClock {
    last_millis: Mutex<i64>,
}

impl RecordClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose first tick is no earlier than `millis`
    pub fn starting_at(millis: i64) -> Self {
        Self {
            last_millis: Mutex::new(millis - 1),
        }
    }

    pub fn tick(&self) -> Stamp {
        let now = Utc::now().timestamp_millis();
        let millis = {
            let mut last = self
                .last_millis
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let next = now.max(*last + 1);
            *last = next;
            next
        };

        Stamp {
            millis,
            timestamp: format_millis(millis),
        }
    }
}

pub fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
