use chrono::{DateTime, Utc};
use shared::{Event, EventStats, EventStatus};

use super::aggregates::tally;
use super::error::ServiceError;
use super::resource_service::ResourceService;
use super::validation::parse_date_time;

pub type EventService = ResourceService<Event>;

/// How many upcoming events the stats include
pub const UPCOMING_IN_STATS: usize = 5;

impl ResourceService<Event> {
    /// Events still marked upcoming that start at or after `now`, soonest first
    pub async fn upcoming_events(&self, now: DateTime<Utc>, limit: usize) -> Result<Vec<Event>, ServiceError> {
        let mut upcoming: Vec<(DateTime<Utc>, Event)> = self
            .all()
            .await?
            .into_iter()
            .filter(|event| event.status == EventStatus::Upcoming)
            .filter_map(|event| parse_date_time(&event.start_date).map(|start| (start, event)))
            .filter(|(start, _)| *start >= now)
            .collect();

        upcoming.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(upcoming.into_iter().take(limit).map(|(_, event)| event).collect())
    }

    pub async fn event_stats(&self, now: DateTime<Utc>) -> Result<EventStats, ServiceError> {
        let events = self.all().await?;
        Ok(EventStats {
            total: events.len(),
            by_status: tally(events.iter().map(|e| e.status.as_str().to_string())),
            by_category: tally(events.iter().map(|e| e.category.clone())),
            upcoming: self.upcoming_events(now, UPCOMING_IN_STATS).await?,
        })
    }
}
