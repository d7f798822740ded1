//! Announcement publishing workflow and statistics.
//!
//! An announcement starts as a draft, is published (which stamps its
//! publish date) and is finally archived. Publishing an announcement that
//! is already published keeps its original publish date.

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use shared::{Announcement, AnnouncementStats, AnnouncementStatus, UpdateAnnouncementRequest};

use super::aggregates::tally;
use super::error::ServiceError;
use super::resource_service::ResourceService;

pub type CommunicationService = ResourceService<Announcement>;

impl ResourceService<Announcement> {
    /// Mark an announcement published. The stored record decides whether
    /// `now` becomes its publish date, so concurrent publishes agree on one.
    pub async fn publish(&self, id: &str, now: DateTime<Utc>) -> Result<Announcement, ServiceError> {
        let announcement = self.get(id).await?;
        if announcement.status == AnnouncementStatus::Published {
            return Ok(announcement);
        }

        let published = self
            .update(
                id,
                UpdateAnnouncementRequest {
                    status: Some(AnnouncementStatus::Published),
                    publish_date: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
                    ..Default::default()
                },
            )
            .await?;
        info!("📢 Published announcement '{}'", published.title);
        Ok(published)
    }

    pub async fn archive(&self, id: &str) -> Result<Announcement, ServiceError> {
        let archived = self
            .update(
                id,
                UpdateAnnouncementRequest {
                    status: Some(AnnouncementStatus::Archived),
                    ..Default::default()
                },
            )
            .await?;
        info!("Archived announcement '{}'", archived.title);
        Ok(archived)
    }

    pub async fn announcement_stats(&self) -> Result<AnnouncementStats, ServiceError> {
        let announcements = self.all().await?;
        Ok(AnnouncementStats {
            total: announcements.len(),
            by_status: tally(announcements.iter().map(|a| a.status.as_str().to_string())),
            by_priority: tally(announcements.iter().map(|a| a.priority.as_str().to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use chrono::TimeZone;
    use shared::{CreateAnnouncementRequest, Priority};
    use std::sync::Arc;
    use std::time::Duration;

    async fn service_with_draft() -> (CommunicationService, Announcement) {
        let service = CommunicationService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        let draft = service
            .create(CreateAnnouncementRequest {
                title: "Baptism class".to_string(),
                content: "Sign up at the welcome desk".to_string(),
                author: "Pastor John".to_string(),
                priority: Some(Priority::High),
                ..Default::default()
            })
            .await
            .unwrap();
        (service, draft)
    }

    #[tokio::test]
    async fn test_publish_stamps_date_once() {
        let (service, draft) = service_with_draft().await;
        let first = Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap();

        let published = service.publish(&draft.id, first).await.unwrap();
        assert_eq!(published.status, AnnouncementStatus::Published);
        assert_eq!(published.publish_date.as_deref(), Some("2024-04-01T08:30:00.000Z"));

        let later = Utc.with_ymd_and_hms(2024, 4, 2, 8, 30, 0).unwrap();
        let again = service.publish(&draft.id, later).await.unwrap();
        assert_eq!(again.publish_date, published.publish_date);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_publishes_agree_on_the_date() {
        let service =
            CommunicationService::in_memory(Arc::new(RecordClock::new()), Duration::from_millis(50));
        let draft = service
            .create(CreateAnnouncementRequest {
                title: "Harvest Sunday".to_string(),
                content: "Bring produce for the food bank".to_string(),
                author: "Office".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let monday = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap();
        let tuesday = Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap();
        let (first, second) = tokio::join!(
            service.publish(&draft.id, monday),
            service.publish(&draft.id, tuesday)
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.publish_date, second.publish_date);
        let stored = service.get(&draft.id).await.unwrap();
        assert_eq!(stored.publish_date, first.publish_date);
    }

    #[tokio::test]
    async fn test_archive_and_stats() {
        let (service, draft) = service_with_draft().await;
        service.archive(&draft.id).await.unwrap();

        let stats = service.announcement_stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.by_status.get("archived"), Some(&1));
        assert_eq!(stats.by_priority.get("high"), Some(&1));
    }

    #[tokio::test]
    async fn test_publish_unknown_is_not_found() {
        let (service, _) = service_with_draft().await;
        let error = service.publish("announcement_0", Utc::now()).await.unwrap_err();
        assert_eq!(error.to_string(), "Announcement not found");
    }
}
