//! # Report Service
//!
//! Cross-resource reporting: the dashboard landing-page overview and the
//! downloadable CSV reports. Every figure is computed from the services'
//! `all()` data, so the numbers are the same whichever repository backs
//! them.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use log::info;
use shared::{
    AnnouncementStatus, DashboardOverview, MemberStatus, ReportKind, ReportQuery, SearchParams,
};

use super::aggregates::round2;
use super::attendance_service::AttendanceService;
use super::communication_service::CommunicationService;
use super::error::ServiceError;
use super::event_service::EventService;
use super::export::CsvExport;
use super::giving_service::GivingService;
use super::member_service::MemberService;

#[derive(Clone)]
pub struct ReportService {
    members: MemberService,
    giving: GivingService,
    attendance: AttendanceService,
    events: EventService,
    announcements: CommunicationService,
}

/// First and last day of the month containing `now`
fn month_window(now: DateTime<Utc>, currency: Option<String>) -> ReportQuery {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    ReportQuery {
        from: Some(first.format("%Y-%m-%d").to_string()),
        // Day 31 sorts after every real day of the month
        to: Some(first.format("%Y-%m-31").to_string()),
        currency,
    }
}

impl ReportService {
    pub fn new(
        members: MemberService,
        giving: GivingService,
        attendance: AttendanceService,
        events: EventService,
        announcements: CommunicationService,
    ) -> Self {
        Self {
            members,
            giving,
            attendance,
            events,
            announcements,
        }
    }

    /// Headline numbers; giving and attendance cover the current month
    pub async fn dashboard_overview(
        &self,
        now: DateTime<Utc>,
        currency: Option<String>,
    ) -> Result<DashboardOverview, ServiceError> {
        let this_month = month_window(now, currency);

        let members = self.members.all().await?;
        let giving = self.giving.giving_report(&this_month).await?;
        let attendance = self.attendance.attendance_stats(&this_month).await?;
        let upcoming = self.events.upcoming_events(now, usize::MAX).await?;
        let published = self
            .announcements
            .all()
            .await?
            .iter()
            .filter(|a| a.status == AnnouncementStatus::Published)
            .count();

        let overview = DashboardOverview {
            total_members: members.len(),
            active_members: members
                .iter()
                .filter(|m| m.status == MemberStatus::Active)
                .count(),
            giving_this_month: round2(giving.total_amount),
            giving_currency: giving.currency,
            attendance_rate: attendance.attendance_rate,
            upcoming_events: upcoming.len(),
            published_announcements: published,
            generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        info!("📊 Dashboard overview generated: {:?}", overview);
        Ok(overview)
    }

    pub async fn export_report(
        &self,
        kind: ReportKind,
        window: &ReportQuery,
        params: &SearchParams,
    ) -> Result<CsvExport, ServiceError> {
        info!("Exporting {} report", kind.as_str());
        match kind {
            ReportKind::Members => self.members.export_csv(params).await,
            ReportKind::Giving => self.giving.export_csv(params, window).await,
            ReportKind::Attendance => self.attendance.export_csv(params, window).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use chrono::TimeZone;
    use shared::{
        AttendanceStatus, CreateAnnouncementRequest, CreateAttendanceRequest,
        CreateDonationRequest, CreateEventRequest, CreateMemberRequest,
    };
    use std::sync::Arc;
    use std::time::Duration;

    async fn reports() -> ReportService {
        let clock = Arc::new(RecordClock::new());
        let members = MemberService::in_memory(clock.clone(), Duration::ZERO);
        let giving = GivingService::in_memory(clock.clone(), Duration::ZERO);
        let attendance = AttendanceService::in_memory(clock.clone(), Duration::ZERO);
        let events = EventService::in_memory(clock.clone(), Duration::ZERO);
        let announcements = CommunicationService::in_memory(clock, Duration::ZERO);

        for (first, status) in [("Ada", MemberStatus::Active), ("Ben", MemberStatus::Visitor)] {
            members
                .create(CreateMemberRequest {
                    first_name: first.to_string(),
                    last_name: "Doe".to_string(),
                    email: format!("{}@church.org", first.to_lowercase()),
                    status: Some(status),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        for (amount, date, currency) in [
            (100.0, "2024-05-05", "USD"),
            (50.5, "2024-05-12", "USD"),
            (40.0, "2024-05-12", "EUR"),
            (999.0, "2024-04-28", "USD"),
        ] {
            giving
                .create(CreateDonationRequest {
                    donor_name: "Lydia".to_string(),
                    amount,
                    currency: Some(currency.to_string()),
                    category: "Tithe".to_string(),
                    date: date.to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        for status in [AttendanceStatus::Present, AttendanceStatus::Absent] {
            attendance
                .create(CreateAttendanceRequest {
                    member_name: "Ada Doe".to_string(),
                    date: "2024-05-05".to_string(),
                    service_type: "Sunday Service".to_string(),
                    status: Some(status),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        events
            .create(CreateEventRequest {
                title: "Pentecost Picnic".to_string(),
                category: "Fellowship".to_string(),
                start_date: "2024-05-19".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let draft = announcements
            .create(CreateAnnouncementRequest {
                title: "Picnic".to_string(),
                content: "Bring a dish".to_string(),
                author: "Office".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        announcements.publish(&draft.id, now).await.unwrap();

        ReportService::new(members, giving, attendance, events, announcements)
    }

    #[tokio::test]
    async fn test_dashboard_overview() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let overview = reports().await.dashboard_overview(now, None).await.unwrap();

        assert_eq!(overview.total_members, 2);
        assert_eq!(overview.active_members, 1);
        assert_eq!(overview.giving_this_month, 150.5);
        assert_eq!(overview.giving_currency.as_deref(), Some("USD"));
        assert_eq!(overview.attendance_rate, 50.0);
        assert_eq!(overview.upcoming_events, 1);
        assert_eq!(overview.published_announcements, 1);
        assert_eq!(overview.generated_at, "2024-05-15T12:00:00.000Z");
    }

    #[tokio::test]
    async fn test_export_report_dispatches_by_kind() {
        let reports = reports().await;
        let export = reports
            .export_report(ReportKind::Giving, &ReportQuery::default(), &SearchParams::new())
            .await
            .unwrap();
        assert_eq!(export.file_name, "giving-report.csv");
        assert_eq!(export.row_count, 4);

        let export = reports
            .export_report(ReportKind::Members, &ReportQuery::default(), &SearchParams::new())
            .await
            .unwrap();
        assert_eq!(export.row_count, 2);
    }

    #[tokio::test]
    async fn test_overview_giving_in_selected_currency() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let overview = reports()
            .await
            .dashboard_overview(now, Some("eur".to_string()))
            .await
            .unwrap();
        assert_eq!(overview.giving_this_month, 40.0);
        assert_eq!(overview.giving_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_month_window() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
        let window = month_window(now, None);
        assert!(window.contains("2024-02-29"));
        assert!(!window.contains("2024-03-01"));
        assert!(!window.contains("2024-01-31"));
    }
}
