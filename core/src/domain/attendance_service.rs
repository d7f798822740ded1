//! Attendance statistics and the attendance CSV export.

use log::info;
use shared::{AttendanceRecord, AttendanceStats, AttendanceStatus, ReportQuery, SearchParams};
use std::collections::BTreeMap;

use super::aggregates::{month_key, percentage, tally};
use super::error::ServiceError;
use super::export::{optional_cell, text_cell, write_csv, CsvExport};
use super::resource_service::ResourceService;
use crate::storage::query;

pub type AttendanceService = ResourceService<AttendanceRecord>;

pub const EXPORT_HEADER: [&str; 5] = ["Date", "Service Type", "Status", "Check-in Time", "Notes"];

impl ResourceService<AttendanceRecord> {
    pub async fn attendance_stats(&self, query: &ReportQuery) -> Result<AttendanceStats, ServiceError> {
        let records: Vec<AttendanceRecord> = self
            .all()
            .await?
            .into_iter()
            .filter(|record| query.contains(&record.date))
            .collect();

        let count = |status: AttendanceStatus| records.iter().filter(|r| r.status == status).count();
        let attended = records.iter().filter(|r| r.status.attended()).count();

        let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
        for record in records.iter().filter(|r| r.status.attended()) {
            let month = month_key(&record.date).unwrap_or_else(|| record.date.clone());
            *by_month.entry(month).or_insert(0) += 1;
        }

        Ok(AttendanceStats {
            total_records: records.len(),
            present: count(AttendanceStatus::Present),
            absent: count(AttendanceStatus::Absent),
            late: count(AttendanceStatus::Late),
            excused: count(AttendanceStatus::Excused),
            attendance_rate: percentage(attended as f64, records.len() as f64),
            by_service_type: tally(records.iter().map(|r| r.service_type.clone())),
            by_month,
        })
    }

    /// Records matching `params` inside `window`, in date order
    pub async fn export_csv(
        &self,
        params: &SearchParams,
        window: &ReportQuery,
    ) -> Result<CsvExport, ServiceError> {
        let mut records: Vec<AttendanceRecord> = query::matching(self.all().await?, params)
            .into_iter()
            .filter(|record| window.contains(&record.date))
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));

        let rows = records.iter().map(|record| {
            vec![
                record.date.clone(),
                text_cell(&record.service_type),
                record.status.as_str().to_string(),
                optional_cell(&record.check_in_time),
                optional_cell(&record.notes),
            ]
        });

        let export = write_csv("attendance-report.csv", &EXPORT_HEADER, rows)?;
        info!("✅ EXPORT: {} attendance records exported", export.row_count);
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use shared::{CreateAttendanceRequest, UpdateAttendanceRequest};
    use std::sync::Arc;
    use std::time::Duration;

    fn mark(date: &str, status: AttendanceStatus, notes: Option<&str>) -> CreateAttendanceRequest {
        CreateAttendanceRequest {
            member_id: Some("member_1".to_string()),
            member_name: "Samuel".to_string(),
            date: date.to_string(),
            service_type: "Sunday Service".to_string(),
            status: Some(status),
            check_in_time: Some("09:05".to_string()),
            notes: notes.map(str::to_string),
        }
    }

    async fn service() -> AttendanceService {
        let service = AttendanceService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        for draft in [
            mark("2024-03-17", AttendanceStatus::Late, Some("Car trouble, arrived at 9:40")),
            mark("2024-03-03", AttendanceStatus::Present, None),
            mark("2024-03-10", AttendanceStatus::Absent, Some("=HYPERLINK(\"x\")")),
            mark("2024-04-07", AttendanceStatus::Excused, None),
        ] {
            service.create(draft).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_attendance_rate_counts_late_as_attended() {
        let stats = service().await.attendance_stats(&ReportQuery::default()).await.unwrap();
        assert_eq!(stats.total_records, 4);
        assert_eq!(stats.present, 1);
        assert_eq!(stats.late, 1);
        assert_eq!(stats.attendance_rate, 50.0);
        assert_eq!(stats.by_month.get("2024-03"), Some(&2));
        assert_eq!(stats.by_month.get("2024-04"), None);
        assert_eq!(stats.by_service_type.get("Sunday Service"), Some(&4));
    }

    #[tokio::test]
    async fn test_export_quotes_and_orders_rows() {
        let export = service()
            .await
            .export_csv(&SearchParams::new(), &ReportQuery::default())
            .await
            .unwrap();

        let expected = "Date,Service Type,Status,Check-in Time,Notes\n\
                        2024-03-03,Sunday Service,present,09:05,\n\
                        2024-03-10,Sunday Service,absent,09:05,\"'=HYPERLINK(\"\"x\"\")\"\n\
                        2024-03-17,Sunday Service,late,09:05,\"Car trouble, arrived at 9:40\"\n\
                        2024-04-07,Sunday Service,excused,09:05,\n";
        assert_eq!(export.content, expected);
        assert_eq!(export.file_name, "attendance-report.csv");
    }

    #[tokio::test]
    async fn test_export_window_and_filters() {
        let window = ReportQuery {
            from: Some("2024-03-05".to_string()),
            to: Some("2024-03-31".to_string()),
            currency: None,
        };
        let export = service()
            .await
            .export_csv(&SearchParams::new().with_filter("status", "late"), &window)
            .await
            .unwrap();
        assert_eq!(export.row_count, 1);
    }

    #[tokio::test]
    async fn test_padded_dates_stay_inside_their_window() {
        let service = AttendanceService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        let record = service
            .create(mark(" 2024-03-10", AttendanceStatus::Present, None))
            .await
            .unwrap();
        assert_eq!(record.date, "2024-03-10");

        let march = ReportQuery {
            from: Some("2024-03-01".to_string()),
            to: Some("2024-03-31".to_string()),
            currency: None,
        };
        let stats = service.attendance_stats(&march).await.unwrap();
        assert_eq!(stats.total_records, 1);
        assert_eq!(stats.by_month.get("2024-03"), Some(&1));

        let moved = service
            .update(
                &record.id,
                UpdateAttendanceRequest {
                    date: Some("2024-03-17 ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.date, "2024-03-17");
        assert_eq!(service.attendance_stats(&march).await.unwrap().total_records, 1);
    }

    #[tokio::test]
    async fn test_empty_export_has_header() {
        let service = AttendanceService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        let export = service
            .export_csv(&SearchParams::new(), &ReportQuery::default())
            .await
            .unwrap();
        assert_eq!(export.content, "Date,Service Type,Status,Check-in Time,Notes\n");
    }
}
