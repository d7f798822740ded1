//! Member statistics and the member directory export.

use chrono::NaiveDate;
use log::info;
use shared::{Member, MemberStats, MemberStatus, SearchParams};

use super::aggregates::tally;
use super::error::ServiceError;
use super::export::{optional_cell, text_cell, write_csv, CsvExport};
use super::resource_service::ResourceService;
use crate::storage::query;

pub type MemberService = ResourceService<Member>;

pub const UNASSIGNED: &str = "unassigned";
pub const UNSPECIFIED: &str = "unspecified";

const EXPORT_HEADER: [&str; 8] = [
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Gender",
    "Status",
    "Department",
    "Join Date",
];

impl ResourceService<Member> {
    pub async fn member_stats(&self, today: NaiveDate) -> Result<MemberStats, ServiceError> {
        let members = self.all().await?;
        let this_month = today.format("%Y-%m").to_string();

        let count = |status: MemberStatus| members.iter().filter(|m| m.status == status).count();

        let stats = MemberStats {
            total: members.len(),
            active: count(MemberStatus::Active),
            inactive: count(MemberStatus::Inactive),
            visitors: count(MemberStatus::Visitor),
            transferred: count(MemberStatus::Transferred),
            new_this_month: members
                .iter()
                .filter(|m| m.join_date.starts_with(&this_month))
                .count(),
            by_gender: tally(members.iter().map(|m| {
                m.gender
                    .map(|gender| gender.as_str().to_string())
                    .unwrap_or_else(|| UNSPECIFIED.to_string())
            })),
            by_department: tally(
                members
                    .iter()
                    .map(|m| m.department_id.clone().unwrap_or_else(|| UNASSIGNED.to_string())),
            ),
        };

        info!("Computed member stats over {} members", stats.total);
        Ok(stats)
    }

    /// Members matching `params` as CSV, by last name unless another sort is asked for
    pub async fn export_csv(&self, params: &SearchParams) -> Result<CsvExport, ServiceError> {
        let mut members = query::matching(self.all().await?, params);
        if params.sort_by.is_none() {
            members.sort_by(|a, b| {
                a.last_name
                    .to_lowercase()
                    .cmp(&b.last_name.to_lowercase())
                    .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
            });
        }

        let rows = members.iter().map(|m| {
            vec![
                text_cell(&m.first_name),
                text_cell(&m.last_name),
                text_cell(&m.email),
                optional_cell(&m.phone),
                m.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
                m.status.as_str().to_string(),
                optional_cell(&m.department_id),
                m.join_date.clone(),
            ]
        });

        let export = write_csv("members-report.csv", &EXPORT_HEADER, rows)?;
        info!("✅ EXPORT: {} members exported", export.row_count);
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use shared::{CreateMemberRequest, Gender};
    use std::sync::Arc;
    use std::time::Duration;

    fn draft(first: &str, last: &str, join_date: &str) -> CreateMemberRequest {
        CreateMemberRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@church.org", first.to_lowercase()),
            join_date: Some(join_date.to_string()),
            ..Default::default()
        }
    }

    async fn service() -> MemberService {
        let service = MemberService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        let mut ada = draft("Ada", "Lovelace", "2024-05-02");
        ada.gender = Some(Gender::Female);
        ada.department_id = Some("dept_music".to_string());
        service.create(ada).await.unwrap();

        let mut ben = draft("Ben", "Carson", "2023-01-15");
        ben.status = Some(MemberStatus::Visitor);
        service.create(ben).await.unwrap();

        let mut cal = draft("Cal", "Adams", "2024-05-20");
        cal.gender = Some(Gender::Male);
        cal.status = Some(MemberStatus::Inactive);
        service.create(cal).await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_member_stats() {
        let service = service().await;
        let today = NaiveDate::from_ymd_opt(2024, 5, 28).unwrap();
        let stats = service.member_stats(today).await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.visitors, 1);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.new_this_month, 2);
        assert_eq!(stats.by_gender.get("female"), Some(&1));
        assert_eq!(stats.by_gender.get(UNSPECIFIED), Some(&1));
        assert_eq!(stats.by_department.get(UNASSIGNED), Some(&2));
    }

    #[tokio::test]
    async fn test_export_sorted_by_last_name() {
        let service = service().await;
        let export = service.export_csv(&SearchParams::new()).await.unwrap();
        let lines: Vec<&str> = export.content.lines().collect();

        assert_eq!(lines[0], "First Name,Last Name,Email,Phone,Gender,Status,Department,Join Date");
        assert!(lines[1].starts_with("Cal,Adams"));
        assert!(lines[2].starts_with("Ben,Carson"));
        assert!(lines[3].starts_with("Ada,Lovelace"));
        assert_eq!(export.row_count, 3);
    }

    #[tokio::test]
    async fn test_export_respects_filters() {
        let service = service().await;
        let export = service
            .export_csv(&SearchParams::new().with_filter("status", "visitor"))
            .await
            .unwrap();
        assert_eq!(export.row_count, 1);
        assert!(export.content.contains("Ben,Carson"));
    }
}
