//! Departments and their roles.
//!
//! Roles are their own resource linked to a department by id. Nothing
//! cascades: deleting a department leaves its roles in place.

use log::info;
use shared::{ActivityStatus, Department, DepartmentRole, DepartmentStats, SearchParams};

use super::error::ServiceError;
use super::resource_service::ResourceService;
use crate::storage::query;

pub type DepartmentService = ResourceService<Department>;
pub type RoleService = ResourceService<DepartmentRole>;

impl ResourceService<DepartmentRole> {
    /// Every role whose `departmentId` is `department_id`, by title
    pub async fn for_department(&self, department_id: &str) -> Result<Vec<DepartmentRole>, ServiceError> {
        let params = SearchParams::new()
            .with_filter("departmentId", department_id)
            .sorted_by("title", shared::SortOrder::Asc);
        Ok(query::matching(self.all().await?, &params))
    }
}

impl ResourceService<Department> {
    /// Roles of an existing department; an unknown department is not found
    pub async fn roles_for_department(
        &self,
        department_id: &str,
        roles: &RoleService,
    ) -> Result<Vec<DepartmentRole>, ServiceError> {
        let department = self.get(department_id).await?;
        let roles = roles.for_department(&department.id).await?;
        info!("{} has {} roles", department.name, roles.len());
        Ok(roles)
    }

    pub async fn department_stats(&self, roles: &RoleService) -> Result<DepartmentStats, ServiceError> {
        let departments = self.all().await?;
        let roles = roles.all().await?;

        let roles_by_department = departments
            .iter()
            .map(|department| {
                let count = roles
                    .iter()
                    .filter(|role| role.department_id == department.id)
                    .count();
                (department.name.clone(), count)
            })
            .collect();

        Ok(DepartmentStats {
            total: departments.len(),
            active: departments
                .iter()
                .filter(|d| d.status == ActivityStatus::Active)
                .count(),
            roles_by_department,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use shared::{CreateDepartmentRequest, CreateRoleRequest};
    use std::sync::Arc;
    use std::time::Duration;

    async fn setup() -> (DepartmentService, RoleService, Department) {
        let clock = Arc::new(RecordClock::new());
        let departments = DepartmentService::in_memory(clock.clone(), Duration::ZERO);
        let roles = RoleService::in_memory(clock, Duration::ZERO);

        let music = departments
            .create(CreateDepartmentRequest {
                name: "Music".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        departments
            .create(CreateDepartmentRequest {
                name: "Hospitality".to_string(),
                status: Some(ActivityStatus::Inactive),
                ..Default::default()
            })
            .await
            .unwrap();

        for title in ["Worship Leader", "Bassist"] {
            roles
                .create(CreateRoleRequest {
                    department_id: music.id.clone(),
                    title: title.to_string(),
                    description: String::new(),
                })
                .await
                .unwrap();
        }
        (departments, roles, music)
    }

    #[tokio::test]
    async fn test_roles_for_department_sorted_by_title() {
        let (departments, roles, music) = setup().await;
        let found = departments.roles_for_department(&music.id, &roles).await.unwrap();
        let titles: Vec<&str> = found.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Bassist", "Worship Leader"]);
    }

    #[tokio::test]
    async fn test_roles_for_unknown_department_is_not_found() {
        let (departments, roles, _) = setup().await;
        let error = departments
            .roles_for_department("dept_missing", &roles)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Department not found");
    }

    #[tokio::test]
    async fn test_department_stats() {
        let (departments, roles, _) = setup().await;
        let stats = departments.department_stats(&roles).await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.roles_by_department.get("Music"), Some(&2));
        assert_eq!(stats.roles_by_department.get("Hospitality"), Some(&0));
    }
}
