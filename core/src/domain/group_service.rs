use shared::{ActivityStatus, Group, GroupStats};

use super::aggregates::tally;
use super::error::ServiceError;
use super::resource_service::ResourceService;

pub type GroupService = ResourceService<Group>;

impl ResourceService<Group> {
    pub async fn group_stats(&self) -> Result<GroupStats, ServiceError> {
        let groups = self.all().await?;
        Ok(GroupStats {
            total: groups.len(),
            active: groups
                .iter()
                .filter(|g| g.status == ActivityStatus::Active)
                .count(),
            total_members: groups.iter().map(|g| g.member_count as u64).sum(),
            by_category: tally(groups.iter().map(|g| g.category.clone())),
        })
    }
}
