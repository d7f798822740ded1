use shared::{ActivityStatus, SundaySchoolClass, SundaySchoolStats};
use std::collections::BTreeMap;

use super::aggregates::percentage;
use super::error::ServiceError;
use super::resource_service::ResourceService;

pub type SundaySchoolService = ResourceService<SundaySchoolClass>;

impl ResourceService<SundaySchoolClass> {
    pub async fn sunday_school_stats(&self) -> Result<SundaySchoolStats, ServiceError> {
        let classes = self.all().await?;

        let total_enrolled: u64 = classes.iter().map(|c| c.enrolled as u64).sum();
        let total_capacity: u64 = classes.iter().map(|c| c.capacity as u64).sum();

        let mut enrolled_by_age_group: BTreeMap<String, u64> = BTreeMap::new();
        for class in &classes {
            *enrolled_by_age_group.entry(class.age_group.clone()).or_insert(0) += class.enrolled as u64;
        }

        Ok(SundaySchoolStats {
            classes: classes.len(),
            active_classes: classes
                .iter()
                .filter(|c| c.status == ActivityStatus::Active)
                .count(),
            total_enrolled,
            total_capacity,
            utilization_rate: percentage(total_enrolled as f64, total_capacity as f64),
            enrolled_by_age_group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordClock;
    use shared::CreateClassRequest;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_utilization() {
        let service = SundaySchoolService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        for (name, age_group, capacity, enrolled) in [
            ("Little Lambs", "Toddlers", 12, 9),
            ("Juniors A", "Juniors", 20, 15),
            ("Juniors B", "Juniors", 20, 5),
        ] {
            service
                .create(CreateClassRequest {
                    name: name.to_string(),
                    teacher: "Volunteer".to_string(),
                    age_group: age_group.to_string(),
                    capacity,
                    enrolled: Some(enrolled),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let stats = service.sunday_school_stats().await.unwrap();
        assert_eq!(stats.classes, 3);
        assert_eq!(stats.total_enrolled, 29);
        assert_eq!(stats.total_capacity, 52);
        assert_eq!(stats.utilization_rate, 55.77);
        assert_eq!(stats.enrolled_by_age_group.get("Juniors"), Some(&20));
    }

    #[tokio::test]
    async fn test_no_classes() {
        let service = SundaySchoolService::in_memory(Arc::new(RecordClock::new()), Duration::ZERO);
        let stats = service.sunday_school_stats().await.unwrap();
        assert_eq!(stats.utilization_rate, 0.0);
    }
}
