//! Dashboard Service
//!
//! Program-wide counters and the recent-activity feed shown on the main
//! dashboard. Both reads degrade to the demo dataset under the `DemoData`
//! policy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::executor::ApiExecutor;
use crate::services::{demo, FallbackPolicy};

/// Month-over-month growth percentages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGrowth {
    pub anganwadi: u32,
    pub families: u32,
    pub plants: u32,
    pub active_plants: u32,
}

/// Program-wide dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_anganwadi: u32,
    pub total_families: u32,
    pub total_plants: u32,
    pub active_plants: u32,
    pub monthly_growth: MonthlyGrowth,
}

/// One entry of the recent-activity feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub meta: String,
    pub status: String,
    pub timestamp: String,
}

/// Client for the dashboard endpoints
pub struct DashboardService {
    executor: Arc<ApiExecutor>,
    fallback: FallbackPolicy,
}

impl DashboardService {
    pub fn new(executor: Arc<ApiExecutor>, fallback: FallbackPolicy) -> Self {
        Self { executor, fallback }
    }

    /// Fetch the dashboard counters
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope = self.executor.get(Endpoint::DashboardStats, &[]).await;
        match envelope.decode::<DashboardStats>() {
            Ok(stats) => Ok(stats),
            Err(err) => self.fallback.on_read_failure(err, demo::dashboard_stats),
        }
    }

    /// Fetch the recent-activity feed
    pub async fn recent_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let envelope = self.executor.get(Endpoint::RecentActivities, &[]).await;
        match envelope.decode::<Vec<Activity>>() {
            Ok(activities) => Ok(activities),
            Err(err) => self.fallback.on_read_failure(err, demo::recent_activities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::session::MemoryStore;
    use std::time::Duration;

    fn offline_service() -> DashboardService {
        let config = ApiConfig::builder()
            .base_url("http://127.0.0.1:1")
            .timeout(Duration::from_millis(200))
            .build()
            .expect("valid test config");
        let executor = Arc::new(ApiExecutor::new(config, Arc::new(MemoryStore::new())));
        DashboardService::new(executor, FallbackPolicy::DemoData)
    }

    #[tokio::test]
    async fn test_demo_stats() {
        let service = offline_service();
        let stats = service.stats().await.expect("demo stats");
        assert_eq!(stats.total_anganwadi, 156);
        assert_eq!(stats.total_families, 2847);
        assert_eq!(stats.total_plants, 28470);
        assert_eq!(stats.active_plants, 25623);
        assert_eq!(stats.monthly_growth.plants, 15);
    }

    #[tokio::test]
    async fn test_demo_activities_have_timestamps() {
        let service = offline_service();
        let activities = service.recent_activities().await.expect("demo activities");
        assert_eq!(activities.len(), 5);
        assert_eq!(activities[0].kind, "plant");
        for activity in &activities {
            assert!(!activity.timestamp.is_empty());
        }
    }
}
