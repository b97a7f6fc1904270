//! Family Management Service
//!
//! Registration records for the beneficiary families, their members and
//! the plants assigned to them. Reads degrade to the demo dataset under
//! the `DemoData` policy; the demo list honors the same search, center
//! and status filters the backend applies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::executor::ApiExecutor;
use crate::services::{demo, FallbackPolicy, PageInfo, WriteOutcome};

/// One registered family as listed in the register
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRecord {
    pub id: u32,
    pub family_id: String,
    pub head_of_family: String,
    pub contact_number: String,
    pub address: String,
    pub anganwadi_center: String,
    pub registration_date: String,
    pub total_members: u32,
    pub plants_assigned: u32,
    pub status: String,
    pub last_update: String,
}

/// Paginated family listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPage {
    pub families: Vec<FamilyRecord>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// One member of a family
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: u32,
    pub name: String,
    pub relation: String,
    pub age: u32,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar_number: Option<String>,
}

/// A plant assigned to a family, as embedded in the family detail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPlant {
    pub id: u32,
    pub plant_id: String,
    pub variety_name: String,
    pub distribution_date: String,
    pub status: String,
}

/// Full family detail: the register fields plus members and plants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDetail {
    #[serde(flatten)]
    pub family: FamilyRecord,
    pub members: Vec<FamilyMember>,
    pub plants: Vec<FamilyPlant>,
}

/// List filters, forwarded as query parameters and applied to the demo
/// dataset the same way the backend applies them.
#[derive(Debug, Clone, Default)]
pub struct FamilyFilters {
    pub search: Option<String>,
    pub anganwadi_center: Option<String>,
    pub status: Option<String>,
}

impl FamilyFilters {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(center) = &self.anganwadi_center {
            query.push(("anganwadiCenter".to_string(), center.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.clone()));
        }
        query
    }
}

/// Client for the family management endpoints
pub struct FamilyService {
    executor: Arc<ApiExecutor>,
    fallback: FallbackPolicy,
}

impl FamilyService {
    pub fn new(executor: Arc<ApiExecutor>, fallback: FallbackPolicy) -> Self {
        Self { executor, fallback }
    }

    /// List families with pagination and filters
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        filters: &FamilyFilters,
    ) -> Result<FamilyPage, ApiError> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(filters.to_query());

        let envelope = self
            .executor
            .get_with_query(Endpoint::Families, &[], query)
            .await;
        match envelope.decode::<FamilyPage>() {
            Ok(families) => Ok(families),
            Err(err) => self
                .fallback
                .on_read_failure(err, || demo::family_page(page, limit, filters)),
        }
    }

    /// Fetch one family by id
    pub async fn get(&self, id: u32) -> Result<FamilyDetail, ApiError> {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .get(Endpoint::FamilyById, &[("id", &id_str)])
            .await;
        match envelope.decode::<FamilyDetail>() {
            Ok(family) => Ok(family),
            Err(err) => self.fallback.on_read_failure(err, || demo::family_detail(id)),
        }
    }

    /// Fetch the members of a family
    pub async fn members(&self, id: u32) -> Result<Vec<FamilyMember>, ApiError> {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .get(Endpoint::FamilyMembers, &[("id", &id_str)])
            .await;
        match envelope.decode::<Vec<FamilyMember>>() {
            Ok(members) => Ok(members),
            Err(err) => self.fallback.on_read_failure(err, demo::family_members),
        }
    }

    /// Register a new family
    pub async fn create<T: Serialize>(&self, data: &T) -> WriteOutcome {
        let envelope = self.executor.post(Endpoint::Families, data, &[]).await;
        WriteOutcome::from_envelope(
            envelope,
            "Family registered successfully",
            "Error in family registration",
        )
    }

    /// Update an existing family record
    pub async fn update<T: Serialize>(&self, id: u32, data: &T) -> WriteOutcome {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .put(Endpoint::FamilyById, data, &[("id", &id_str)])
            .await;
        WriteOutcome::from_envelope(
            envelope,
            "Family information updated successfully",
            "Error updating family information",
        )
    }

    /// Delete a family record
    pub async fn delete(&self, id: u32) -> WriteOutcome {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .delete(Endpoint::FamilyById, &[("id", &id_str)])
            .await;
        if envelope.success {
            WriteOutcome::ok("Family record deleted successfully", None)
        } else {
            WriteOutcome::fail(
                "Error deleting family record",
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::session::MemoryStore;
    use std::time::Duration;

    fn offline_service(fallback: FallbackPolicy) -> FamilyService {
        let config = ApiConfig::builder()
            .base_url("http://127.0.0.1:1")
            .timeout(Duration::from_millis(200))
            .build()
            .expect("valid test config");
        let executor = Arc::new(ApiExecutor::new(config, Arc::new(MemoryStore::new())));
        FamilyService::new(executor, fallback)
    }

    #[tokio::test]
    async fn test_demo_list_has_four_families() {
        let service = offline_service(FallbackPolicy::DemoData);
        let page = service.list(1, 10, &FamilyFilters::default()).await.expect("demo page");
        assert_eq!(page.families.len(), 4);
        assert_eq!(page.families[0].family_id, "FAM001");
        assert_eq!(page.page.total_count, 4);
    }

    #[tokio::test]
    async fn test_demo_list_applies_search_filter() {
        let service = offline_service(FallbackPolicy::DemoData);
        let filters = FamilyFilters {
            search: Some("FAM003".to_string()),
            ..FamilyFilters::default()
        };
        let page = service.list(1, 10, &filters).await.expect("demo page");
        assert_eq!(page.families.len(), 1);
        assert_eq!(page.families[0].head_of_family, "गीता शर्मा");
    }

    #[tokio::test]
    async fn test_demo_list_applies_status_filter() {
        let service = offline_service(FallbackPolicy::DemoData);
        let filters = FamilyFilters {
            status: Some("लंबित".to_string()),
            ..FamilyFilters::default()
        };
        let page = service.list(1, 10, &filters).await.expect("demo page");
        assert_eq!(page.families.len(), 1);
        assert_eq!(page.families[0].family_id, "FAM004");
    }

    #[tokio::test]
    async fn test_demo_pagination() {
        let service = offline_service(FallbackPolicy::DemoData);
        let page = service.list(2, 3, &FamilyFilters::default()).await.expect("demo page");
        assert_eq!(page.families.len(), 1);
        assert_eq!(page.page.current_page, 2);
        assert_eq!(page.page.total_pages, 2);
        assert!(page.page.has_previous_page);
        assert!(!page.page.has_next_page);
    }

    #[tokio::test]
    async fn test_members_fallback() {
        let service = offline_service(FallbackPolicy::DemoData);
        let members = service.members(1).await.expect("demo members");
        assert_eq!(members.len(), 3);
        assert!(members[0].aadhar_number.is_some());
    }

    #[tokio::test]
    async fn test_update_failure_is_surfaced() {
        let service = offline_service(FallbackPolicy::DemoData);
        let outcome = service.update(1, &serde_json::json!({"status": "x"})).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Error updating family information");
    }
}
