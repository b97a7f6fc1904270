//! Anganwadi Center Service
//!
//! The childcare centers that anchor the program: each center supervises
//! a set of families and their plants. No delete operation exists for
//! centers; they are only ever added or updated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::executor::ApiExecutor;
use crate::services::{demo, FallbackPolicy, PageInfo, WriteOutcome};

/// One anganwadi center as listed in the register
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CenterRecord {
    pub id: u32,
    pub center_id: String,
    pub center_name: String,
    pub supervisor_name: String,
    pub contact_number: String,
    pub address: String,
    pub ward: String,
    pub total_families: u32,
    pub active_families: u32,
    pub total_plants: u32,
    pub healthy_plants: u32,
    pub establishment_date: String,
    pub status: String,
    pub last_inspection: String,
}

/// Paginated center listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CenterPage {
    pub centers: Vec<CenterRecord>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// Opening hours of a center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub open_time: String,
    pub close_time: String,
    pub working_days: String,
}

/// Center performance scores out of 100
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CenterScores {
    pub family_registration_rate: u32,
    pub plant_survival_rate: u32,
    pub photo_upload_compliance: u32,
    pub overall_score: u32,
}

/// Full center detail: register fields plus facilities, hours and scores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CenterDetail {
    #[serde(flatten)]
    pub center: CenterRecord,
    pub facilities: Vec<String>,
    pub working_hours: WorkingHours,
    pub performance: CenterScores,
}

/// Family summary as returned by the center-families endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CenterFamily {
    pub id: u32,
    pub family_id: String,
    pub head_of_family: String,
    pub contact_number: String,
    pub total_members: u32,
    pub plants_assigned: u32,
    pub status: String,
}

/// List filters, forwarded as query parameters and applied to the demo
/// dataset the same way the backend applies them.
#[derive(Debug, Clone, Default)]
pub struct CenterFilters {
    pub search: Option<String>,
    pub ward: Option<String>,
    pub status: Option<String>,
}

impl CenterFilters {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(ward) = &self.ward {
            query.push(("ward".to_string(), ward.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.clone()));
        }
        query
    }
}

/// Client for the anganwadi center endpoints
pub struct AnganwadiService {
    executor: Arc<ApiExecutor>,
    fallback: FallbackPolicy,
}

impl AnganwadiService {
    pub fn new(executor: Arc<ApiExecutor>, fallback: FallbackPolicy) -> Self {
        Self { executor, fallback }
    }

    /// List centers with pagination and filters
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        filters: &CenterFilters,
    ) -> Result<CenterPage, ApiError> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(filters.to_query());

        let envelope = self
            .executor
            .get_with_query(Endpoint::Anganwadi, &[], query)
            .await;
        match envelope.decode::<CenterPage>() {
            Ok(centers) => Ok(centers),
            Err(err) => self
                .fallback
                .on_read_failure(err, || demo::center_page(page, limit, filters)),
        }
    }

    /// Fetch one center by id
    pub async fn get(&self, id: u32) -> Result<CenterDetail, ApiError> {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .get(Endpoint::AnganwadiById, &[("id", &id_str)])
            .await;
        match envelope.decode::<CenterDetail>() {
            Ok(center) => Ok(center),
            Err(err) => self.fallback.on_read_failure(err, || demo::center_detail(id)),
        }
    }

    /// Fetch the families assigned to a center
    pub async fn families(&self, id: u32) -> Result<Vec<CenterFamily>, ApiError> {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .get(Endpoint::AnganwadiFamilies, &[("id", &id_str)])
            .await;
        match envelope.decode::<Vec<CenterFamily>>() {
            Ok(families) => Ok(families),
            Err(err) => self.fallback.on_read_failure(err, demo::center_families),
        }
    }

    /// Register a new center
    pub async fn create<T: Serialize>(&self, data: &T) -> WriteOutcome {
        let envelope = self.executor.post(Endpoint::Anganwadi, data, &[]).await;
        WriteOutcome::from_envelope(
            envelope,
            "Anganwadi center added successfully",
            "Error adding anganwadi center",
        )
    }

    /// Update an existing center record
    pub async fn update<T: Serialize>(&self, id: u32, data: &T) -> WriteOutcome {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .put(Endpoint::AnganwadiById, data, &[("id", &id_str)])
            .await;
        WriteOutcome::from_envelope(
            envelope,
            "Anganwadi center information updated successfully",
            "Error updating anganwadi center",
        )
    }
}
