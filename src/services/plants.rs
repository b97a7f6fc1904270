//! Plant Management Service
//!
//! CRUD operations over the distributed munga plants, plus the photo
//! upload path. List and detail reads degrade to the demo dataset under
//! the `DemoData` policy.

use std::sync::Arc;

use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::executor::ApiExecutor;
use crate::services::{demo, FallbackPolicy, PageInfo, WriteOutcome};

/// One distributed plant as listed in the register
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub id: u32,
    pub plant_id: String,
    pub variety_name: String,
    pub family_name: String,
    pub family_id: String,
    pub anganwadi_center: String,
    pub distribution_date: String,
    pub current_status: String,
    pub last_photo_date: String,
    pub care_score: u32,
}

/// Paginated plant listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantPage {
    pub plants: Vec<PlantRecord>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// Photo attached to a plant record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantPhoto {
    pub id: u32,
    pub url: String,
    pub upload_date: String,
    pub description: String,
}

/// One entry of a plant's care history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CareEvent {
    pub date: String,
    pub action: String,
    pub status: String,
}

/// Full plant detail: the register fields plus photos and care history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetail {
    #[serde(flatten)]
    pub plant: PlantRecord,
    pub photos: Vec<PlantPhoto>,
    pub care_history: Vec<CareEvent>,
}

/// Optional list filters, forwarded as query parameters
#[derive(Debug, Clone, Default)]
pub struct PlantFilters {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl PlantFilters {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.clone()));
        }
        query
    }
}

/// Client for the plant management endpoints
pub struct PlantService {
    executor: Arc<ApiExecutor>,
    fallback: FallbackPolicy,
}

impl PlantService {
    pub fn new(executor: Arc<ApiExecutor>, fallback: FallbackPolicy) -> Self {
        Self { executor, fallback }
    }

    /// List plants with pagination and filters
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        filters: &PlantFilters,
    ) -> Result<PlantPage, ApiError> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(filters.to_query());

        let envelope = self
            .executor
            .get_with_query(Endpoint::Plants, &[], query)
            .await;
        match envelope.decode::<PlantPage>() {
            Ok(plants) => Ok(plants),
            Err(err) => self
                .fallback
                .on_read_failure(err, || demo::plant_page(page, limit)),
        }
    }

    /// Fetch one plant by id
    pub async fn get(&self, id: u32) -> Result<PlantDetail, ApiError> {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .get(Endpoint::PlantById, &[("id", &id_str)])
            .await;
        match envelope.decode::<PlantDetail>() {
            Ok(plant) => Ok(plant),
            Err(err) => self.fallback.on_read_failure(err, || demo::plant_detail(id)),
        }
    }

    /// Register a new plant distribution
    pub async fn create<T: Serialize>(&self, data: &T) -> WriteOutcome {
        let envelope = self.executor.post(Endpoint::Plants, data, &[]).await;
        WriteOutcome::from_envelope(envelope, "Plant added successfully", "Error adding plant")
    }

    /// Update an existing plant record
    pub async fn update<T: Serialize>(&self, id: u32, data: &T) -> WriteOutcome {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .put(Endpoint::PlantById, data, &[("id", &id_str)])
            .await;
        WriteOutcome::from_envelope(
            envelope,
            "Plant information updated successfully",
            "Error updating plant information",
        )
    }

    /// Delete a plant record
    pub async fn delete(&self, id: u32) -> WriteOutcome {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .delete(Endpoint::PlantById, &[("id", &id_str)])
            .await;
        if envelope.success {
            WriteOutcome::ok("Plant deleted successfully", None)
        } else {
            WriteOutcome::fail(
                "Error deleting plant",
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            )
        }
    }

    /// Upload a care photo for a plant (multipart: file plus description)
    pub async fn upload_photo(&self, id: u32, form: Form) -> WriteOutcome {
        let id_str = id.to_string();
        let envelope = self
            .executor
            .upload_form_data(Endpoint::PlantPhotos, &[("id", &id_str)], form)
            .await;
        WriteOutcome::from_envelope(
            envelope,
            "Photo uploaded successfully",
            "Error uploading photo",
        )
    }
}
