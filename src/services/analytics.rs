//! Analytics Service
//!
//! Program analytics, report generation and data export. The analytics
//! reads degrade to the demo dataset; report generation and export are
//! writes and surface their failures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::executor::ApiExecutor;
use crate::services::{demo, FallbackPolicy, WriteOutcome};

/// Program-wide analytics overview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_families: u32,
    pub total_plants: u32,
    pub active_plants: u32,
    pub total_anganwadi: u32,
    pub plant_survival_rate: f64,
    pub family_participation_rate: f64,
}

/// Count for one month of a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthCount {
    pub month: String,
    pub count: u32,
}

/// Registration and distribution trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub family_registration: Vec<MonthCount>,
    pub plant_distribution: Vec<MonthCount>,
}

/// Share of one plant variety in the distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VarietyShare {
    pub name: String,
    pub count: u32,
    pub percentage: u32,
}

/// Per-center performance summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CenterPerformance {
    pub name: String,
    pub family_count: u32,
    pub plant_count: u32,
    pub survival_rate: u32,
}

/// Counters for one month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub new_families: u32,
    pub plants_distributed: u32,
    pub photos_uploaded: u32,
    pub plants_harvested: u32,
}

/// Current and previous month side by side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub current_month: MonthStats,
    pub previous_month: MonthStats,
}

/// Full analytics report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub overview: Overview,
    pub trends: Trends,
    pub plant_varieties: Vec<VarietyShare>,
    pub anganwadi_performance: Vec<CenterPerformance>,
    pub monthly_stats: MonthlyStats,
}

/// Count of plants distributed per variety
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VarietyCount {
    pub variety: String,
    pub count: u32,
}

/// Count of plants distributed per center
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CenterCount {
    pub center: String,
    pub count: u32,
}

/// Plant distribution analytics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantDistribution {
    pub total_distributed: u32,
    pub current_month_distribution: u32,
    pub distribution_by_variety: Vec<VarietyCount>,
    pub distribution_by_center: Vec<CenterCount>,
    pub monthly_distribution: Vec<MonthCount>,
}

/// One point of the cumulative registration trend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub month: String,
    pub count: u32,
    pub cumulative: u32,
}

/// Family count per household-size bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeBucket {
    pub size: String,
    pub count: u32,
}

/// Participation split across activity levels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub highly_active: u32,
    pub moderately_active: u32,
    pub low_activity: u32,
    pub inactive: u32,
}

/// Family registration trend analytics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTrends {
    pub total_registered: u32,
    pub current_month_registrations: u32,
    pub registration_trends: Vec<TrendPoint>,
    pub family_size_distribution: Vec<SizeBucket>,
    pub active_participation: Participation,
}

/// Client for the analytics endpoints
pub struct AnalyticsService {
    executor: Arc<ApiExecutor>,
    fallback: FallbackPolicy,
}

impl AnalyticsService {
    pub fn new(executor: Arc<ApiExecutor>, fallback: FallbackPolicy) -> Self {
        Self { executor, fallback }
    }

    /// Fetch the analytics report for a date range
    pub async fn report(
        &self,
        date_range: &str,
        filters: &[(String, String)],
    ) -> Result<AnalyticsReport, ApiError> {
        let mut query = vec![("dateRange".to_string(), date_range.to_string())];
        query.extend(filters.iter().cloned());

        let envelope = self
            .executor
            .get_with_query(Endpoint::Analytics, &[], query)
            .await;
        match envelope.decode::<AnalyticsReport>() {
            Ok(report) => Ok(report),
            Err(err) => self.fallback.on_read_failure(err, demo::analytics_report),
        }
    }

    /// Ask the backend to generate a report
    pub async fn generate_report(&self, report_type: &str, parameters: Value) -> WriteOutcome {
        let body = json!({ "reportType": report_type, "parameters": parameters });
        let envelope = self.executor.post(Endpoint::Reports, &body, &[]).await;
        WriteOutcome::from_envelope(
            envelope,
            "Report generated successfully",
            "Error generating report",
        )
    }

    /// Ask the backend to export data; a successful outcome carries the
    /// download URL in its data.
    pub async fn export_data(&self, export_type: &str, filters: Value) -> WriteOutcome {
        let body = json!({ "exportType": export_type, "filters": filters });
        let envelope = self.executor.post(Endpoint::ExportData, &body, &[]).await;
        WriteOutcome::from_envelope(envelope, "Data export successful", "Error exporting data")
    }

    /// Fetch plant distribution analytics
    pub async fn plant_distribution(&self) -> Result<PlantDistribution, ApiError> {
        let envelope = self.executor.get_path("/analytics/plant-distribution").await;
        match envelope.decode::<PlantDistribution>() {
            Ok(distribution) => Ok(distribution),
            Err(err) => self.fallback.on_read_failure(err, demo::plant_distribution),
        }
    }

    /// Fetch family registration trends
    pub async fn family_trends(&self) -> Result<FamilyTrends, ApiError> {
        let envelope = self.executor.get_path("/analytics/family-trends").await;
        match envelope.decode::<FamilyTrends>() {
            Ok(trends) => Ok(trends),
            Err(err) => self.fallback.on_read_failure(err, demo::family_trends),
        }
    }
}
