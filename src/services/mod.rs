//! Domain Service Modules
//!
//! One module per backend domain, each wrapping the request executor for
//! its endpoints. Read operations decode typed data and, under the
//! [`FallbackPolicy::DemoData`] policy, degrade to fixed demo datasets
//! when the backend fails; write operations surface a structured
//! [`WriteOutcome`] instead. Callers can therefore not distinguish demo
//! reads from live reads by shape - only by policy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::executor::Envelope;

pub mod analytics;
pub mod anganwadi;
pub mod dashboard;
pub mod demo;
pub mod families;
pub mod fallback;
pub mod plants;

pub use analytics::AnalyticsService;
pub use anganwadi::AnganwadiService;
pub use dashboard::DashboardService;
pub use families::FamilyService;
pub use fallback::FallbackPolicy;
pub use plants::PlantService;

/// Pagination envelope carried beside every list payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_count: usize,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Outcome of a write operation (create/update/delete/upload).
///
/// Writes never substitute demo data; failures are surfaced here.
#[derive(Debug, Clone, Serialize)]
pub struct WriteOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteOutcome {
    /// Successful write
    pub fn ok(message: &str, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            error: None,
        }
    }

    /// Failed write
    pub fn fail(message: &str, error: String) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(error),
        }
    }

    /// Fold an executor envelope into a write outcome using the given
    /// per-operation messages.
    pub(crate) fn from_envelope(envelope: Envelope, ok_message: &str, fail_message: &str) -> Self {
        if envelope.success {
            Self::ok(ok_message, envelope.data)
        } else {
            Self::fail(
                fail_message,
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_write_outcome_from_success_envelope() {
        let envelope = Envelope::ok(serde_json::json!({"id": 7}), 201);
        let outcome = WriteOutcome::from_envelope(envelope, "added", "failed");
        assert!(outcome.success);
        assert_eq!(outcome.message, "added");
        assert_eq!(outcome.data, Some(serde_json::json!({"id": 7})));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_write_outcome_from_failure_envelope() {
        let envelope = Envelope::from_error(&ApiError::Status {
            status: 500,
            text: "Internal Server Error".to_string(),
        });
        let outcome = WriteOutcome::from_envelope(envelope, "added", "failed");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "failed");
        assert!(outcome.error.expect("error").contains("500"));
    }
}
