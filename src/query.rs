//! Data-Fetching Glue
//!
//! Small state machinery binding the domain services to consumer state:
//! a loading/error/data triple per query, and a per-key monotonic ticket
//! scheme that drops stale responses. Overlapping requests for the same
//! logical query (a search box being typed into, say) may settle out of
//! order; only the response belonging to the newest ticket for a key is
//! accepted, so the consumer never regresses to an older result.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ApiError;
use crate::services::dashboard::{Activity, DashboardService, DashboardStats};

/// Consumer-facing state of one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    /// Mark the query in flight, clearing any previous error
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Accept a result
    pub fn resolve(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    /// Record a failure, keeping any previously shown data
    pub fn fail(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }

    /// Fold a service result into the state
    pub fn apply(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => self.resolve(data),
            Err(err) => self.fail(err.to_string()),
        }
    }
}

/// Ticket for one issued request of a keyed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    key: String,
    seq: u64,
}

/// Hands out monotonic tickets per query key and arbitrates which
/// response is current.
#[derive(Debug, Default)]
pub struct QueryClient {
    seqs: Mutex<HashMap<String, u64>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for the next request of `key`, superseding every
    /// ticket issued for that key before it.
    pub fn begin(&self, key: &str) -> QueryTicket {
        let mut seqs = self.seqs.lock().unwrap_or_else(|e| e.into_inner());
        let seq = seqs.entry(key.to_string()).or_insert(0);
        *seq += 1;
        QueryTicket {
            key: key.to_string(),
            seq: *seq,
        }
    }

    /// Whether the ticket is still the newest one for its key
    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        let seqs = self.seqs.lock().unwrap_or_else(|e| e.into_inner());
        seqs.get(&ticket.key) == Some(&ticket.seq)
    }

    /// Accept `value` only if the ticket is still current; a stale
    /// response is dropped.
    pub fn settle<T>(&self, ticket: &QueryTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(key = %ticket.key, seq = ticket.seq, "dropping stale response");
            None
        }
    }
}

/// Counters and activity feed fetched together for the main dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub activities: Vec<Activity>,
}

/// Fetch the dashboard counters and activity feed concurrently
pub async fn load_dashboard(service: &DashboardService) -> Result<DashboardData, ApiError> {
    let (stats, activities) = tokio::join!(service.stats(), service.recent_activities());
    Ok(DashboardData {
        stats: stats?,
        activities: activities?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::executor::ApiExecutor;
    use crate::services::FallbackPolicy;
    use crate::session::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_query_state_lifecycle() {
        let mut state: QueryState<u32> = QueryState::default();
        assert!(!state.loading);

        state.start();
        assert!(state.loading);

        state.resolve(7);
        assert!(!state.loading);
        assert_eq!(state.data, Some(7));

        state.start();
        state.fail("backend down");
        assert_eq!(state.error.as_deref(), Some("backend down"));
        // Stale data stays visible while the error is shown.
        assert_eq!(state.data, Some(7));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let client = QueryClient::new();
        let first = client.begin("families?page=1");
        let second = client.begin("families?page=1");

        // The response for the superseded request is dropped.
        assert_eq!(client.settle(&first, "old"), None);
        assert_eq!(client.settle(&second, "new"), Some("new"));
    }

    #[test]
    fn test_keys_are_independent() {
        let client = QueryClient::new();
        let families = client.begin("families");
        let plants = client.begin("plants");

        assert!(client.is_current(&families));
        assert!(client.is_current(&plants));

        client.begin("plants");
        assert!(client.is_current(&families));
        assert!(!client.is_current(&plants));
    }

    #[tokio::test]
    async fn test_load_dashboard_aggregates_demo_data() {
        let config = ApiConfig::builder()
            .base_url("http://127.0.0.1:1")
            .timeout(Duration::from_millis(200))
            .build()
            .expect("valid test config");
        let executor = Arc::new(ApiExecutor::new(config, Arc::new(MemoryStore::new())));
        let service = DashboardService::new(executor, FallbackPolicy::DemoData);

        let data = load_dashboard(&service).await.expect("dashboard data");
        assert_eq!(data.stats.total_anganwadi, 156);
        assert_eq!(data.activities.len(), 5);
    }
}
