//! Client Facade
//!
//! Bundles one configuration, one session store and one executor, and
//! hands out the domain services and the auth manager wired to them. All
//! services share the executor, so they see the same base URL, timeout
//! and session token.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ApiConfig;
use crate::executor::ApiExecutor;
use crate::scrape::ScrapeClient;
use crate::services::{
    AnalyticsService, AnganwadiService, DashboardService, FallbackPolicy, FamilyService,
    PlantService,
};
use crate::session::{FileStore, SessionStore};

/// Entry point for the backend access layer.
pub struct HgmClient {
    executor: Arc<ApiExecutor>,
    fallback: FallbackPolicy,
}

impl HgmClient {
    /// Build a client over an explicit configuration and session store
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            executor: Arc::new(ApiExecutor::new(config, store)),
            fallback: FallbackPolicy::default(),
        }
    }

    /// Build a client with default configuration and the file-backed
    /// session store in the platform config directory
    pub fn with_defaults() -> Self {
        Self::new(ApiConfig::default(), Arc::new(FileStore::in_config_dir()))
    }

    /// Override the read-failure fallback policy (demo data by default)
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// The shared request executor
    pub fn executor(&self) -> &Arc<ApiExecutor> {
        &self.executor
    }

    /// Authentication and session manager
    pub fn auth(&self) -> AuthManager {
        AuthManager::new(self.executor.clone())
    }

    /// Dashboard counters and activity feed
    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.executor.clone(), self.fallback)
    }

    /// Plant management
    pub fn plants(&self) -> PlantService {
        PlantService::new(self.executor.clone(), self.fallback)
    }

    /// Family management
    pub fn families(&self) -> FamilyService {
        FamilyService::new(self.executor.clone(), self.fallback)
    }

    /// Anganwadi centers
    pub fn anganwadi(&self) -> AnganwadiService {
        AnganwadiService::new(self.executor.clone(), self.fallback)
    }

    /// Analytics, reports and export
    pub fn analytics(&self) -> AnalyticsService {
        AnalyticsService::new(self.executor.clone(), self.fallback)
    }

    /// Client for the legacy scraping endpoints
    pub fn scrape(&self) -> ScrapeClient {
        ScrapeClient::new(self.executor.config())
    }
}
