//! HGM Client - Main Library
//!
//! Backend access layer for the Har Ghar Munga child-nutrition and
//! plant-distribution program: configuration and URL building, a generic
//! request executor with a uniform result envelope, per-domain service
//! modules with deterministic demo-data fallback, and an authentication
//! manager over pluggable persisted session storage.
//!
//! # Overview
//!
//! Every network call flows through the same pipeline:
//!
//! consumer → query glue → domain service → executor → backend
//!
//! The executor folds every failure (transport error, timeout abort,
//! non-2xx status, decode failure) into a `{success, data, status, error}`
//! envelope; no raw network error crosses into consumer code. On a failed
//! read, each domain service consults its [`services::FallbackPolicy`]:
//! under `DemoData` (the default, preserving the admin panel's observed
//! behavior) a fixed demo dataset with the exact live shape is
//! substituted; under `Live` the error is surfaced. Writes never
//! substitute data.
//!
//! # Module Structure
//!
//! - **`config`** - base URL, endpoint table, timeout, headers
//! - **`executor`** - one HTTP call, normalized into the envelope
//! - **`session`** - pluggable persisted key-value session storage
//! - **`auth`** - login/logout/refresh, demo-credential fallback,
//!   role permissions
//! - **`permissions`** - role → permission-set table
//! - **`services`** - dashboard, plants, families, anganwadi, analytics
//! - **`query`** - loading/error/data state and stale-response discard
//! - **`scrape`** - the two legacy HTML/JSON dashboard endpoints
//! - **`util`** - local validation and formatting helpers
//! - **`client`** - facade wiring all of the above together
//!
//! # Usage
//!
//! ```rust,no_run
//! use hgm_client::{Credentials, HgmClient};
//!
//! # async fn example() {
//! let client = HgmClient::with_defaults();
//!
//! let outcome = client.auth().login(&Credentials::new("demo", "demo123")).await;
//! assert!(outcome.success);
//!
//! let plants = client.plants().list(1, 10, &Default::default()).await;
//! # let _ = plants;
//! # }
//! ```
//!
//! # Concurrency
//!
//! All network operations are async on the tokio runtime and independent
//! of each other; there is no request queue or de-duplication. The one
//! shared resource is the session store, which implementations keep
//! internally synchronized. Consumers issuing overlapping requests for
//! the same logical query can use [`query::QueryClient`] to drop
//! responses that arrive out of order.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod permissions;
pub mod query;
pub mod scrape;
pub mod services;
pub mod session;
pub mod util;

pub use auth::{AuthManager, AuthOutcome, Credentials, CurrentUser};
pub use client::HgmClient;
pub use config::{ApiConfig, ApiConfigBuilder, ConfigError, Endpoint};
pub use error::ApiError;
pub use executor::{ApiExecutor, Envelope};
pub use permissions::Role;
pub use services::FallbackPolicy;
pub use session::{FileStore, MemoryStore, SessionStore};
