//! Authentication and Session Management
//!
//! Drives the two-state session machine (anonymous / authenticated) over
//! an injected [`SessionStore`]. Login goes to the backend first; when the
//! backend rejects or is unreachable, a fixed table of demo credentials
//! can synthesize a local session so the admin panel stays usable against
//! an incomplete deployment. This is the only layer allowed to turn a
//! backend failure into a success.
//!
//! ## Session record
//!
//! A session is the five persisted keys in [`crate::session::keys`]. It
//! exists iff `isLoggedIn` equals `"true"`; [`AuthManager::is_authenticated`]
//! requires both the flag and a token.

use std::sync::Arc;

use chrono::Utc;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::executor::{ApiExecutor, Envelope};
use crate::permissions::Role;
use crate::session::{keys, SessionStore};

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Identity of the signed-in user, read back from the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: String,
    pub token: String,
}

/// Caller-facing outcome of an authentication operation
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    fn ok(message: &str, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            error: None,
        }
    }

    fn fail(message: &str, error: String) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(error),
        }
    }
}

/// One entry of the fixed demo-credential table
struct DemoProfile {
    username: &'static str,
    password: &'static str,
    role: Role,
    name: &'static str,
    id: &'static str,
}

const DEMO_USERS: &[DemoProfile] = &[
    DemoProfile {
        username: "admin555",
        password: "admin@222",
        role: Role::Admin,
        name: "Admin Raipur",
        id: "demo-001",
    },
    DemoProfile {
        username: "supervisor",
        password: "super123",
        role: Role::Supervisor,
        name: "Supervisor Demo",
        id: "demo-002",
    },
    DemoProfile {
        username: "demo",
        password: "demo123",
        role: Role::User,
        name: "Demo User",
        id: "demo-003",
    },
    DemoProfile {
        username: "test",
        password: "test123",
        role: Role::Admin,
        name: "Test Admin",
        id: "demo-004",
    },
    DemoProfile {
        username: "hgm",
        password: "hgm2024",
        role: Role::Admin,
        name: "HGM Administrator",
        id: "demo-005",
    },
    DemoProfile {
        username: "raipur",
        password: "raipur123",
        role: Role::Supervisor,
        name: "Raipur Supervisor",
        id: "demo-006",
    },
];

fn demo_profile(credentials: &Credentials) -> Option<&'static DemoProfile> {
    DEMO_USERS
        .iter()
        .find(|user| user.username == credentials.username && user.password == credentials.password)
}

/// Authentication manager over an injected session store.
pub struct AuthManager {
    executor: Arc<ApiExecutor>,
    store: Arc<dyn SessionStore>,
}

impl AuthManager {
    /// Create a manager sharing the executor's session store
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        let store = executor.store().clone();
        Self { executor, store }
    }

    /// Attempt a backend login, falling back to the demo-credential table
    /// when the backend rejects or is unreachable.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let envelope = self.executor.post(Endpoint::Login, credentials, &[]).await;
        match self.accept_backend_login(&envelope) {
            Ok(data) => {
                tracing::info!("backend login successful");
                AuthOutcome::ok("Logged in successfully", Some(data))
            }
            Err(err) => {
                tracing::debug!(error = %err, "backend login failed, checking demo credentials");
                match demo_profile(credentials) {
                    Some(profile) => self.demo_login(profile),
                    None => AuthOutcome::fail("Login error occurred", err.to_string()),
                }
            }
        }
    }

    /// Validate the backend response, persist the session and return the
    /// response body. The login contract allows `id`/`_id` and
    /// `name`/`username` interchangeably.
    fn accept_backend_login(&self, envelope: &Envelope) -> Result<Value, ApiError> {
        let data: Value = envelope.decode()?;
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::decode("login response missing token"))?;
        let user = data.get("user").cloned().unwrap_or(Value::Null);
        let role = user.get("role").and_then(Value::as_str).unwrap_or("user");
        let name = user
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| user.get("username").and_then(Value::as_str))
            .unwrap_or_default();
        let id = user
            .get("id")
            .and_then(Value::as_str)
            .or_else(|| user.get("_id").and_then(Value::as_str))
            .unwrap_or_default();

        self.persist_session(token, role, name, id);
        Ok(data)
    }

    /// Synthesize a local session from a demo-table entry
    fn demo_login(&self, profile: &DemoProfile) -> AuthOutcome {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
        let token = format!("demo-token-{}-{}", Utc::now().timestamp_millis(), suffix);

        self.persist_session(&token, profile.role.as_str(), profile.name, profile.id);
        tracing::info!(username = profile.username, "demo login successful");

        AuthOutcome::ok(
            "Demo login successful",
            Some(json!({
                "token": token,
                "user": {
                    "id": profile.id,
                    "name": profile.name,
                    "role": profile.role.as_str(),
                    "permissions": profile.role.permissions(),
                }
            })),
        )
    }

    fn persist_session(&self, token: &str, role: &str, name: &str, id: &str) {
        self.store.set(keys::AUTH_TOKEN, token);
        self.store.set(keys::IS_LOGGED_IN, "true");
        self.store.set(keys::USER_ROLE, role);
        self.store.set(keys::USER_NAME, name);
        self.store.set(keys::USER_ID, id);
    }

    /// End the session. The store is cleared whether or not the backend
    /// call goes through, and the caller always sees success.
    pub async fn logout(&self) -> AuthOutcome {
        self.executor.post(Endpoint::Logout, &json!({}), &[]).await;
        self.clear_session();
        AuthOutcome::ok("Logged out successfully", None)
    }

    /// Exchange the current token for a fresh one. Any failure clears the
    /// whole session and forces a re-login.
    pub async fn refresh_token(&self) -> bool {
        let envelope = self.executor.post(Endpoint::RefreshToken, &json!({}), &[]).await;
        let token = envelope
            .decode::<Value>()
            .ok()
            .and_then(|data| data.get("token").and_then(Value::as_str).map(str::to_string));
        match token {
            Some(token) => {
                self.store.set(keys::AUTH_TOKEN, &token);
                true
            }
            None => {
                tracing::warn!("token refresh failed, clearing session");
                self.clear_session();
                false
            }
        }
    }

    /// True iff a token is stored and the logged-in flag is `"true"`
    pub fn is_authenticated(&self) -> bool {
        let has_token = self.store.get(keys::AUTH_TOKEN).is_some();
        let logged_in = self.store.get(keys::IS_LOGGED_IN).as_deref() == Some("true");
        has_token && logged_in
    }

    /// Identity of the signed-in user, if any
    pub fn current_user(&self) -> Option<CurrentUser> {
        if !self.is_authenticated() {
            return None;
        }
        Some(CurrentUser {
            id: self.store.get(keys::USER_ID).unwrap_or_default(),
            name: self.store.get(keys::USER_NAME).unwrap_or_default(),
            role: self.store.get(keys::USER_ROLE).unwrap_or_default(),
            token: self.store.get(keys::AUTH_TOKEN).unwrap_or_default(),
        })
    }

    /// Whether the signed-in user's role carries the given permission.
    /// Always false without a session.
    pub fn has_permission(&self, permission: &str) -> bool {
        match self.current_user() {
            Some(user) => Role::parse(&user.role).allows(permission),
            None => false,
        }
    }

    /// Remove every session key
    pub fn clear_session(&self) {
        for key in keys::ALL {
            self.store.remove(key);
        }
    }

    /// Submit a registration form (multipart; photos ride along with the
    /// field data)
    pub async fn register(&self, form: Form) -> Envelope {
        self.executor.upload_form_data(Endpoint::Register, &[], form).await
    }

    /// Fetch the signed-in user's detail record
    pub async fn user_details(&self) -> AuthOutcome {
        let envelope = self.executor.get(Endpoint::UserDetails, &[]).await;
        if envelope.success {
            AuthOutcome::ok("User details fetched successfully", envelope.data)
        } else {
            AuthOutcome::fail(
                "Error fetching user details",
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            )
        }
    }

    /// Probe the backend root endpoint
    pub async fn test_connection(&self) -> AuthOutcome {
        let envelope = self.executor.get(Endpoint::Root, &[]).await;
        if envelope.success {
            AuthOutcome::ok("Backend connection successful", envelope.data)
        } else {
            AuthOutcome::fail(
                "Backend connection failed",
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager_for(base_url: &str) -> (AuthManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = ApiConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_millis(500))
            .build()
            .expect("valid test config");
        let executor = Arc::new(ApiExecutor::new(config, store.clone() as Arc<dyn SessionStore>));
        (AuthManager::new(executor), store)
    }

    fn unreachable_manager() -> (AuthManager, Arc<MemoryStore>) {
        // Nothing listens on port 1.
        manager_for("http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn test_backend_login_persists_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "backend-token",
                "user": { "_id": "u-9", "username": "asha", "role": "supervisor" }
            })))
            .mount(&server)
            .await;

        let (manager, _store) = manager_for(&server.uri());
        let outcome = manager.login(&Credentials::new("asha", "pw")).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Logged in successfully");
        assert!(manager.is_authenticated());

        let user = manager.current_user().expect("session");
        assert_eq!(user.id, "u-9");
        assert_eq!(user.name, "asha");
        assert_eq!(user.role, "supervisor");
        assert_eq!(user.token, "backend-token");
    }

    #[tokio::test]
    async fn test_demo_login_when_backend_unreachable() {
        let (manager, _store) = unreachable_manager();
        let outcome = manager.login(&Credentials::new("demo", "demo123")).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Demo login successful");

        let user = manager.current_user().expect("session");
        assert_eq!(user.role, "user");
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.id, "demo-003");
        assert!(user.token.starts_with("demo-token-"));
    }

    #[tokio::test]
    async fn test_bad_credentials_leave_store_empty() {
        let (manager, store) = unreachable_manager();
        let outcome = manager.login(&Credentials::new("nouser", "x")).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Login error occurred");
        assert!(outcome.error.is_some());
        assert!(store.is_empty());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (manager, store) = unreachable_manager();
        manager.login(&Credentials::new("admin555", "admin@222")).await;
        assert!(manager.is_authenticated());

        let first = manager.logout().await;
        assert!(first.success);
        assert!(store.is_empty());

        let second = manager.logout().await;
        assert!(second.success);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_has_permission_without_session() {
        let (manager, _store) = unreachable_manager();
        assert!(!manager.has_permission("dashboard.view"));
        assert!(!manager.has_permission(""));
    }

    #[tokio::test]
    async fn test_has_permission_follows_role() {
        let (manager, _store) = unreachable_manager();
        manager.login(&Credentials::new("supervisor", "super123")).await;

        assert!(manager.has_permission("families.edit"));
        assert!(!manager.has_permission("families.delete"));
        assert!(!manager.has_permission(""));
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session() {
        let (manager, store) = unreachable_manager();
        manager.login(&Credentials::new("hgm", "hgm2024")).await;
        assert!(manager.is_authenticated());

        let refreshed = manager.refresh_token().await;
        assert!(!refreshed);
        assert!(store.is_empty());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_success_overwrites_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh-token" })),
            )
            .mount(&server)
            .await;

        let (manager, store) = manager_for(&server.uri());
        store.set(keys::AUTH_TOKEN, "stale-token");
        store.set(keys::IS_LOGGED_IN, "true");

        assert!(manager.refresh_token().await);
        assert_eq!(store.get(keys::AUTH_TOKEN).as_deref(), Some("fresh-token"));
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_backend_login_still_checks_demo_table() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (manager, _store) = manager_for(&server.uri());
        let outcome = manager.login(&Credentials::new("raipur", "raipur123")).await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Demo login successful");
        let user = manager.current_user().expect("session");
        assert_eq!(user.role, "supervisor");
        assert_eq!(user.name, "Raipur Supervisor");
    }
}
