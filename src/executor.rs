//! Generic Request Executor
//!
//! Performs one HTTP call against the backend and normalizes the outcome
//! into a uniform [`Envelope`]. Every failure category - transport error,
//! timeout abort, non-2xx status, JSON decode failure - becomes a failure
//! envelope; `execute` never returns an `Err` and never panics, so no raw
//! network exception can cross into consumer code.
//!
//! Requests carry the configured default headers plus the API key and,
//! when the session store holds a token, a bearer authorization header.
//! A cancellation timer equal to the configured timeout aborts calls the
//! backend never answers. No retries are performed; a failed call is
//! reported once and fallback is the caller's decision.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ApiConfig, Endpoint};
use crate::error::ApiError;
use crate::session::{keys, SessionStore};

/// Uniform result shape returned by every executor call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Whether the call succeeded
    pub success: bool,
    /// Decoded JSON body on success
    pub data: Option<Value>,
    /// HTTP status on success
    pub status: Option<u16>,
    /// Failure message on failure
    pub error: Option<String>,
}

impl Envelope {
    /// Success envelope carrying the decoded body and status
    pub fn ok(data: Value, status: u16) -> Self {
        Self {
            success: true,
            data: Some(data),
            status: Some(status),
            error: None,
        }
    }

    /// Failure envelope carrying the error message
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            status: None,
            error: Some(err.to_string()),
        }
    }

    /// Decode the success payload into a typed value.
    ///
    /// Failure envelopes become [`ApiError::Failed`]; missing or
    /// mismatched payloads become [`ApiError::Decode`].
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Failed(
                self.error.clone().unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let data = self
            .data
            .clone()
            .ok_or_else(|| ApiError::decode("response body missing"))?;
        serde_json::from_value(data).map_err(ApiError::from)
    }
}

/// Per-call options for [`ApiExecutor::execute`].
#[derive(Default)]
pub struct RequestOptions {
    /// HTTP method (GET when unset)
    pub method: Method,
    /// JSON body
    pub body: Option<Value>,
    /// Header override; defaults to the config's auth headers
    pub headers: Option<HeaderMap>,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// Multipart body; the transport sets the boundary content type
    pub form: Option<Form>,
}

/// Executes HTTP calls and folds every outcome into an [`Envelope`].
pub struct ApiExecutor {
    config: ApiConfig,
    store: Arc<dyn SessionStore>,
    client: Client,
}

impl ApiExecutor {
    /// Create an executor over the given configuration and session store
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            config,
            store,
            client: Client::new(),
        }
    }

    /// The configuration this executor resolves URLs against
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The session store tokens are read from
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn token(&self) -> Option<String> {
        self.store.get(keys::AUTH_TOKEN)
    }

    /// Perform one HTTP call. Always resolves to an envelope.
    pub async fn execute(&self, url: &str, options: RequestOptions) -> Envelope {
        tracing::debug!(method = %options.method, url, "api request");
        match self.dispatch(url, options).await {
            Ok((data, status)) => Envelope::ok(data, status),
            Err(err) => {
                tracing::warn!(url, error = %err, "api request failed");
                Envelope::from_error(&err)
            }
        }
    }

    async fn dispatch(&self, url: &str, options: RequestOptions) -> Result<(Value, u16), ApiError> {
        let headers = options
            .headers
            .unwrap_or_else(|| self.config.auth_headers(self.token().as_deref()));

        let mut request = self
            .client
            .request(options.method, url)
            .headers(headers)
            .timeout(self.config.timeout());

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = options.body {
            request = request.json(&body);
        }
        if let Some(form) = options.form {
            request = request.multipart(form);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let code = status.as_u16();
        let data = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;
        Ok((data, code))
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout().as_millis() as u64)
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    /// GET an endpoint
    pub async fn get(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Envelope {
        self.get_with_query(endpoint, params, Vec::new()).await
    }

    /// GET a raw path relative to the base URL, for the handful of routes
    /// that live outside the endpoint table
    pub async fn get_path(&self, path: &str) -> Envelope {
        let url = format!("{}{}", self.config.base_url().trim_end_matches('/'), path);
        self.execute(&url, RequestOptions::default()).await
    }

    /// GET an endpoint with query string pairs (pagination, filters)
    pub async fn get_with_query(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
        query: Vec<(String, String)>,
    ) -> Envelope {
        let url = self.config.resolve_url(endpoint, params);
        self.execute(
            &url,
            RequestOptions {
                query,
                ..RequestOptions::default()
            },
        )
        .await
    }

    /// POST a JSON body to an endpoint
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &T,
        params: &[(&str, &str)],
    ) -> Envelope {
        self.send_json(Method::POST, endpoint, body, params).await
    }

    /// PUT a JSON body to an endpoint
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &T,
        params: &[(&str, &str)],
    ) -> Envelope {
        self.send_json(Method::PUT, endpoint, body, params).await
    }

    /// DELETE an endpoint (no body)
    pub async fn delete(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Envelope {
        let url = self.config.resolve_url(endpoint, params);
        self.execute(
            &url,
            RequestOptions {
                method: Method::DELETE,
                ..RequestOptions::default()
            },
        )
        .await
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: &T,
        params: &[(&str, &str)],
    ) -> Envelope {
        let url = self.config.resolve_url(endpoint, params);
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => return Envelope::from_error(&ApiError::from(e)),
        };
        self.execute(
            &url,
            RequestOptions {
                method,
                body: Some(body),
                ..RequestOptions::default()
            },
        )
        .await
    }

    /// POST a prebuilt multipart body.
    ///
    /// Only the API key and, when present, the bearer token are sent; the
    /// content type is left to the transport so it can carry the multipart
    /// boundary.
    pub async fn upload_form_data(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
        form: Form,
    ) -> Envelope {
        let url = self.config.resolve_url(endpoint, params);
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(self.config.api_key()) {
            headers.insert("X-API-Key", key);
        }
        if let Some(token) = self.token() {
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, bearer);
            }
        }
        self.execute(
            &url,
            RequestOptions {
                method: Method::POST,
                headers: Some(headers),
                form: Some(form),
                ..RequestOptions::default()
            },
        )
        .await
    }
}
