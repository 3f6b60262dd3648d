//! Inventory client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::core::authz_gate::{AuthorizationGate, AuthzBackend, BackendVerdict, CheckOutcome};
use crate::core::permission_cache::{PermissionCache, PermissionKey, Verb};
use crate::utils::error::{ClientError, Result};

/// Production authorization backend.
///
/// A permission check for `(resource, id, verb)` is issued as an HTTP
/// request using `verb` itself as the method, against the backend's
/// permission-check path `f/{resource}/{id}`. The response body is ignored;
/// only the status matters.
#[derive(Debug, Clone)]
pub struct HttpAuthzBackend {
    http: reqwest::Client,
    base: Url,
}

impl HttpAuthzBackend {
    /// Create a backend over an existing HTTP client and base URL.
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    fn permission_url(&self, key: &PermissionKey) -> Result<Url> {
        self.base
            .join(&format!("f/{}/{}", key.resource, key.instance_id))
            .map_err(|e| ClientError::Config(format!("Invalid permission URL: {}", e)))
    }
}

#[async_trait]
impl AuthzBackend for HttpAuthzBackend {
    async fn authorize(&self, key: &PermissionKey) -> Result<BackendVerdict> {
        let url = self.permission_url(key)?;
        debug!(key = %key, %url, "issuing authorization request");

        let response = self.http.request(key.verb.method(), url).send().await?;
        let status = response.status();

        Ok(if status.is_success() {
            BackendVerdict::Allow
        } else {
            match status.as_u16() {
                401 => BackendVerdict::SessionExpired,
                403 => BackendVerdict::Deny,
                other => BackendVerdict::Failed(other),
            }
        })
    }
}

/// Client for the inventory backend.
///
/// Bundles the HTTP transport, the permission cache and the authorization
/// gate, and wires cache invalidation into every successful mutation and
/// credential change.
#[derive(Debug)]
pub struct InventoryClient {
    http: reqwest::Client,
    base: Url,
    cache: Arc<PermissionCache>,
    gate: AuthorizationGate,
}

impl InventoryClient {
    /// Create a client from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::Config("No backend URL configured".to_string()));
        }

        let mut base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL: {}", e)))?;
        // Relative joins drop the last path segment without this.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.settings.timeout))
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let cache = Arc::new(match &config.settings.cache_path {
            Some(path) => PermissionCache::persistent(path),
            None => PermissionCache::in_memory(),
        });

        let backend = Arc::new(HttpAuthzBackend::new(http.clone(), base.clone()));
        let gate = AuthorizationGate::new(cache.clone(), backend);

        info!(base = %base, "inventory client created");

        Ok(Self {
            http,
            base,
            cache,
            gate,
        })
    }

    /// Install the callback fired when a permission check learns the session
    /// has expired, typically a redirect to the login view.
    pub fn with_session_expired_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.gate = self.gate.with_session_expired_hook(hook);
        self
    }

    /// The authorization gate.
    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// The permission cache shared with the gate.
    pub fn cache(&self) -> &Arc<PermissionCache> {
        &self.cache
    }

    /// Whether `verb` is permitted on `resource`/`instance_id` for the
    /// current principal.
    pub async fn can(&self, resource: &str, instance_id: &str, verb: Verb) -> bool {
        self.gate
            .check(&PermissionKey::new(resource, instance_id, verb))
            .await
            .is_granted()
    }

    /// Resolve a permission check through the gate.
    pub async fn check(&self, key: &PermissionKey) -> CheckOutcome {
        self.gate.check(key).await
    }

    /// Create a resource: `POST /{resource}`.
    pub async fn create(&self, resource: &str, body: &Value) -> Result<Value> {
        self.mutate(reqwest::Method::POST, resource, Some(body)).await
    }

    /// Update a resource: `PUT /{resource}/{id}`.
    pub async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<Value> {
        self.mutate(
            reqwest::Method::PUT,
            &format!("{}/{}", resource, id),
            Some(body),
        )
        .await
    }

    /// Delete a resource: `DELETE /{resource}/{id}`.
    pub async fn delete(&self, resource: &str, id: &str) -> Result<Value> {
        self.mutate(reqwest::Method::DELETE, &format!("{}/{}", resource, id), None)
            .await
    }

    async fn mutate(&self, method: reqwest::Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ClientError::Config(format!("Invalid mutation URL: {}", e)))?;

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 {
            return Err(ClientError::SessionExpired);
        }
        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "mutation rejected");
            return Err(ClientError::MutationRejected {
                status: status.as_u16(),
            });
        }

        // A successful write can change what the principal may do across
        // unrelated resources, so every cached decision is dropped.
        self.cache.clear();
        debug!(%method, path, "mutation succeeded, permission cache invalidated");

        let text = response.text().await?;
        if text.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    /// Authenticate against the backend: `POST /get-token`.
    ///
    /// On success the permission cache is cleared: previously cached
    /// decisions belong to the previous principal. Returns the session
    /// token issued by the backend.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self
            .base
            .join("get-token")
            .map_err(|e| ClientError::Config(format!("Invalid login URL: {}", e)))?;

        let response = self
            .http
            .post(url)
            .form(&[("person_email", email), ("person_password", password)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Auth(format!(
                "login rejected with status {}",
                status.as_u16()
            )));
        }

        self.cache.clear();
        info!(email, "logged in, permission cache reset");

        Ok(response.text().await?)
    }

    /// End the session: `GET /delete-token`.
    ///
    /// The cache is cleared even if the backend call fails; a client without
    /// a session has no business keeping the old principal's decisions.
    pub async fn logout(&self) -> Result<()> {
        let url = self
            .base
            .join("delete-token")
            .map_err(|e| ClientError::Config(format!("Invalid logout URL: {}", e)))?;

        let result = self.http.get(url).send().await;
        self.cache.clear();

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = response.status().as_u16(), "logout rejected");
            }
            Err(e) => warn!(error = %e, "logout request failed"),
            Ok(_) => info!("logged out, permission cache reset"),
        }

        Ok(())
    }
}
