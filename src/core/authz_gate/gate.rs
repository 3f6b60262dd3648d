//! Authorization gate implementation
//!
//! Resolves "is verb V permitted on resource R instance I" with cache-first
//! semantics: a recorded decision answers immediately, a miss costs exactly
//! one backend round trip and the decision is written back before the caller
//! observes it.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::types::{AuthzBackend, BackendVerdict, CheckOutcome, SessionExpiredHook};
use crate::core::permission_cache::{PermissionCache, PermissionKey};

/// Cache-first permission check protocol.
///
/// Independent checks are issued concurrently with no ordering guarantee.
/// Concurrent checks for the identical key may each perform their own round
/// trip; the last writer of an identical (key, decision) pair is harmless.
pub struct AuthorizationGate {
    cache: Arc<PermissionCache>,
    backend: Arc<dyn AuthzBackend>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl AuthorizationGate {
    /// Create a gate over a cache and a backend boundary.
    pub fn new(cache: Arc<PermissionCache>, backend: Arc<dyn AuthzBackend>) -> Self {
        Self {
            cache,
            backend,
            on_session_expired: None,
        }
    }

    /// Install the callback fired when a check runs into an expired session,
    /// typically a redirect to the login view.
    pub fn with_session_expired_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    /// The cache this gate reads and populates.
    pub fn cache(&self) -> &Arc<PermissionCache> {
        &self.cache
    }

    /// Resolve a permission check.
    ///
    /// Never returns an error: explicit denials, session expiry, server
    /// errors and transport failures all resolve to
    /// [`CheckOutcome::Denied`]. Only explicit backend answers (2xx grant,
    /// 403 denial) are written to the cache; an unreachable or failing
    /// backend leaves the cache untouched so a later check retries.
    pub async fn check(&self, key: &PermissionKey) -> CheckOutcome {
        if let Some(granted) = self.cache.get(key) {
            return CheckOutcome::from_granted(granted);
        }

        match self.backend.authorize(key).await {
            Ok(BackendVerdict::Allow) => {
                self.cache.set(key, true);
                CheckOutcome::Granted
            }
            Ok(BackendVerdict::Deny) => {
                self.cache.set(key, false);
                CheckOutcome::Denied
            }
            Ok(BackendVerdict::SessionExpired) => {
                warn!(key = %key, "authorization check hit an expired session");
                if let Some(hook) = &self.on_session_expired {
                    hook();
                }
                CheckOutcome::Denied
            }
            Ok(BackendVerdict::Failed(status)) => {
                warn!(key = %key, status, "authorization check failed upstream");
                CheckOutcome::Denied
            }
            Err(e) => {
                warn!(key = %key, error = %e, "authorization check could not reach the backend");
                CheckOutcome::Denied
            }
        }
    }

    /// Resolve a check and deliver the outcome through the caller's two
    /// callback channels. `on_granted` typically reveals a UI affordance;
    /// `on_denied` is usually a no-op since affordances start hidden.
    pub async fn check_then<G, D>(&self, key: &PermissionKey, on_granted: G, on_denied: D) -> CheckOutcome
    where
        G: FnOnce(),
        D: FnOnce(),
    {
        let outcome = self.check(key).await;
        match outcome {
            CheckOutcome::Granted => on_granted(),
            CheckOutcome::Denied => on_denied(),
        }
        outcome
    }

    /// Resolve a batch of checks concurrently, as a view does for every
    /// gated control on page load. Outcomes are returned in input order;
    /// completion order over the wire is unspecified.
    pub async fn check_many(&self, keys: &[PermissionKey]) -> Vec<CheckOutcome> {
        debug!(count = keys.len(), "resolving permission check batch");
        join_all(keys.iter().map(|key| self.check(key))).await
    }
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("cache", &self.cache)
            .field("has_session_hook", &self.on_session_expired.is_some())
            .finish()
    }
}
