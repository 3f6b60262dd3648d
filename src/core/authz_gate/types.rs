//! Authorization gate type definitions

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::permission_cache::PermissionKey;
use crate::utils::error::Result;

/// Terminal outcome of a permission check.
///
/// Every check resolves to one of these two values; the gate never surfaces
/// an error to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The action is permitted, the affordance may be revealed
    Granted,
    /// The action is not permitted (or could not be verified)
    Denied,
}

impl CheckOutcome {
    /// Whether the check resolved as granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, CheckOutcome::Granted)
    }

    pub(crate) fn from_granted(granted: bool) -> Self {
        if granted {
            CheckOutcome::Granted
        } else {
            CheckOutcome::Denied
        }
    }
}

/// What a single authorization round trip produced.
///
/// Only `Allow` and `Deny` are permission facts and get cached. The other
/// two variants describe the state of the session or the backend, not of the
/// permission, and must not be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendVerdict {
    /// 2xx: the action is permitted
    Allow,
    /// 403: the action is explicitly denied for this key
    Deny,
    /// 401: the session is no longer valid
    SessionExpired,
    /// Any other non-2xx status
    Failed(u16),
}

/// Network boundary of the gate.
///
/// A transport failure (no response obtained, including timeouts) is an
/// `Err`; any obtained response maps to a [`BackendVerdict`].
#[async_trait]
pub trait AuthzBackend: Send + Sync {
    /// Ask the backend whether `key.verb` is permitted on
    /// `key.resource`/`key.instance_id` for the current principal.
    async fn authorize(&self, key: &PermissionKey) -> Result<BackendVerdict>;
}

/// Callback fired when a check learns the session has expired.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;
