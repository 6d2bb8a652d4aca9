//! Credential selection.
//!
//! Selection is a two-tier fallback evaluated on a pool snapshot:
//!
//! 1. the primary credential, if it is active or degraded;
//! 2. otherwise the first active or degraded credential in pool order;
//! 3. otherwise none.
//!
//! No state is carried between calls.

use tracing::debug;

use rxguard_contracts::credential::{ApiKeyCredential, ApiKeyStatus};

/// The credential flagged primary, whatever its health.
pub fn primary_key(pool: &[ApiKeyCredential]) -> Option<&ApiKeyCredential> {
    pool.iter().find(|k| k.is_primary)
}

/// The credential that should serve requests right now.
pub fn active_key(pool: &[ApiKeyCredential]) -> Option<&ApiKeyCredential> {
    if let Some(primary) = primary_key(pool).filter(|k| k.status.is_usable()) {
        return Some(primary);
    }

    let fallback = pool.iter().find(|k| k.status.is_usable());
    match fallback {
        Some(key) => debug!(key_id = %key.id, "primary unavailable, failing over"),
        None => debug!(pool = pool.len(), "no usable credential in pool"),
    }
    fallback
}

/// Number of credentials currently in `Active` status.
pub fn healthy_count(pool: &[ApiKeyCredential]) -> usize {
    pool.iter()
        .filter(|k| k.status == ApiKeyStatus::Active)
        .count()
}
