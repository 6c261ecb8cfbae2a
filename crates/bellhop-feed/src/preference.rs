//! Per-staff realtime preference persistence.
//!
//! Stored as a plain string under `<prefix>:<staff_id>`. Parsing is
//! default-open: only the exact disabled sentinel turns realtime off, and
//! an absent key, a garbled value, or a failed read all count as enabled.

use tracing::warn;
use uuid::Uuid;

use bellhop_core::result::AppResult;
use bellhop_core::traits::LocalStore;

/// Stored value meaning realtime updates are disabled.
pub const DISABLED: &str = "false";
/// Stored value meaning realtime updates are enabled.
pub const ENABLED: &str = "true";

/// Builds the store key for a staff member's preference.
pub fn key(prefix: &str, staff_id: Uuid) -> String {
    format!("{prefix}:{staff_id}")
}

/// Reads the preference for a staff member.
pub async fn read(store: &dyn LocalStore, prefix: &str, staff_id: Uuid) -> bool {
    match store.get(&key(prefix, staff_id)).await {
        Ok(Some(value)) => value != DISABLED,
        Ok(None) => true,
        Err(e) => {
            warn!(error = %e, "Preference read failed, defaulting to enabled");
            true
        }
    }
}

/// Persists the preference for a staff member.
pub async fn write(
    store: &dyn LocalStore,
    prefix: &str,
    staff_id: Uuid,
    enabled: bool,
) -> AppResult<()> {
    let value = if enabled { ENABLED } else { DISABLED };
    store.set(&key(prefix, staff_id), value).await
}
